//! Point-neuron models
//!
//! Two models share one interface:
//!
//! - **LIF**: leaky integrate-and-fire, the simplest spiking neuron
//! - **Izhikevich**: 4-parameter model reproducing varied firing patterns
//!
//! Both are independent per-neuron state machines advanced one fixed
//! timestep at a time given an input current, with a bounded spike
//! history for windowed firing-rate queries.

mod history;
mod izhikevich;
mod lif;
mod presets;
mod traits;

pub use history::SpikeHistory;
pub use izhikevich::{IzhikevichNeuron, SPIKE_THRESHOLD_MV};
pub use lif::{LifNeuron, LifParams, DEFAULT_RATE_WINDOW_MS};
pub use presets::IzhPreset;
pub use traits::SpikingNeuron;
