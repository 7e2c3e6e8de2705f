//! # Synfire - Spiking-Neuron Simulation Substrate
//!
//! Biologically-inspired point-neuron models with online synaptic
//! learning, discretized at a fixed timestep.
//!
//! ## Core Components
//!
//! - **Neurons**: LIF and Izhikevich point models behind one
//!   [`SpikingNeuron`] trait, with named [`IzhPreset`]s
//! - **Populations**: homogeneous neuron collections stepped together,
//!   with optional parameter diversity and current noise
//! - **Encoders**: rate, population (tuning-curve), and hashed sparse
//!   text coding between external signals and spike activity
//! - **Homeostasis**: a negative-feedback regulator holding population
//!   firing rates near a target by rescaling input currents
//! - **STDP**: trace-based spike-timing-dependent plasticity over a
//!   dense masked weight matrix
//!
//! ## Design Principles
//!
//! - **Explicit time**: the timestep lives in [`SimConfig`] and is
//!   threaded into every constructor — no ambient global clock
//! - **Synchronous**: everything advances one caller-driven timestep at
//!   a time; no threads, no I/O, no hidden scheduling
//! - **Fail fast, clip always**: bad configuration is an error at
//!   construction; bounded quantities are clipped on every update
//!
//! ## Example
//!
//! ```
//! use synfire::{
//!     Population, IzhPreset, SimConfig, SynapseConfig, SynapticNetwork,
//! };
//!
//! let sim = SimConfig::default();
//! let mut pre = Population::izhikevich(10, IzhPreset::RegularSpiking, 0.0, &sim)?;
//! let mut post = Population::izhikevich(5, IzhPreset::RegularSpiking, 0.0, &sim)?;
//! let mut net = SynapticNetwork::new(10, 5, SynapseConfig::default(), &sim)?;
//!
//! let mut currents = vec![0.0f32; 5];
//! for _ in 0..100 {
//!     let pre_spikes = pre.step_uniform(10.0).to_vec();
//!     let post_spikes = post.step(&currents)?.to_vec();
//!     currents = net.step(&pre_spikes, &post_spikes)?;
//! }
//! # Ok::<(), synfire::SynfireError>(())
//! ```

// Simulation context (explicit timestep)
pub mod sim;
pub use sim::{SimConfig, DEFAULT_DT_MS};

// Point-neuron models
pub mod neuron;
pub use neuron::{
    IzhPreset, IzhikevichNeuron, LifNeuron, LifParams, SpikeHistory, SpikingNeuron,
    SPIKE_THRESHOLD_MV,
};

// Populations
pub mod population;
pub use population::Population;

// Signal encoders
pub mod encoding;
pub use encoding::{PopulationEncoder, RateEncoder, TextEncoder};

// Homeostatic regulation
pub mod homeostasis;
pub use homeostasis::{HomeostaticRegulator, RegulatorStatus};

// STDP synaptic learning
pub mod stdp;
pub use stdp::{
    NetworkSnapshot, StdpRule, Synapse, SynapseConfig, SynapticNetwork, WeightStats,
};

// Error types
mod error;
pub use error::{Result, SynfireError};
