//! Core trait for point-neuron models
//!
//! `SpikingNeuron` is the only interface populations and drivers use to
//! advance a neuron. Introspection accessors (`membrane`, `is_spiking`)
//! exist for tests, telemetry, and aggregate statistics, not for wiring
//! decisions between layers — spike vectors carry all inter-layer signal.

/// Unified interface for all neuron models
///
/// A neuron is an independent state machine advanced one fixed timestep
/// at a time. Each `step` increments the neuron's internal timestep
/// counter whether or not a spike fires.
pub trait SpikingNeuron {
    /// Advance one timestep with the given input current (mV-scaled).
    ///
    /// Returns true if the neuron spiked on this step.
    fn step(&mut self, input_current: f32) -> bool;

    /// Membrane potential (mV)
    fn membrane(&self) -> f32;

    /// Whether the neuron spiked on the most recent step
    fn is_spiking(&self) -> bool;

    /// Firing rate (Hz) over the trailing `window_ms` milliseconds.
    ///
    /// Returns 0.0 if no spikes are recorded.
    fn firing_rate(&self, window_ms: f32) -> f32;

    /// Restore dynamic state (potential, spike flag, history, counter).
    ///
    /// Fixed parameters are untouched.
    fn reset(&mut self);

    /// Integration timestep (ms)
    fn dt_ms(&self) -> f32;
}
