//! Izhikevich neuron
//!
//! Two-variable model reproducing 20+ firing patterns of real neurons
//! with four shape parameters.
//!
//! ## Equations
//!
//! ```text
//! dv/dt = 0.04v² + 5v + 140 - u + I
//! du/dt = a(bv - u)
//! if v >= 30: v = c, u = u + d
//! ```
//!
//! The membrane update runs as two half-steps of dt/2 before the single
//! recovery update, keeping the quadratic term stable near threshold.

use super::history::SpikeHistory;
use super::lif::DEFAULT_RATE_WINDOW_MS;
use super::presets::IzhPreset;
use super::traits::SpikingNeuron;
use crate::sim::SimConfig;

/// Fixed spike threshold (mV); part of the model, not a parameter
pub const SPIKE_THRESHOLD_MV: f32 = 30.0;

/// Izhikevich neuron
#[derive(Clone, Debug)]
pub struct IzhikevichNeuron {
    /// Membrane potential (mV)
    pub v: f32,
    /// Recovery variable
    pub u: f32,
    /// Time scale of recovery
    pub a: f32,
    /// Sensitivity of u to v
    pub b: f32,
    /// After-spike reset value for v (mV)
    pub c: f32,
    /// After-spike recovery increment
    pub d: f32,
    /// Whether the neuron spiked on the most recent step
    pub spike: bool,
    /// Timestep counter
    pub time_step: u64,
    /// Timestep (ms)
    dt_ms: f32,
    /// Recent spike times (bounded)
    history: SpikeHistory,
}

impl IzhikevichNeuron {
    /// Create a neuron from a preset with a spike history covering the
    /// default 1000 ms rate window.
    pub fn new(preset: IzhPreset, sim: &SimConfig) -> Self {
        Self::with_rate_window(preset, sim, DEFAULT_RATE_WINDOW_MS)
    }

    /// Create a neuron whose spike history covers rate windows up to
    /// `window_ms` milliseconds.
    pub fn with_rate_window(preset: IzhPreset, sim: &SimConfig, window_ms: f32) -> Self {
        let (a, b, c, d) = preset.params();
        let capacity = sim.steps_in(window_ms) as usize;
        Self {
            v: c,
            u: b * c,
            a,
            b,
            c,
            d,
            spike: false,
            time_step: 0,
            dt_ms: sim.dt_ms,
            history: SpikeHistory::with_capacity(capacity),
        }
    }

    fn dv(&self, input_current: f32) -> f32 {
        0.04 * self.v * self.v + 5.0 * self.v + 140.0 - self.u + input_current
    }
}

impl SpikingNeuron for IzhikevichNeuron {
    fn step(&mut self, input_current: f32) -> bool {
        self.time_step += 1;

        // Two half-steps on v, one full step on u
        let half_dt = self.dt_ms * 0.5;
        self.v += half_dt * self.dv(input_current);
        self.v += half_dt * self.dv(input_current);
        self.u += self.dt_ms * self.a * (self.b * self.v - self.u);

        if self.v >= SPIKE_THRESHOLD_MV {
            self.spike = true;
            self.v = self.c;
            self.u += self.d;
            self.history.record(self.time_step);
            true
        } else {
            self.spike = false;
            false
        }
    }

    fn membrane(&self) -> f32 {
        self.v
    }

    fn is_spiking(&self) -> bool {
        self.spike
    }

    fn firing_rate(&self, window_ms: f32) -> f32 {
        self.history.rate(self.time_step, window_ms, self.dt_ms)
    }

    fn reset(&mut self) {
        self.v = self.c;
        self.u = self.b * self.c;
        self.spike = false;
        self.time_step = 0;
        self.history.clear();
    }

    fn dt_ms(&self) -> f32 {
        self.dt_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neuron(preset: IzhPreset) -> IzhikevichNeuron {
        IzhikevichNeuron::new(preset, &SimConfig::default())
    }

    fn count_spikes(n: &mut IzhikevichNeuron, current: f32, steps: usize) -> usize {
        let mut count = 0;
        for _ in 0..steps {
            if n.step(current) {
                count += 1;
            }
        }
        count
    }

    #[test]
    fn test_spikes_with_sufficient_current() {
        let mut n = neuron(IzhPreset::RegularSpiking);
        assert!(count_spikes(&mut n, 10.0, 1000) > 0);
    }

    #[test]
    fn test_no_spike_without_current() {
        let mut n = neuron(IzhPreset::RegularSpiking);
        assert_eq!(count_spikes(&mut n, 0.0, 1000), 0);
    }

    #[test]
    fn test_fast_spiking_outpaces_regular() {
        let mut rs = neuron(IzhPreset::RegularSpiking);
        let mut fs = neuron(IzhPreset::FastSpiking);
        let rs_count = count_spikes(&mut rs, 10.0, 1000);
        let fs_count = count_spikes(&mut fs, 10.0, 1000);
        assert!(
            fs_count > rs_count,
            "fast spiking ({fs_count}) must outpace regular spiking ({rs_count})"
        );
    }

    #[test]
    fn test_post_spike_state() {
        let mut n = neuron(IzhPreset::RegularSpiking);
        let u_before = loop {
            let u = n.u;
            if n.step(15.0) {
                break u;
            }
        };
        // After a spike: v = c and u incremented by d
        assert_eq!(n.v, n.c);
        assert!(n.u > u_before);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut n = neuron(IzhPreset::Chattering);
        count_spikes(&mut n, 12.0, 500);
        n.reset();
        assert_eq!(n.v, n.c);
        assert_eq!(n.u, n.b * n.c);
        assert_eq!(n.time_step, 0);
        assert_eq!(n.firing_rate(1000.0), 0.0);
    }
}
