//! Leaky Integrate-and-Fire neuron
//!
//! The simplest spiking model: membrane potential integrates input current,
//! leaks toward rest, and fires on threshold crossing.
//!
//! ## Equation
//!
//! ```text
//! dv/dt = (-(v - v_rest) + I) / tau_m
//! if v >= v_threshold: spike, v = v_reset
//! ```

use serde::{Deserialize, Serialize};

use super::history::SpikeHistory;
use super::traits::SpikingNeuron;
use crate::error::{Result, SynfireError};
use crate::sim::SimConfig;

/// Default firing-rate window bounding the spike history (ms)
pub const DEFAULT_RATE_WINDOW_MS: f32 = 1000.0;

/// LIF neuron parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifParams {
    /// Membrane time constant (ms); larger = slower leak
    pub tau_m: f32,
    /// Resting potential (mV)
    pub v_rest: f32,
    /// Spike threshold (mV)
    pub v_threshold: f32,
    /// Reset potential after a spike (mV)
    pub v_reset: f32,
}

impl Default for LifParams {
    fn default() -> Self {
        Self {
            tau_m: 20.0,
            v_rest: -65.0,
            v_threshold: -50.0,
            v_reset: -65.0,
        }
    }
}

impl LifParams {
    fn validate(&self) -> Result<()> {
        if !(self.tau_m > 0.0) {
            return Err(SynfireError::invalid(
                "tau_m",
                self.tau_m as f64,
                "membrane time constant must be positive",
            ));
        }
        if self.v_rest >= self.v_threshold {
            return Err(SynfireError::invalid(
                "v_rest",
                self.v_rest as f64,
                "resting potential must lie below the spike threshold",
            ));
        }
        if self.v_reset >= self.v_threshold {
            return Err(SynfireError::invalid(
                "v_reset",
                self.v_reset as f64,
                "reset potential must lie below the spike threshold",
            ));
        }
        Ok(())
    }
}

/// Leaky Integrate-and-Fire neuron
#[derive(Clone, Debug)]
pub struct LifNeuron {
    /// Membrane potential (mV)
    pub v: f32,
    /// Fixed parameters
    pub params: LifParams,
    /// Whether the neuron spiked on the most recent step
    pub spike: bool,
    /// Timestep counter
    pub time_step: u64,
    /// Timestep (ms)
    dt_ms: f32,
    /// Recent spike times (bounded)
    history: SpikeHistory,
}

impl LifNeuron {
    /// Create a neuron with a spike history covering the default
    /// 1000 ms rate window.
    pub fn new(params: LifParams, sim: &SimConfig) -> Result<Self> {
        Self::with_rate_window(params, sim, DEFAULT_RATE_WINDOW_MS)
    }

    /// Create a neuron whose spike history covers rate windows up to
    /// `window_ms` milliseconds.
    pub fn with_rate_window(params: LifParams, sim: &SimConfig, window_ms: f32) -> Result<Self> {
        params.validate()?;
        let capacity = sim.steps_in(window_ms) as usize;
        Ok(Self {
            v: params.v_rest,
            params,
            spike: false,
            time_step: 0,
            dt_ms: sim.dt_ms,
            history: SpikeHistory::with_capacity(capacity),
        })
    }
}

impl SpikingNeuron for LifNeuron {
    fn step(&mut self, input_current: f32) -> bool {
        self.time_step += 1;

        // Leak toward rest plus input drive
        let dv = (-(self.v - self.params.v_rest) + input_current) / self.params.tau_m;
        self.v += dv * self.dt_ms;

        if self.v >= self.params.v_threshold {
            self.spike = true;
            self.v = self.params.v_reset;
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
        self.v = self.params.v_rest;
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

    fn neuron() -> LifNeuron {
        LifNeuron::new(LifParams::default(), &SimConfig::default()).unwrap()
    }

    #[test]
    fn test_no_input_no_spike() {
        let mut n = neuron();
        for _ in 0..1000 {
            assert!(!n.step(0.0), "must never spike without input current");
        }
        // Pure leak keeps the potential at rest
        assert!((n.v - n.params.v_rest).abs() < 1e-4);
    }

    #[test]
    fn test_sustained_current_spikes() {
        let mut n = neuron();
        let mut count = 0;
        for _ in 0..1000 {
            if n.step(20.0) {
                count += 1;
            }
        }
        assert!(count > 0, "sustained 20 mV drive must produce spikes");
    }

    #[test]
    fn test_stronger_current_more_spikes() {
        let mut n = neuron();
        let mut low = 0;
        for _ in 0..1000 {
            if n.step(20.0) {
                low += 1;
            }
        }
        n.reset();
        let mut high = 0;
        for _ in 0..1000 {
            if n.step(30.0) {
                high += 1;
            }
        }
        assert!(high > low, "spike count must grow with drive: {high} <= {low}");
    }

    #[test]
    fn test_firing_rate() {
        let mut n = neuron();
        for _ in 0..1000 {
            n.step(20.0);
        }
        let rate = n.firing_rate(1000.0);
        assert!(rate > 0.0);
        // dt = 1 ms, 1000 steps = 1 s: rate equals the spike count
        assert!((rate - n.history.len() as f32).abs() < 1e-3);
    }

    #[test]
    fn test_reset_restores_rest() {
        let mut n = neuron();
        for _ in 0..100 {
            n.step(25.0);
        }
        n.reset();
        assert_eq!(n.v, n.params.v_rest);
        assert!(!n.spike);
        assert_eq!(n.time_step, 0);
        assert_eq!(n.firing_rate(1000.0), 0.0);
    }

    #[test]
    fn test_reset_discontinuity() {
        let mut n = neuron();
        loop {
            if n.step(30.0) {
                break;
            }
        }
        // Immediately after a spike the potential sits at v_reset
        assert_eq!(n.v, n.params.v_reset);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let sim = SimConfig::default();
        let bad_tau = LifParams {
            tau_m: 0.0,
            ..Default::default()
        };
        assert!(LifNeuron::new(bad_tau, &sim).is_err());

        let rest_above_threshold = LifParams {
            v_rest: -40.0,
            ..Default::default()
        };
        assert!(LifNeuron::new(rest_above_threshold, &sim).is_err());
    }
}
