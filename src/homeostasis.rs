//! Homeostatic regulation
//!
//! A negative-feedback controller holding a population's average firing
//! rate near a target by rescaling its input current. Sustained
//! overactivity drives excitability down; sustained silence drives it
//! up; at-target activity holds it near 1.0. This is a stabilizer, not
//! a learning rule — it has no notion of reward or correctness.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynfireError};
use crate::sim::SimConfig;

/// Excitability bounds, clipped on every update
pub const EXCITABILITY_MIN: f32 = 0.1;
pub const EXCITABILITY_MAX: f32 = 5.0;

/// Homeostatic regulator for one population
#[derive(Clone, Debug)]
pub struct HomeostaticRegulator {
    /// Target firing rate (Hz)
    pub target_rate: f32,
    /// Adaptation time constant (ms); larger = slower
    pub tau: f32,
    /// Correction gain
    pub strength: f32,
    /// Exponentially smoothed population rate (Hz)
    activity_avg: f32,
    /// Input-current multiplier (1.0 = neutral)
    excitability: f32,
    dt_ms: f32,
}

/// Debug snapshot of regulator state
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RegulatorStatus {
    pub target_rate: f32,
    pub activity_avg: f32,
    pub excitability: f32,
}

impl HomeostaticRegulator {
    /// Create a regulator.
    ///
    /// The moving average starts at the target rate, so a population
    /// already at target leaves excitability untouched.
    pub fn new(target_rate: f32, tau: f32, strength: f32, sim: &SimConfig) -> Result<Self> {
        if target_rate < 0.0 {
            return Err(SynfireError::invalid(
                "target_rate",
                target_rate as f64,
                "target rate must be non-negative",
            ));
        }
        if !(tau > 0.0) {
            return Err(SynfireError::invalid(
                "tau",
                tau as f64,
                "adaptation time constant must be positive",
            ));
        }
        Ok(Self {
            target_rate,
            tau,
            strength,
            activity_avg: target_rate,
            excitability: 1.0,
            dt_ms: sim.dt_ms,
        })
    }

    /// Regulator with typical defaults (5 Hz target, 10 s adaptation)
    pub fn with_defaults(sim: &SimConfig) -> Self {
        Self {
            target_rate: 5.0,
            tau: 10_000.0,
            strength: 0.1,
            activity_avg: 5.0,
            excitability: 1.0,
            dt_ms: sim.dt_ms,
        }
    }

    /// Consume one step's spike count from a population of `n_neurons`.
    ///
    /// Updates the smoothed rate estimate and nudges excitability toward
    /// the target, clipping to [0.1, 5.0] so the next `scale_input` call
    /// always sees an in-bounds multiplier.
    pub fn update(&mut self, spike_count: usize, n_neurons: usize) {
        if n_neurons == 0 {
            return;
        }

        // Instantaneous rate: active fraction per step, in Hz
        let current_rate = (spike_count as f32 / n_neurons as f32) * (1000.0 / self.dt_ms);

        let alpha = self.dt_ms / self.tau;
        self.activity_avg += alpha * (current_rate - self.activity_avg);

        let error = self.target_rate - self.activity_avg;
        self.excitability += self.strength * error * alpha;
        self.excitability = self.excitability.clamp(EXCITABILITY_MIN, EXCITABILITY_MAX);
    }

    /// Rescale an input current by the current excitability
    pub fn scale_input(&self, input_current: f32) -> f32 {
        input_current * self.excitability
    }

    /// Current excitability multiplier
    pub fn excitability(&self) -> f32 {
        self.excitability
    }

    /// Smoothed population rate estimate (Hz)
    pub fn activity_avg(&self) -> f32 {
        self.activity_avg
    }

    /// Debug snapshot
    pub fn status(&self) -> RegulatorStatus {
        RegulatorStatus {
            target_rate: self.target_rate,
            activity_avg: self.activity_avg,
            excitability: self.excitability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regulator() -> HomeostaticRegulator {
        // 5 Hz target, 10 s adaptation, gain 0.1, dt = 1 ms
        HomeostaticRegulator::new(5.0, 10_000.0, 0.1, &SimConfig::default()).unwrap()
    }

    #[test]
    fn test_overactivity_lowers_excitability() {
        let mut reg = regulator();
        // 4 of 100 neurons firing every ms = 40 Hz, far above 5 Hz
        for _ in 0..20_000 {
            reg.update(4, 100);
        }
        assert!(
            reg.excitability() < 1.0,
            "excitability = {}",
            reg.excitability()
        );
        assert!(reg.excitability() >= EXCITABILITY_MIN);
    }

    #[test]
    fn test_silence_raises_excitability() {
        let mut reg = regulator();
        for _ in 0..20_000 {
            reg.update(0, 100);
        }
        assert!(
            reg.excitability() > 1.0,
            "excitability = {}",
            reg.excitability()
        );
        assert!(reg.excitability() <= EXCITABILITY_MAX);
    }

    #[test]
    fn test_at_target_holds_steady() {
        let mut reg = regulator();
        // 1 of 200 neurons per ms = exactly 5 Hz
        for _ in 0..20_000 {
            reg.update(1, 200);
        }
        let e = reg.excitability();
        assert!((0.8..=1.2).contains(&e), "excitability drifted to {e}");
    }

    #[test]
    fn test_scale_input() {
        let reg = regulator();
        assert_eq!(reg.scale_input(10.0), 10.0);
    }

    #[test]
    fn test_excitability_stays_clipped() {
        let mut reg = HomeostaticRegulator::new(5.0, 100.0, 50.0, &SimConfig::default()).unwrap();
        // Aggressive gain with a short time constant slams the bounds
        for _ in 0..10_000 {
            reg.update(100, 100);
        }
        assert!(reg.excitability() >= EXCITABILITY_MIN);
        for _ in 0..10_000 {
            reg.update(0, 100);
        }
        assert!(reg.excitability() <= EXCITABILITY_MAX);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let sim = SimConfig::default();
        assert!(HomeostaticRegulator::new(-1.0, 100.0, 0.1, &sim).is_err());
        assert!(HomeostaticRegulator::new(5.0, 0.0, 0.1, &sim).is_err());
    }
}
