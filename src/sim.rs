//! Simulation context
//!
//! The simulation timestep is explicit state, passed into every constructor
//! that integrates over time. Each neuron, regulator, and synaptic network
//! stores its own copy, so simulations with different timesteps can coexist
//! in one process. Trace-decay and Euler-integration constants are derived
//! from the timestep at construction.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynfireError};

/// Default timestep (ms)
pub const DEFAULT_DT_MS: f32 = 1.0;

/// Fixed-timestep simulation configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Integration timestep (ms)
    pub dt_ms: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_ms: DEFAULT_DT_MS,
        }
    }
}

impl SimConfig {
    /// Create a config with the given timestep (ms)
    pub fn new(dt_ms: f32) -> Result<Self> {
        if !(dt_ms > 0.0) || !dt_ms.is_finite() {
            return Err(SynfireError::invalid(
                "dt_ms",
                dt_ms as f64,
                "timestep must be positive and finite",
            ));
        }
        Ok(Self { dt_ms })
    }

    /// Number of timesteps spanning a window of `window_ms` (at least 1)
    pub fn steps_in(&self, window_ms: f32) -> u64 {
        (window_ms / self.dt_ms).max(1.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dt() {
        let sim = SimConfig::default();
        assert!((sim.dt_ms - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_bad_dt() {
        assert!(SimConfig::new(0.0).is_err());
        assert!(SimConfig::new(-1.0).is_err());
        assert!(SimConfig::new(f32::NAN).is_err());
        assert!(SimConfig::new(0.1).is_ok());
    }

    #[test]
    fn test_steps_in_window() {
        let sim = SimConfig::new(0.5).unwrap();
        assert_eq!(sim.steps_in(100.0), 200);
        // Window smaller than one step still counts one step
        assert_eq!(sim.steps_in(0.1), 1);
    }
}
