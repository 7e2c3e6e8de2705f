//! Named Izhikevich presets
//!
//! Presets are a closed enumeration: every named behavior maps to a fixed
//! (a, b, c, d) tuple, and explicit parameters go through the `Custom`
//! variant. Parsing a name (for config files) fails on unknown names
//! rather than silently defaulting.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SynfireError;

/// Izhikevich neuron presets
///
/// Each preset maps to specific (a, b, c, d) parameters reproducing a
/// characteristic firing pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum IzhPreset {
    /// Regular spiking (a=0.02, b=0.2, c=-65, d=8)
    /// Most common cortical excitatory neuron pattern
    #[default]
    RegularSpiking,

    /// Intrinsically bursting (a=0.02, b=0.2, c=-55, d=4)
    /// Layer 5 pyramidal neurons
    IntrinsicBursting,

    /// Chattering (a=0.02, b=0.2, c=-50, d=2)
    /// Fast rhythmic bursts
    Chattering,

    /// Tonic spiking (a=0.02, b=0.2, c=-65, d=6)
    /// Sustained regular firing
    TonicSpiking,

    /// Fast spiking (a=0.1, b=0.2, c=-65, d=2)
    /// Cortical inhibitory interneurons
    FastSpiking,

    /// Low-threshold spiking (a=0.02, b=0.25, c=-65, d=2)
    /// Some GABAergic interneurons
    LowThreshold,

    /// Thalamic relay (a=0.02, b=0.25, c=-65, d=0.05)
    /// Thalamocortical relay cells
    ThalamicRelay,

    /// Resonator (a=0.1, b=0.26, c=-65, d=2)
    /// Subthreshold oscillations
    Resonator,

    /// Explicit parameters
    Custom { a: f32, b: f32, c: f32, d: f32 },
}

impl IzhPreset {
    /// Get Izhikevich parameters (a, b, c, d)
    pub fn params(&self) -> (f32, f32, f32, f32) {
        match *self {
            Self::RegularSpiking => (0.02, 0.2, -65.0, 8.0),
            Self::IntrinsicBursting => (0.02, 0.2, -55.0, 4.0),
            Self::Chattering => (0.02, 0.2, -50.0, 2.0),
            Self::TonicSpiking => (0.02, 0.2, -65.0, 6.0),
            Self::FastSpiking => (0.1, 0.2, -65.0, 2.0),
            Self::LowThreshold => (0.02, 0.25, -65.0, 2.0),
            Self::ThalamicRelay => (0.02, 0.25, -65.0, 0.05),
            Self::Resonator => (0.1, 0.26, -65.0, 2.0),
            Self::Custom { a, b, c, d } => (a, b, c, d),
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::RegularSpiking => "Regular spiking - most common excitatory pattern",
            Self::IntrinsicBursting => "Intrinsically bursting - layer 5 pyramidal",
            Self::Chattering => "Chattering - fast rhythmic bursts",
            Self::TonicSpiking => "Tonic spiking - sustained regular firing",
            Self::FastSpiking => "Fast spiking - inhibitory interneurons",
            Self::LowThreshold => "Low threshold - some GABAergic interneurons",
            Self::ThalamicRelay => "Thalamic relay - thalamocortical cells",
            Self::Resonator => "Resonator - subthreshold oscillations",
            Self::Custom { .. } => "Custom parameters",
        }
    }
}

impl FromStr for IzhPreset {
    type Err = SynfireError;

    /// Parse a snake_case preset name.
    ///
    /// Unknown names are an error: a misspelled config entry should fail
    /// loudly, not degrade to regular spiking.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular_spiking" => Ok(Self::RegularSpiking),
            "intrinsic_bursting" => Ok(Self::IntrinsicBursting),
            "chattering" => Ok(Self::Chattering),
            "tonic_spiking" => Ok(Self::TonicSpiking),
            "fast_spiking" => Ok(Self::FastSpiking),
            "low_threshold" => Ok(Self::LowThreshold),
            "thalamic" => Ok(Self::ThalamicRelay),
            "resonator" => Ok(Self::Resonator),
            other => Err(SynfireError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_spiking_params() {
        let (a, b, c, d) = IzhPreset::RegularSpiking.params();
        assert!((a - 0.02).abs() < 1e-6);
        assert!((b - 0.2).abs() < 1e-6);
        assert!((c - (-65.0)).abs() < 1e-6);
        assert!((d - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_all_names() {
        for name in [
            "regular_spiking",
            "intrinsic_bursting",
            "chattering",
            "tonic_spiking",
            "fast_spiking",
            "low_threshold",
            "thalamic",
            "resonator",
        ] {
            assert!(name.parse::<IzhPreset>().is_ok(), "failed to parse {name}");
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = "regular_spikng".parse::<IzhPreset>();
        assert!(matches!(err, Err(SynfireError::UnknownPreset(_))));
    }

    #[test]
    fn test_custom_params_pass_through() {
        let preset = IzhPreset::Custom {
            a: 0.03,
            b: 0.25,
            c: -60.0,
            d: 4.0,
        };
        assert_eq!(preset.params(), (0.03, 0.25, -60.0, 4.0));
    }

    #[test]
    fn test_preset_serialization() {
        let preset = IzhPreset::FastSpiking;
        let json = serde_json::to_string(&preset).unwrap();
        let restored: IzhPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(preset, restored);
    }
}
