//! Error types for synfire

use thiserror::Error;

/// Synfire error type
///
/// The simulation core is numerically defined: the only hard errors are
/// configuration errors raised at construction time or on mismatched
/// vector inputs. Degenerate runtime inputs (empty spike history,
/// zero-norm vectors, empty text) return neutral values instead of failing.
#[derive(Debug, Error)]
pub enum SynfireError {
    /// A constructor parameter is outside its valid domain
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A vector input does not match the expected dimension
    #[error("length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A preset name could not be parsed
    #[error("unknown neuron preset: {0}")]
    UnknownPreset(String),
}

impl SynfireError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, SynfireError>;
