//! Error types for queue construction.
//!
//! All errors are raised at the pipeline boundary, before any request is
//! costed. Nothing is clamped or repaired: invalid input is rejected.

use thiserror::Error;

/// Errors that can occur while building a triage queue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriageError {
    #[error("weight `{name}` must be non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("shortlist fraction must be in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("arrival index {index} is shared by `{first}` and `{second}`")]
    DuplicateArrivalIndex {
        index: u64,
        first: String,
        second: String,
    },

    #[error("shortlist of {k} requested from a batch of {len}")]
    ShortlistTooLarge { k: usize, len: usize },

    #[error("unknown urgency tier `{0}`")]
    UnknownTier(String),
}

impl TriageError {
    /// Returns true if the error comes from the caller's parameters rather
    /// than from the batch contents.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidWeight { .. } | Self::InvalidFraction(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TriageError>;
