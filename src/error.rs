//! Error types for bidirectional sequence processing.

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, BiRnnError>;

/// Errors raised while building or running a bidirectional encoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BiRnnError {
    /// A step unit or combiner does not provide the required capability
    /// (zero-width input/output, incompatible widths, unusable merge axis).
    ///
    /// Raised at construction time only.
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Two sequences that must be paired step-for-step differ in length
    #[error("Sequence length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left-hand (forward) sequence
        left: usize,
        /// Length of the right-hand (backward) sequence
        right: usize,
    },
}

impl BiRnnError {
    pub(crate) fn invalid_unit(msg: impl Into<String>) -> Self {
        BiRnnError::InvalidUnit(msg.into())
    }
}
