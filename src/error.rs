//! Error types for lag window computation

use thiserror::Error;

/// Errors returned before any output is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LagError {
    /// Lag length is negative, NaN or infinite
    #[error("invalid lag length: {0} (must be finite and >= 0)")]
    InvalidLagLength(f64),
    /// Output buffer does not match the input length
    #[error("output buffer has length {actual}, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    /// Input is too long to be indexed by the output integer type
    #[error("input of length {len} cannot be indexed by i32 window indices")]
    IndexOverflow { len: usize },
    /// Input decreases at `index`
    #[error("timestamps are not sorted ascending at index {index}")]
    Unsorted { index: usize },
    #[error("timestamp at index {index} is not finite")]
    NonFiniteTimestamp { index: usize },
    /// Two parallel columns differ in length
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, LagError>;
