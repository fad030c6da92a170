//! Error types for the dense-layer engine.
//!
//! Every variant marks a violated precondition on the caller's side. The
//! engine raises the error at the point of violation and propagates it
//! upward; there are no retries and no partial recovery.

use thiserror::Error;

/// Errors raised by matrix operations, layer construction and training.
#[derive(Debug, Error)]
pub enum NetError {
    /// Two matrix operands have incompatible shapes.
    #[error("matrix shapes {left:?} and {right:?} are incompatible")]
    DimensionMismatch {
        /// Shape (rows, cols) of the left operand.
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand.
        right: (usize, usize),
    },

    /// A vector's length does not match the expected layer width.
    #[error("vector length was {found}, expected {expected}")]
    LengthMismatch {
        /// The length the layer requires.
        expected: usize,
        /// The length the caller supplied.
        found: usize,
    },

    /// A configuration count must be positive.
    #[error("{name} must be positive")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// A required builder field was never set.
    #[error("{name} was not set")]
    MissingConfiguration {
        /// Name of the missing field.
        name: &'static str,
    },

    /// The worker pool backing the backward reduction could not be built.
    ///
    /// This is a fatal configuration error, never a signal to silently fall
    /// back to serial execution.
    #[error("worker pool unavailable: {0}")]
    PoolUnavailable(#[from] rayon::ThreadPoolBuildError),
}
