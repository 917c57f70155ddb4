//! Error type shared by every fallible geometry operation.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors produced while building or converting paths.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Growing an output or storage buffer failed.
    #[error("out of memory")]
    OutOfMemory,
    /// All four knots of a cubic segment coincide.
    #[error("degenerate spline: all control points coincide")]
    Degenerate,
    /// A drawing operation was issued before any `move_to`.
    #[error("no current point")]
    NoCurrentPoint,
    /// The transform has no inverse.
    #[error("transform matrix is not invertible")]
    InvalidMatrix,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

pub type Result<T> = std::result::Result<T, Error>;
