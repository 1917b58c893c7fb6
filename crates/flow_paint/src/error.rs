//! Path error types

use thiserror::Error;

/// Errors raised while building a [`Path`](crate::Path)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A segment was added before any `move_to`
    #[error("No subpath started: call move_to first")]
    NoSubpath,

    /// A segment was added to a subpath that was already closed
    #[error("Current subpath is closed: call move_to to start a new one")]
    SubpathClosed,
}

/// Result type for path building operations
pub type Result<T> = std::result::Result<T, PathError>;
