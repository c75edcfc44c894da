//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SwarmError` as one
//! variant via `#[from]`, so store and configuration failures propagate with
//! `?` from anywhere in the stack.

use thiserror::Error;

/// The top-level error type for `sw-core` and a common base for sub-crates.
///
/// Every variant is recoverable: a rejected configuration never starts a run,
/// and a rejected index never touches store state.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("index {index} out of range for {count} agents")]
    OutOfRange { index: usize, count: usize },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SwarmError {
    /// Shorthand for building an [`SwarmError::InvalidConfig`].
    pub fn config(msg: impl Into<String>) -> Self {
        SwarmError::InvalidConfig(msg.into())
    }
}

/// Shorthand result type for all `sw-*` crates.
pub type SwarmResult<T> = Result<T, SwarmError>;
