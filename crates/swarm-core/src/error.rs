//! Base error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `SwarmError` via `From` impls or stay separate; both patterns are
//! acceptable — prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `swarm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `swarm-*` crates.
pub type SwarmResult<T> = Result<T, SwarmError>;
