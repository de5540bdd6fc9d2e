//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `PlError` as one
//! variant where configuration problems can surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `pl-core`.
pub type PlResult<T> = Result<T, PlError>;
