//! Error types for workload identity parsing.

use thiserror::Error;

/// Errors that can occur while parsing an identity string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The identity string is not a well-formed workload identity
    #[error("malformed identity {id:?}: {reason}")]
    Malformed { id: String, reason: &'static str },
}

/// Result type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
