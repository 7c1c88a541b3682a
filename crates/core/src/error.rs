//! Error types returned to the host issuance pipeline.
//!
//! Every failure carries a coded kind and a human-readable message. No
//! partial claims are ever returned alongside an error.

use thiserror::Error;

/// Coded failure kinds, independent of any transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    NotReady,
    InvalidConfiguration,
    Internal,
}

/// Errors surfaced by the composer plugin.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposerError {
    /// Absent request, empty identity string, or malformed identity string
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Compose called before any successful configure
    #[error("Not ready: {0}")]
    NotReady(String),

    /// Configuration payload failed to decode
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Composed claims could not be serialized to the external format
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ComposerError {
    /// The coded kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComposerError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ComposerError::NotReady(_) => ErrorKind::NotReady,
            ComposerError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            ComposerError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ComposerError::InvalidRequest(msg)
            | ComposerError::NotReady(msg)
            | ComposerError::InvalidConfiguration(msg)
            | ComposerError::Internal(msg) => msg,
        }
    }
}

/// Result type for composer operations.
pub type ComposerResult<T> = Result<T, ComposerError>;
