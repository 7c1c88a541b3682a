//! Core functionality shared across the Claimsmith credential composer.
//!
//! This crate provides the error taxonomy surfaced to the host issuance
//! pipeline, the logging capability injected into request handlers, and the
//! operator-supplied plugin configuration.

pub mod config;
pub mod error;
pub mod logging;

pub use config::Configuration;
pub use error::{ComposerError, ComposerResult, ErrorKind};
pub use logging::{Logger, NullLogger, TracingLogger};
