//! Credential composer for the Claimsmith workload-identity pipeline.
//!
//! The host issuance pipeline calls this plugin with a workload's identity
//! string and the claims destined for its credential. The plugin derives the
//! trust domain and workload path from the identity and injects them, along
//! with the identity itself, before the credential is signed upstream.
//!
//! # Components
//!
//! - **Claims**: typed claim values and their external structured format
//! - **Compose**: merge of derived attributes into existing claims
//! - **Config cell**: guarded, swappable holder of the active configuration
//! - **Plugin**: request handler gating composition on configuration
//!
//! With the `grpc-server` feature, the `grpc_server` module exposes the plugin over
//! tonic.

pub mod claims;
pub mod compose;
pub mod config_cell;
#[cfg(feature = "grpc-server")]
pub mod grpc_server;
pub mod host;
pub mod plugin;

pub use claims::{ClaimValue, Claims, SerializationError, StructuredMap};
pub use compose::{
    compose, DerivedAttributes, SPIFFE_ID_CLAIM, TRUST_DOMAIN_CLAIM, WORKLOAD_CLAIM,
};
pub use config_cell::{ConfigCell, ConfigCellError};
pub use host::{broker_required, NoHostServices, ServiceBroker};
pub use plugin::{
    ComposeRequest, ComposeResponse, CredentialComposerPlugin, HandlerState,
    REQUIRED_HOST_SERVICES,
};

// Re-export core types for convenience
pub use claimsmith_core::{ComposerError, ComposerResult, Configuration, Logger};
