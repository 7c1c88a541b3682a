//! Credential composer request handler.
//!
//! # State Transitions
//!
//! ```text
//! Unconfigured
//!     ↓ (configure)
//! Configured  ⟲ (configure swaps the held value)
//! ```
//!
//! There is no transition back to `Unconfigured`. Compose requests made while
//! unconfigured fail with `NotReady`.

use std::sync::Arc;

use claimsmith_core::{ComposerError, ComposerResult, Configuration, Logger};
use claimsmith_identity::WorkloadId;

use crate::claims::{Claims, StructuredMap};
use crate::compose::{compose, DerivedAttributes};
use crate::config_cell::ConfigCell;
use crate::host::{broker_required, ServiceBroker};

/// Host services this plugin asks the broker for at startup.
pub const REQUIRED_HOST_SERVICES: &[&str] = &[];

/// Lifecycle state of the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Unconfigured,
    Configured,
}

/// Request to compose the claims of a workload credential.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeRequest {
    /// Identity string of the workload
    pub spiffe_id: String,
    /// Claims already destined for the credential, if any
    pub claims: Option<Claims>,
}

/// Composed claims returned to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeResponse {
    pub claims: StructuredMap,
}

/// Credential composer that injects identity-derived claims.
pub struct CredentialComposerPlugin {
    config: ConfigCell<Configuration>,
    logger: Arc<dyn Logger>,
}

impl CredentialComposerPlugin {
    /// Create an unconfigured plugin logging through `logger`.
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            config: ConfigCell::new(),
            logger,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandlerState {
        if self.config.is_configured() {
            HandlerState::Configured
        } else {
            HandlerState::Unconfigured
        }
    }

    /// Decode and install a new configuration.
    pub fn configure(&self, hcl_configuration: &str) -> ComposerResult<()> {
        let config = Configuration::decode(hcl_configuration)?;
        self.config.configure(config);
        self.logger.configured();
        Ok(())
    }

    /// Called once at startup with the host's service registry.
    ///
    /// This plugin needs no host services; see [`REQUIRED_HOST_SERVICES`].
    pub fn broker_host_services(&self, broker: &dyn ServiceBroker) -> ComposerResult<()> {
        broker_required(broker, REQUIRED_HOST_SERVICES)
    }

    /// Inject `spiffe-id`, `trust-domain` and `workload` claims into the
    /// request's existing claims.
    pub fn compose_workload_credential_claims(
        &self,
        request: Option<ComposeRequest>,
    ) -> ComposerResult<ComposeResponse> {
        let request = request
            .ok_or_else(|| ComposerError::InvalidRequest("request cannot be nil".to_string()))?;

        // Gate only: composition does not read any configured field yet.
        let _config = self
            .config
            .read()
            .map_err(|e| ComposerError::NotReady(e.to_string()))?;

        let spiffe_id = request.spiffe_id.as_str();
        if spiffe_id.is_empty() {
            return Err(ComposerError::InvalidRequest(
                "SPIFFE ID is missing in the request".to_string(),
            ));
        }

        let id = WorkloadId::parse(spiffe_id).map_err(|e| {
            ComposerError::InvalidRequest(format!(
                "unable to parse trust domain and workload from SPIFFE ID: {}",
                e
            ))
        })?;

        self.logger.workload_retrieved(spiffe_id, &id.trust_domain, &id.path);

        let derived = DerivedAttributes::new(spiffe_id, &id).into_claims();
        let claims = compose(request.claims, derived).map_err(|e| {
            ComposerError::Internal(format!("failed to create updated claims: {}", e))
        })?;

        Ok(ComposeResponse { claims })
    }
}

impl std::fmt::Debug for CredentialComposerPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialComposerPlugin")
            .field("state", &self.state())
            .finish()
    }
}
