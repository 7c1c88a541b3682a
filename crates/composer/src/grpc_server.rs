//! gRPC transport for the credential composer plugin.
//!
//! Exposes two services to the host: `CredentialComposer`, which composes
//! credential claims, and `Config`, which delivers operator configuration.
//! Claims travel as `google.protobuf.Struct` and are lifted into typed
//! [`Claims`] on the way in.

use std::future::Future;
use std::sync::Arc;

use claimsmith_core::{ComposerError, ErrorKind};
use prost_types::{value::Kind, ListValue, Struct, Value as ProtoValue};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{transport::Server, Request, Response, Status};

use crate::claims::{ClaimValue, Claims, StructuredMap};
use crate::plugin::{ComposeRequest, CredentialComposerPlugin};

/// Generated protobuf types for the plugin's gRPC API.
pub mod proto {
    pub mod credentialcomposer {
        tonic::include_proto!("claimsmith.credentialcomposer.v1");
    }

    pub mod config {
        tonic::include_proto!("claimsmith.config.v1");
    }
}

use proto::config::config_server::{Config, ConfigServer};
use proto::config::{ConfigureRequest, ConfigureResponse};
use proto::credentialcomposer::credential_composer_server::{
    CredentialComposer, CredentialComposerServer,
};
use proto::credentialcomposer::*;

/// Map a composer failure onto the status code the host expects.
pub fn status_from_error(err: ComposerError) -> Status {
    let message = err.message().to_string();
    match err.kind() {
        ErrorKind::InvalidRequest | ErrorKind::InvalidConfiguration => {
            Status::invalid_argument(message)
        }
        ErrorKind::NotReady => Status::failed_precondition(message),
        ErrorKind::Internal => Status::internal(message),
    }
}

/// Lift a wire struct into typed claims. An unset value kind reads as null.
pub fn claims_from_proto(claims: Struct) -> Claims {
    claims
        .fields
        .into_iter()
        .map(|(key, value)| (key, claim_from_proto(value)))
        .collect()
}

fn claim_from_proto(value: ProtoValue) -> ClaimValue {
    match value.kind {
        None | Some(Kind::NullValue(_)) => ClaimValue::Null,
        Some(Kind::BoolValue(b)) => ClaimValue::Bool(b),
        Some(Kind::NumberValue(n)) => ClaimValue::Number(n),
        Some(Kind::StringValue(s)) => ClaimValue::String(s),
        Some(Kind::ListValue(list)) => {
            ClaimValue::List(list.values.into_iter().map(claim_from_proto).collect())
        }
        Some(Kind::StructValue(nested)) => ClaimValue::Map(claims_from_proto(nested)),
    }
}

/// Build the wire struct from composed claims.
pub fn proto_from_structured(claims: StructuredMap) -> Struct {
    Struct {
        fields: claims
            .into_iter()
            .map(|(key, value)| (key, proto_from_json(value)))
            .collect(),
    }
}

fn proto_from_json(value: serde_json::Value) -> ProtoValue {
    use serde_json::Value;

    let kind = match value {
        Value::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Value::Bool(b) => Kind::BoolValue(b),
        Value::Number(n) => n.as_f64().map_or(
            Kind::NullValue(prost_types::NullValue::NullValue as i32),
            Kind::NumberValue,
        ),
        Value::String(s) => Kind::StringValue(s),
        Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(proto_from_json).collect(),
        }),
        Value::Object(map) => Kind::StructValue(proto_from_structured(map)),
    };
    ProtoValue { kind: Some(kind) }
}

/// `CredentialComposer` gRPC service implementation
pub struct CredentialComposerService {
    plugin: Arc<CredentialComposerPlugin>,
}

impl CredentialComposerService {
    /// Create a new composer service backed by `plugin`
    pub fn new(plugin: Arc<CredentialComposerPlugin>) -> Self {
        Self { plugin }
    }
}

#[tonic::async_trait]
impl CredentialComposer for CredentialComposerService {
    async fn compose_server_x509_ca(
        &self,
        _request: Request<ComposeServerX509CaRequest>,
    ) -> Result<Response<ComposeServerX509CaResponse>, Status> {
        Err(Status::unimplemented("method ComposeServerX509CA not implemented"))
    }

    async fn compose_server_x509_svid(
        &self,
        _request: Request<ComposeServerX509SvidRequest>,
    ) -> Result<Response<ComposeServerX509SvidResponse>, Status> {
        Err(Status::unimplemented(
            "method ComposeServerX509SVID not implemented",
        ))
    }

    async fn compose_agent_x509_svid(
        &self,
        _request: Request<ComposeAgentX509SvidRequest>,
    ) -> Result<Response<ComposeAgentX509SvidResponse>, Status> {
        Err(Status::unimplemented(
            "method ComposeAgentX509SVID not implemented",
        ))
    }

    async fn compose_workload_jwt_svid(
        &self,
        request: Request<ComposeWorkloadJwtSvidRequest>,
    ) -> Result<Response<ComposeWorkloadJwtSvidResponse>, Status> {
        let req = request.into_inner();
        let compose_request = ComposeRequest {
            spiffe_id: req.spiffe_id,
            claims: req
                .attributes
                .and_then(|attributes| attributes.claims)
                .map(claims_from_proto),
        };

        let composed = self
            .plugin
            .compose_workload_credential_claims(Some(compose_request))
            .map_err(status_from_error)?;

        Ok(Response::new(ComposeWorkloadJwtSvidResponse {
            attributes: Some(JwtSvidAttributes {
                claims: Some(proto_from_structured(composed.claims)),
            }),
        }))
    }

    async fn compose_workload_x509_svid(
        &self,
        _request: Request<ComposeWorkloadX509SvidRequest>,
    ) -> Result<Response<ComposeWorkloadX509SvidResponse>, Status> {
        Err(Status::unimplemented(
            "method ComposeWorkloadX509SVID not implemented",
        ))
    }
}

/// `Config` gRPC service implementation
pub struct ConfigService {
    plugin: Arc<CredentialComposerPlugin>,
}

impl ConfigService {
    /// Create a new config service backed by `plugin`
    pub fn new(plugin: Arc<CredentialComposerPlugin>) -> Self {
        Self { plugin }
    }
}

#[tonic::async_trait]
impl Config for ConfigService {
    async fn configure(
        &self,
        request: Request<ConfigureRequest>,
    ) -> Result<Response<ConfigureResponse>, Status> {
        let req = request.into_inner();
        if let Some(core) = &req.core_configuration {
            tracing::debug!(trust_domain = %core.trust_domain, "Host core configuration received");
        }

        self.plugin
            .configure(&req.hcl_configuration)
            .map_err(status_from_error)?;

        Ok(Response::new(ConfigureResponse {}))
    }
}

/// Serve both plugin services on an already-bound listener until `shutdown`
/// resolves.
pub async fn serve<F>(
    listener: TcpListener,
    plugin: Arc<CredentialComposerPlugin>,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()>,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Credential composer gRPC server listening");
    }

    Server::builder()
        .add_service(CredentialComposerServer::new(CredentialComposerService::new(
            Arc::clone(&plugin),
        )))
        .add_service(ConfigServer::new(ConfigService::new(plugin)))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
