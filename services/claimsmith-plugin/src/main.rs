use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use claimsmith_composer::grpc_server::serve;
use claimsmith_composer::{CredentialComposerPlugin, NoHostServices};
use claimsmith_core::{logging, TracingLogger};
use serde::Serialize;
use tokio::net::TcpListener;

mod config;

use config::{Config, LogFormat};

const PLUGIN_PROTOCOL_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct PluginHandshake {
    version: &'static str,
    protocol_version: u32,
    network: &'static str,
    /// Bound listener address; absent until the plugin is serving.
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl PluginHandshake {
    fn new(address: Option<SocketAddr>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            protocol_version: PLUGIN_PROTOCOL_VERSION,
            network: "tcp",
            address: address.map(|addr| addr.to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Nothing is bound in this mode, so no address is reported.
    if args.iter().any(|arg| arg == "--handshake-json") {
        println!("{}", serde_json::to_string(&PluginHandshake::new(None))?);
        return Ok(());
    }

    let config = Config::from_env()?;

    match config.log_format {
        LogFormat::Text => logging::init(),
        LogFormat::Json => logging::init_json(),
    }

    let plugin = Arc::new(CredentialComposerPlugin::new(Arc::new(TracingLogger)));
    plugin.broker_host_services(&NoHostServices)?;

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    let local_addr = listener.local_addr()?;

    // The host reads this line from stdout to find the plugin.
    println!("{}", serde_json::to_string(&PluginHandshake::new(Some(local_addr)))?);
    tracing::info!(address = %local_addr, "Credential composer plugin started");

    serve(listener, plugin, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    tracing::info!("Credential composer plugin stopped");
    Ok(())
}
