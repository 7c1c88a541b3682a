//! Structured logging infrastructure for Claimsmith.
//!
//! Request handlers never touch a global subscriber directly; they log through
//! the [`Logger`] capability handed to them at construction. The process
//! entrypoint installs a `tracing` subscriber with [`init`] or [`init_json`].

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging capability supplied by the hosting environment.
///
/// Each entry the composer emits has its own method so that its fields stay
/// individually queryable. Implementations must not block and must not fail.
pub trait Logger: Send + Sync {
    /// A workload identity was parsed for a compose request.
    fn workload_retrieved(&self, spiffe_id: &str, trust_domain: &str, workload: &str);

    /// A new configuration was installed.
    fn configured(&self);
}

/// Logger that forwards entries to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn workload_retrieved(&self, spiffe_id: &str, trust_domain: &str, workload: &str) {
        tracing::info!(
            spiffe_id,
            trust_domain,
            workload,
            "Retrieved workload information"
        );
    }

    fn configured(&self) {
        tracing::debug!("Credential composer configured");
    }
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn workload_retrieved(&self, _spiffe_id: &str, _trust_domain: &str, _workload: &str) {}

    fn configured(&self) {}
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system with human-readable output.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level. Output goes to stderr so stdout
/// stays free for the host handshake line.
///
/// # Example
/// ```no_run
/// use claimsmith_core::logging;
///
/// logging::init();
/// tracing::info!("Plugin started");
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize the logging system with JSON output for log aggregation.
///
/// # Example
/// ```no_run
/// use claimsmith_core::logging;
///
/// logging::init_json();
/// tracing::info!(plugin = "claimsmith", "Plugin started");
/// ```
pub fn init_json() {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
