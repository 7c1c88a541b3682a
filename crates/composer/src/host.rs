//! Capabilities offered by the hosting runtime at startup.

use claimsmith_core::{ComposerError, ComposerResult};

/// Registry of services the host can hand to a plugin.
pub trait ServiceBroker {
    /// Request a client for the named host service. Returns whether the host
    /// supplied it.
    fn broker_client(&self, service_name: &str) -> bool;
}

/// Broker for hosts that expose no services, such as a standalone process.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHostServices;

impl ServiceBroker for NoHostServices {
    fn broker_client(&self, _service_name: &str) -> bool {
        false
    }
}

/// Request every service in `required`, failing on the first one the host
/// does not supply.
pub fn broker_required(broker: &dyn ServiceBroker, required: &[&str]) -> ComposerResult<()> {
    for service in required {
        if !broker.broker_client(service) {
            return Err(ComposerError::Internal(format!(
                "host service {} is required but was not supplied",
                service
            )));
        }
    }
    Ok(())
}
