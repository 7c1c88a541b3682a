//! Plugin configuration supplied by the operator.

use crate::error::{ComposerError, ComposerResult};
use serde::{Deserialize, Serialize};

/// Operator configuration for the credential composer.
///
/// Carries no fields yet. Keys the plugin does not recognise are ignored, so
/// operators can stage settings ahead of the release that reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {}

impl Configuration {
    /// Decode the raw declarative configuration passed by the host.
    pub fn decode(raw: &str) -> ComposerResult<Self> {
        toml::from_str(raw).map_err(|e| {
            ComposerError::InvalidConfiguration(format!("failed to decode configuration: {}", e))
        })
    }
}
