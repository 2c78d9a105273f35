//! AppConfig struct definition and default implementation.

use super::types::AgentPaths;
use serde::{Deserialize, Serialize};

/// Configuration for the morio client.
///
/// This struct represents the contents of `<root>/morio.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collector binaries run by `morio audit|logs|metrics`.
    pub agents: AgentPaths,
}
