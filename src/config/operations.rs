//! AppConfig loading and validation.

use super::model::AppConfig;
use crate::agents::Agent;
use crate::error::{MorioError, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

impl AppConfig {
    /// Load config from a YAML file.
    ///
    /// A missing file yields the default configuration. Read, parse and
    /// validation failures are `UserError`s.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(MorioError::UserError(format!(
                    "failed to read config file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string. An empty document is the default.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = serde_yaml::from_str(yaml)
            .map_err(|e| MorioError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Every agent binary path must be non-empty.
    pub fn validate(&self) -> Result<()> {
        for agent in Agent::ALL {
            if self.agents.binary(*agent).as_os_str().is_empty() {
                return Err(MorioError::UserError(format!(
                    "config validation failed: agents.{} must not be empty",
                    agent
                )));
            }
        }
        Ok(())
    }

    /// Path of the binary for `agent`.
    pub fn agent_binary(&self, agent: Agent) -> &Path {
        self.agents.binary(agent)
    }
}
