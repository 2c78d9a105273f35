//! Configuration types and defaults for morio.

use crate::agents::Agent;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths of the collector binaries, keyed by data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPaths {
    #[serde(default = "default_audit_binary")]
    pub audit: PathBuf,

    #[serde(default = "default_logs_binary")]
    pub logs: PathBuf,

    #[serde(default = "default_metrics_binary")]
    pub metrics: PathBuf,
}

impl AgentPaths {
    /// Binary configured for `agent`.
    pub fn binary(&self, agent: Agent) -> &PathBuf {
        match agent {
            Agent::Audit => &self.audit,
            Agent::Logs => &self.logs,
            Agent::Metrics => &self.metrics,
        }
    }
}

impl Default for AgentPaths {
    fn default() -> Self {
        Self {
            audit: default_audit_binary(),
            logs: default_logs_binary(),
            metrics: default_metrics_binary(),
        }
    }
}

/// Where a beat's package installs its binary.
pub fn default_binary(agent: Agent) -> PathBuf {
    let beat = agent.beat_name();
    PathBuf::from(format!("/usr/share/{beat}/bin/{beat}"))
}

pub fn default_audit_binary() -> PathBuf {
    default_binary(Agent::Audit)
}

pub fn default_logs_binary() -> PathBuf {
    default_binary(Agent::Logs)
}

pub fn default_metrics_binary() -> PathBuf {
    default_binary(Agent::Metrics)
}
