//! The observability agents morio wraps.
//!
//! Each agent is an Elastic beat collecting one type of data:
//!
//! | agent     | beat       | service         |
//! |-----------|------------|-----------------|
//! | `audit`   | auditbeat  | `morio-audit`   |
//! | `logs`    | filebeat   | `morio-logs`    |
//! | `metrics` | metricbeat | `morio-metrics` |

pub mod exec;
pub mod service;

use clap::ValueEnum;
use std::fmt;

/// An agent wrapped by morio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Agent {
    Audit,
    Logs,
    Metrics,
}

impl Agent {
    /// All agents, in display order.
    pub const ALL: &'static [Agent] = &[Agent::Audit, Agent::Logs, Agent::Metrics];

    /// Data type name, also used as directory and topic name.
    pub fn as_str(self) -> &'static str {
        match self {
            Agent::Audit => "audit",
            Agent::Logs => "logs",
            Agent::Metrics => "metrics",
        }
    }

    /// Name of the beat binary.
    pub fn beat_name(self) -> &'static str {
        match self {
            Agent::Audit => "auditbeat",
            Agent::Logs => "filebeat",
            Agent::Metrics => "metricbeat",
        }
    }

    /// Name of the OS service running this agent.
    pub fn service_name(self) -> String {
        format!("morio-{}", self.as_str())
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
