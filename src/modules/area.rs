//! Module areas: the template folders that hold modules for each agent.

use crate::agents::Agent;
use std::fmt;

/// Every module area, in display order.
pub const AREAS: &[ModuleArea] = &[
    ModuleArea::AuditModules,
    ModuleArea::LogsModules,
    ModuleArea::LogsInputs,
    ModuleArea::MetricsModules,
];

/// A folder of module templates belonging to one agent.
///
/// Logs has two areas, modules and inputs, which share module names: a
/// module called `nginx` may have a template in either or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleArea {
    AuditModules,
    LogsModules,
    LogsInputs,
    MetricsModules,
}

impl ModuleArea {
    /// Agent the area belongs to.
    pub fn agent(self) -> Agent {
        match self {
            ModuleArea::AuditModules => Agent::Audit,
            ModuleArea::LogsModules | ModuleArea::LogsInputs => Agent::Logs,
            ModuleArea::MetricsModules => Agent::Metrics,
        }
    }

    /// Template folder, relative to the agent directory.
    pub fn template_folder(self) -> &'static str {
        match self {
            ModuleArea::LogsInputs => "input-templates.d",
            _ => "module-templates.d",
        }
    }

    /// Rendered output folder, relative to the agent directory.
    pub fn output_folder(self) -> &'static str {
        match self {
            ModuleArea::LogsInputs => "inputs.d",
            _ => "modules.d",
        }
    }

    /// Areas belonging to `agent`.
    pub fn for_agent(agent: Agent) -> impl Iterator<Item = ModuleArea> {
        AREAS.iter().copied().filter(move |area| area.agent() == agent)
    }
}

impl fmt::Display for ModuleArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.agent(), self.template_folder())
    }
}
