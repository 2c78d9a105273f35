//! Implementation of `morio start|stop|restart|status`.

use crate::agents::Agent;
use crate::agents::service::{ServiceAction, ServiceManager, status_line};
use crate::error::Result;

/// Execute `morio start|stop|restart`, then show the status of every agent.
pub fn cmd_service(
    services: &dyn ServiceManager,
    agents: &[Agent],
    action: ServiceAction,
) -> Result<()> {
    let report = apply_action(services, agents, action)?;

    println!();
    println!("Agent status:");
    for line in report {
        println!("{}", line);
    }
    Ok(())
}

/// Apply `action` to the service of every agent in `agents`, in order,
/// and return the status report of all agents afterwards.
///
/// Stops at the first failure.
pub fn apply_action(
    services: &dyn ServiceManager,
    agents: &[Agent],
    action: ServiceAction,
) -> Result<Vec<String>> {
    for agent in agents {
        services.change_state(*agent, action)?;
        println!("{} {}", past_tense(action), agent.service_name());
    }
    status_report(services, Agent::ALL)
}

/// Execute `morio status`.
pub fn cmd_status(services: &dyn ServiceManager, agents: &[Agent]) -> Result<()> {
    for line in status_report(services, agents)? {
        println!("{}", line);
    }
    Ok(())
}

/// One status line per agent.
pub fn status_report(services: &dyn ServiceManager, agents: &[Agent]) -> Result<Vec<String>> {
    agents
        .iter()
        .map(|agent| Ok(status_line(*agent, services.is_active(*agent)?)))
        .collect()
}

fn past_tense(action: ServiceAction) -> &'static str {
    match action {
        ServiceAction::Start => "Started",
        ServiceAction::Stop => "Stopped",
        ServiceAction::Restart => "Restarted",
    }
}
