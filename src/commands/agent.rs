//! Implementation of `morio audit|logs|metrics [ARGS...]`.
//!
//! Runs the collector binary against the configuration `morio template`
//! produced, so collector subcommands such as `test config` or `modules
//! list` see exactly what the service will run with.

use crate::agents::Agent;
use crate::agents::exec::run_agent;
use crate::config::AppConfig;
use crate::context::ClientContext;
use crate::error::{MorioError, Result};

/// Execute a collector passthrough command.
pub fn cmd_agent(ctx: &ClientContext, agent: Agent, args: &[String]) -> Result<()> {
    let config = AppConfig::load(ctx.config_path())?;
    let rendered = ctx.rendered_config_path(agent);

    if !rendered.is_file() {
        return Err(MorioError::UserError(format!(
            "no {} configuration at '{}'\n\
             Run `morio template` first.",
            agent,
            rendered.display()
        )));
    }

    run_agent(agent, config.agent_binary(agent), &rendered, args)
}
