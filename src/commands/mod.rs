//! Command implementations for morio.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command resolves the configuration root first.

mod agent;
mod init;
mod modules;
mod services;
mod template;
mod vars;

use crate::agents::service::{ServiceAction, SystemServiceManager};
use crate::agents::Agent;
use crate::cli::Command;
use crate::context::ClientContext;
use crate::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. `root` is the
/// `--root` option, if given.
pub fn dispatch(command: Command, root: Option<&Path>) -> Result<()> {
    let ctx = ClientContext::resolve(root)?;
    let services = SystemServiceManager::current();

    match command {
        Command::Init => init::cmd_init(&ctx, &services),
        Command::Vars(vars_cmd) => vars::dispatch_vars(&ctx, vars_cmd.action),
        Command::Template => template::cmd_template(&ctx),
        Command::Modules(modules_cmd) => modules::dispatch_modules(&ctx, modules_cmd.action),
        Command::Start(args) => services::cmd_service(&services, &args.agents(), ServiceAction::Start),
        Command::Stop(args) => services::cmd_service(&services, &args.agents(), ServiceAction::Stop),
        Command::Restart(args) => {
            services::cmd_service(&services, &args.agents(), ServiceAction::Restart)
        }
        Command::Status(args) => services::cmd_status(&services, &args.agents()),
        Command::Audit(args) => agent::cmd_agent(&ctx, Agent::Audit, &args.args),
        Command::Logs(args) => agent::cmd_agent(&ctx, Agent::Logs, &args.args),
        Command::Metrics(args) => agent::cmd_agent(&ctx, Agent::Metrics, &args.args),
    }
}
