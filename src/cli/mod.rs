//! CLI argument parsing for morio.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::agents::Agent;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Morio client: configure and run the audit, logs and metrics agents.
///
/// Collector configuration is generated from templates:
/// - Variables live as one file per name in a custom and a default tier
/// - Templates render into the configuration files the collectors read
/// - Modules are enabled or disabled by renaming their templates
#[derive(Parser, Debug)]
#[command(name = "morio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration root (default: $MORIO_CONFIG_ROOT or /etc/morio).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for morio.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize this client.
    ///
    /// Generates the client UUID if there is none, then shows agent status.
    Init,

    /// Manage template variables.
    Vars(VarsCommand),

    /// Render every agent configuration from its templates.
    ///
    /// Writes each agent's config.yml and the enabled module and input
    /// templates, then records defaults declared by the templates.
    Template,

    /// Manage agent modules.
    Modules(ModulesCommand),

    /// Start agent services.
    Start(ServiceArgs),

    /// Stop agent services.
    Stop(ServiceArgs),

    /// Restart agent services.
    Restart(ServiceArgs),

    /// Show whether agent services are running.
    Status(ServiceArgs),

    /// Run auditbeat against the morio audit configuration.
    Audit(PassthroughArgs),

    /// Run filebeat against the morio logs configuration.
    Logs(PassthroughArgs),

    /// Run metricbeat against the morio metrics configuration.
    Metrics(PassthroughArgs),
}

/// Variable subcommands.
#[derive(Parser, Debug)]
pub struct VarsCommand {
    #[command(subcommand)]
    pub action: VarsAction,
}

/// Available variable actions.
#[derive(Subcommand, Debug)]
pub enum VarsAction {
    /// List variables and their values.
    List(VarsListArgs),

    /// Print the effective value of a variable.
    Get(VarNameArgs),

    /// Set a custom value.
    Set(VarSetArgs),

    /// Set a default value.
    SetDefault(VarSetArgs),

    /// Remove a custom value, falling back to the default.
    Rm(VarNameArgs),

    /// Set a boolean variable to true.
    Enable(VarNameArgs),

    /// Set a boolean variable to false.
    Disable(VarNameArgs),

    /// Set a custom value to the empty string.
    Clear(VarNameArgs),

    /// Remove every custom value.
    Wipe,

    /// Print all effective values as one document.
    Export(VarsExportArgs),

    /// Load custom values from a YAML mapping.
    Import(VarsImportArgs),
}

/// Which tier `vars list` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Custom,
    Default,
    Effective,
}

/// Output format of `vars export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Json,
}

/// Arguments for `vars list`.
#[derive(Parser, Debug)]
pub struct VarsListArgs {
    /// Tier to list.
    #[arg(long, value_enum, default_value_t = TierArg::Effective)]
    pub tier: TierArg,
}

/// A single variable name.
#[derive(Parser, Debug)]
pub struct VarNameArgs {
    /// Variable name.
    pub name: String,
}

/// A variable name and value.
#[derive(Parser, Debug)]
pub struct VarSetArgs {
    /// Variable name.
    pub name: String,

    /// Value, stored as-is.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for `vars export`.
#[derive(Parser, Debug)]
pub struct VarsExportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Yaml)]
    pub format: ExportFormat,
}

/// Arguments for `vars import`.
#[derive(Parser, Debug)]
pub struct VarsImportArgs {
    /// YAML file holding a mapping of names to values.
    pub file: PathBuf,
}

/// Module subcommands.
#[derive(Parser, Debug)]
pub struct ModulesCommand {
    #[command(subcommand)]
    pub action: ModulesAction,
}

/// Available module actions.
#[derive(Subcommand, Debug)]
pub enum ModulesAction {
    /// List enabled and disabled modules per agent.
    List,

    /// Enable a module in every area that has it.
    Enable(ModuleNameArgs),

    /// Disable a module in every area that has it.
    Disable(ModuleNameArgs),

    /// Show a module's documentation and variables.
    Info(ModuleNameArgs),
}

/// A single module name.
#[derive(Parser, Debug)]
pub struct ModuleNameArgs {
    /// Module name (template file name without extension).
    pub name: String,
}

/// Arguments for service commands.
#[derive(Parser, Debug)]
pub struct ServiceArgs {
    /// Agent to act on (default: all agents).
    #[arg(value_enum)]
    pub agent: Option<Agent>,
}

impl ServiceArgs {
    /// The selected agents.
    pub fn agents(&self) -> Vec<Agent> {
        match self.agent {
            Some(agent) => vec![agent],
            None => Agent::ALL.to_vec(),
        }
    }
}

/// Arguments handed unchanged to a collector binary.
#[derive(Parser, Debug)]
pub struct PassthroughArgs {
    /// Arguments for the collector.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["morio", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init));
        assert!(cli.root.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["morio", "template", "--root", "/tmp/m", "-vv"]).unwrap();
        assert!(matches!(cli.command, Command::Template));
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/m")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_vars_set() {
        let cli = Cli::try_parse_from(["morio", "vars", "set", "MORIO_SERVER", "m.example.com"])
            .unwrap();
        if let Command::Vars(vars) = cli.command {
            if let VarsAction::Set(args) = vars.action {
                assert_eq!(args.name, "MORIO_SERVER");
                assert_eq!(args.value, "m.example.com");
            } else {
                panic!("Expected Set action");
            }
        } else {
            panic!("Expected Vars command");
        }
    }

    #[test]
    fn parse_vars_set_hyphen_value() {
        let cli = Cli::try_parse_from(["morio", "vars", "set", "OFFSET", "-5"]).unwrap();
        if let Command::Vars(vars) = cli.command {
            if let VarsAction::Set(args) = vars.action {
                assert_eq!(args.value, "-5");
            } else {
                panic!("Expected Set action");
            }
        } else {
            panic!("Expected Vars command");
        }
    }

    #[test]
    fn parse_vars_set_default() {
        let cli = Cli::try_parse_from(["morio", "vars", "set-default", "X", "1"]).unwrap();
        if let Command::Vars(vars) = cli.command {
            assert!(matches!(vars.action, VarsAction::SetDefault(_)));
        } else {
            panic!("Expected Vars command");
        }
    }

    #[test]
    fn parse_vars_list_tier() {
        let cli = Cli::try_parse_from(["morio", "vars", "list", "--tier", "custom"]).unwrap();
        if let Command::Vars(vars) = cli.command {
            if let VarsAction::List(args) = vars.action {
                assert_eq!(args.tier, TierArg::Custom);
            } else {
                panic!("Expected List action");
            }
        } else {
            panic!("Expected Vars command");
        }
    }

    #[test]
    fn parse_vars_export_defaults_to_yaml() {
        let cli = Cli::try_parse_from(["morio", "vars", "export"]).unwrap();
        if let Command::Vars(vars) = cli.command {
            if let VarsAction::Export(args) = vars.action {
                assert_eq!(args.format, ExportFormat::Yaml);
            } else {
                panic!("Expected Export action");
            }
        } else {
            panic!("Expected Vars command");
        }
    }

    #[test]
    fn parse_modules_enable() {
        let cli = Cli::try_parse_from(["morio", "modules", "enable", "nginx"]).unwrap();
        if let Command::Modules(modules) = cli.command {
            if let ModulesAction::Enable(args) = modules.action {
                assert_eq!(args.name, "nginx");
            } else {
                panic!("Expected Enable action");
            }
        } else {
            panic!("Expected Modules command");
        }
    }

    #[test]
    fn parse_service_commands() {
        let cli = Cli::try_parse_from(["morio", "restart", "logs"]).unwrap();
        if let Command::Restart(args) = cli.command {
            assert_eq!(args.agents(), vec![Agent::Logs]);
        } else {
            panic!("Expected Restart command");
        }

        let cli = Cli::try_parse_from(["morio", "status"]).unwrap();
        if let Command::Status(args) = cli.command {
            assert_eq!(args.agents(), Agent::ALL.to_vec());
        } else {
            panic!("Expected Status command");
        }
    }

    #[test]
    fn parse_unknown_agent_fails() {
        assert!(Cli::try_parse_from(["morio", "start", "traces"]).is_err());
    }

    #[test]
    fn parse_passthrough_keeps_flags() {
        let cli =
            Cli::try_parse_from(["morio", "logs", "test", "config", "-e", "--strict.perms=false"])
                .unwrap();
        if let Command::Logs(args) = cli.command {
            assert_eq!(args.args, vec!["test", "config", "-e", "--strict.perms=false"]);
        } else {
            panic!("Expected Logs command");
        }
    }
}
