//! Agent service control through the native service manager.
//!
//! Linux uses `systemctl`, macOS `launchctl`, Windows `sc`. Commands block
//! until the service manager returns; there is no timeout.

use super::Agent;
use crate::error::{MorioError, Result};
use std::fmt;
use std::process::{Command, Output};
use tracing::debug;

/// A change of service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control over the services that run the agents.
pub trait ServiceManager {
    /// Start, stop or restart the service of `agent`.
    fn change_state(&self, agent: Agent, action: ServiceAction) -> Result<()>;

    /// Whether the service of `agent` is running. A failing status query
    /// counts as not running.
    fn is_active(&self, agent: Agent) -> Result<bool>;
}

/// Which native service manager to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Systemd,
    Launchd,
    WindowsSc,
    Unsupported,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Systemd
        } else if cfg!(target_os = "macos") {
            Platform::Launchd
        } else if cfg!(target_os = "windows") {
            Platform::WindowsSc
        } else {
            Platform::Unsupported
        }
    }

    /// Command invocations implementing `action`, run in order.
    pub fn action_commands(self, service: &str, action: ServiceAction) -> Result<Vec<Vec<String>>> {
        let cmd = |args: &[&str]| args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        match self {
            Platform::Systemd => Ok(vec![cmd(&["systemctl", action.as_str(), service])]),
            Platform::Launchd => Ok(match action {
                ServiceAction::Start => vec![cmd(&["launchctl", "load", service])],
                ServiceAction::Stop => vec![cmd(&["launchctl", "unload", service])],
                ServiceAction::Restart => vec![
                    cmd(&["launchctl", "unload", service]),
                    cmd(&["launchctl", "load", service]),
                ],
            }),
            Platform::WindowsSc => Ok(match action {
                ServiceAction::Start => vec![cmd(&["sc", "start", service])],
                ServiceAction::Stop => vec![cmd(&["sc", "stop", service])],
                ServiceAction::Restart => vec![
                    cmd(&["sc", "stop", service]),
                    cmd(&["sc", "start", service]),
                ],
            }),
            Platform::Unsupported => Err(unsupported()),
        }
    }

    /// Command invocation querying whether `service` runs.
    pub fn status_command(self, service: &str) -> Result<Vec<String>> {
        let args: &[&str] = match self {
            Platform::Systemd => &["systemctl", "is-active", service],
            Platform::Launchd => &["launchctl", "list"],
            Platform::WindowsSc => &["sc", "query", service],
            Platform::Unsupported => return Err(unsupported()),
        };
        Ok(args.iter().map(|a| a.to_string()).collect())
    }

    /// Interpret the output of a successful status query.
    pub fn is_running(self, service: &str, stdout: &str) -> bool {
        match self {
            Platform::Systemd => stdout.lines().any(|line| line.trim() == "active"),
            Platform::Launchd => stdout.contains(service),
            Platform::WindowsSc => stdout.contains("RUNNING"),
            Platform::Unsupported => false,
        }
    }
}

fn unsupported() -> MorioError {
    MorioError::ServiceError(format!(
        "unsupported platform '{}'",
        std::env::consts::OS
    ))
}

/// [`ServiceManager`] backed by the platform's service manager binary.
#[derive(Debug, Clone, Copy)]
pub struct SystemServiceManager {
    platform: Platform,
}

impl SystemServiceManager {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn current() -> Self {
        Self::new(Platform::current())
    }
}

fn run(args: &[String]) -> Result<Output> {
    let (program, rest) = args
        .split_first()
        .ok_or_else(|| MorioError::ServiceError("empty service command".to_string()))?;
    debug!(command = %args.join(" "), "running service command");
    Command::new(program).args(rest).output().map_err(|e| {
        MorioError::ServiceError(format!("failed to execute {}: {}", program, e))
    })
}

impl ServiceManager for SystemServiceManager {
    fn change_state(&self, agent: Agent, action: ServiceAction) -> Result<()> {
        let service = agent.service_name();
        for args in self.platform.action_commands(&service, action)? {
            let output = run(&args)?;
            if !output.status.success() {
                return Err(MorioError::ServiceError(format!(
                    "`{}` failed ({}): {}",
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
        }
        Ok(())
    }

    fn is_active(&self, agent: Agent) -> Result<bool> {
        let service = agent.service_name();
        let args = self.platform.status_command(&service)?;
        let output = match run(&args) {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "status query failed, assuming stopped");
                return Ok(false);
            }
        };
        if !output.status.success() {
            return Ok(false);
        }
        Ok(self
            .platform
            .is_running(&service, &String::from_utf8_lossy(&output.stdout)))
    }
}

/// One status line: a `!` marker for stopped agents, then name and state.
pub fn status_line(agent: Agent, running: bool) -> String {
    let (marker, status) = if running {
        (" ", "running")
    } else {
        ("!", "stopped")
    };
    format!("{} {:<8} {:<14}", marker, agent.as_str(), status)
        .trim_end()
        .to_string()
}
