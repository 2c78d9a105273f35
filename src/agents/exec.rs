//! Running a collector binary against its morio configuration.

use super::Agent;
use crate::error::{MorioError, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Arguments passed to a beat: the morio config first, then the user's.
///
/// The config path is passed as an OS string so non-UTF-8 roots survive.
pub fn agent_args(config: &Path, args: &[String]) -> Vec<OsString> {
    let mut all = vec![OsString::from("-c"), config.as_os_str().to_os_string()];
    all.extend(args.iter().map(OsString::from));
    all
}

/// Run `binary` for `agent` with inherited standard streams and wait for it.
///
/// Fails with `AgentError` when the binary cannot be started or exits
/// unsuccessfully.
pub fn run_agent(agent: Agent, binary: &Path, config: &Path, args: &[String]) -> Result<()> {
    let args = agent_args(config, args);
    debug!(%agent, binary = %binary.display(), args = ?args, "running agent");

    let status = Command::new(binary).args(&args).status().map_err(|e| {
        MorioError::AgentError(format!(
            "failed to run {} at '{}': {}\n\
             Set `agents.{}` in morio.yaml to the path of the {} binary.",
            agent.beat_name(),
            binary.display(),
            e,
            agent,
            agent.beat_name()
        ))
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(MorioError::AgentError(format!(
            "{} exited with {}",
            agent.beat_name(),
            status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_comes_first() {
        let args = agent_args(
            Path::new("/etc/morio/logs/config.yml"),
            &["test".to_string(), "config".to_string()],
        );
        let expected: Vec<OsString> = ["-c", "/etc/morio/logs/config.yml", "test", "config"]
            .into_iter()
            .map(OsString::from)
            .collect();
        assert_eq!(args, expected);
    }

    #[cfg(unix)]
    #[test]
    fn config_path_bytes_are_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let config = Path::new(OsStr::from_bytes(b"/srv/m\xf8rio/logs/config.yml"));
        let args = agent_args(config, &[]);

        assert_eq!(args[1].as_bytes(), b"/srv/m\xf8rio/logs/config.yml");
    }

    #[test]
    fn missing_binary_is_agent_error() {
        let err = run_agent(
            Agent::Audit,
            Path::new("/nonexistent/auditbeat"),
            Path::new("/etc/morio/audit/config.yml"),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, MorioError::AgentError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_agent_error() {
        let err = run_agent(
            Agent::Logs,
            Path::new("false"),
            Path::new("/etc/morio/logs/config.yml"),
            &[],
        )
        .unwrap_err();
        assert!(err.to_string().contains("filebeat exited"));
    }
}
