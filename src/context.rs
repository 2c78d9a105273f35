//! Configuration-tree context resolution for morio.
//!
//! Every morio command works against one configuration root (by default
//! `/etc/morio`). This module resolves the root from the command line or the
//! environment and derives every path the core needs from it, so that no
//! other module hardcodes a location.

use crate::agents::Agent;
use crate::error::{MorioError, Result};
use crate::modules::ModuleArea;
use std::env;
use std::path::{Path, PathBuf};

/// Default configuration root.
pub const DEFAULT_CONFIG_ROOT: &str = "/etc/morio";

/// Environment variable overriding the configuration root.
pub const CONFIG_ROOT_ENV: &str = "MORIO_CONFIG_ROOT";

/// Extension of template sources and enabled module templates.
pub const TEMPLATE_EXTENSION: &str = "yaml";

/// Extension of rendered configuration files.
pub const OUTPUT_EXTENSION: &str = "yml";

/// Resolved paths for one morio configuration tree. All paths are absolute
/// when the root is.
#[derive(Debug, Clone)]
pub struct ClientContext {
    /// The configuration root (default: `/etc/morio`).
    pub root: PathBuf,

    /// Custom variable tier (`{root}/vars/custom`).
    pub custom_vars_dir: PathBuf,

    /// Default variable tier (`{root}/vars/defaults`).
    pub default_vars_dir: PathBuf,
}

impl ClientContext {
    /// Resolve the context from an explicit root, falling back to
    /// `MORIO_CONFIG_ROOT` and then to [`DEFAULT_CONFIG_ROOT`].
    pub fn resolve(explicit_root: Option<&Path>) -> Result<Self> {
        let root = match explicit_root {
            Some(root) => root.to_path_buf(),
            None => match env::var_os(CONFIG_ROOT_ENV) {
                Some(root) if !root.is_empty() => PathBuf::from(root),
                _ => PathBuf::from(DEFAULT_CONFIG_ROOT),
            },
        };

        if root.exists() && !root.is_dir() {
            return Err(MorioError::UserError(format!(
                "configuration root '{}' is not a directory",
                root.display()
            )));
        }

        Ok(Self::from_root(root))
    }

    /// Build a context rooted at `root` without touching the environment.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let vars_dir = root.join("vars");
        Self {
            custom_vars_dir: vars_dir.join("custom"),
            default_vars_dir: vars_dir.join("defaults"),
            root,
        }
    }

    /// Application config file (`{root}/morio.yaml`).
    pub fn config_path(&self) -> PathBuf {
        self.root.join("morio.yaml")
    }

    /// Shared layout template wrapping every rendered file.
    pub fn layout_path(&self) -> PathBuf {
        self.root.join("layout.yaml")
    }

    /// Global variable catalog used for documentation display.
    pub fn global_vars_path(&self) -> PathBuf {
        self.root.join("global-vars.yaml")
    }

    /// Directory holding everything for one agent (`{root}/{agent}`).
    pub fn agent_dir(&self, agent: Agent) -> PathBuf {
        self.root.join(agent.as_str())
    }

    /// Main configuration template for an agent.
    pub fn config_template_path(&self, agent: Agent) -> PathBuf {
        self.agent_dir(agent)
            .join(format!("config-template.{}", TEMPLATE_EXTENSION))
    }

    /// Rendered main configuration passed to the collector with `-c`.
    pub fn rendered_config_path(&self, agent: Agent) -> PathBuf {
        self.agent_dir(agent)
            .join(format!("config.{}", OUTPUT_EXTENSION))
    }

    /// Template directory of a module area.
    pub fn area_dir(&self, area: ModuleArea) -> PathBuf {
        self.agent_dir(area.agent()).join(area.template_folder())
    }

    /// Rendered output directory of a module area.
    pub fn area_output_dir(&self, area: ModuleArea) -> PathBuf {
        self.agent_dir(area.agent()).join(area.output_folder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn from_root_derives_var_tiers() {
        let ctx = ClientContext::from_root("/etc/morio");
        assert_eq!(ctx.custom_vars_dir, Path::new("/etc/morio/vars/custom"));
        assert_eq!(ctx.default_vars_dir, Path::new("/etc/morio/vars/defaults"));
    }

    #[test]
    fn agent_paths_follow_layout() {
        let ctx = ClientContext::from_root("/etc/morio");
        assert_eq!(
            ctx.config_template_path(Agent::Audit),
            Path::new("/etc/morio/audit/config-template.yaml")
        );
        assert_eq!(
            ctx.rendered_config_path(Agent::Metrics),
            Path::new("/etc/morio/metrics/config.yml")
        );
        assert_eq!(ctx.layout_path(), Path::new("/etc/morio/layout.yaml"));
        assert_eq!(
            ctx.global_vars_path(),
            Path::new("/etc/morio/global-vars.yaml")
        );
    }

    #[test]
    fn area_paths_follow_layout() {
        let ctx = ClientContext::from_root("/etc/morio");
        assert_eq!(
            ctx.area_dir(ModuleArea::LogsInputs),
            Path::new("/etc/morio/logs/input-templates.d")
        );
        assert_eq!(
            ctx.area_output_dir(ModuleArea::LogsInputs),
            Path::new("/etc/morio/logs/inputs.d")
        );
        assert_eq!(
            ctx.area_output_dir(ModuleArea::MetricsModules),
            Path::new("/etc/morio/metrics/modules.d")
        );
    }

    #[test]
    fn explicit_root_wins() {
        let temp = TempDir::new().unwrap();
        let ctx = ClientContext::resolve(Some(temp.path())).unwrap();
        assert_eq!(ctx.root, temp.path());
    }

    #[test]
    #[serial]
    fn env_root_is_used_without_explicit_root() {
        let temp = TempDir::new().unwrap();
        // SAFETY: serialized with other environment-mutating tests.
        unsafe { env::set_var(CONFIG_ROOT_ENV, temp.path()) };
        let ctx = ClientContext::resolve(None);
        unsafe { env::remove_var(CONFIG_ROOT_ENV) };

        assert_eq!(ctx.unwrap().root, temp.path());
    }

    #[test]
    #[serial]
    fn default_root_without_env() {
        unsafe { env::remove_var(CONFIG_ROOT_ENV) };
        let ctx = ClientContext::resolve(None).unwrap();
        assert_eq!(ctx.root, Path::new(DEFAULT_CONFIG_ROOT));
    }

    #[test]
    fn file_as_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();

        let err = ClientContext::resolve(Some(&file)).unwrap_err();
        assert!(matches!(err, MorioError::UserError(_)));
    }
}
