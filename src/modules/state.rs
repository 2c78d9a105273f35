//! Module activation state encoded in file names.
//!
//! An enabled module template is `NAME.yaml`; a disabled one is
//! `NAME.yaml.disabled`. Both map to the same logical module `NAME`.

use crate::context::TEMPLATE_EXTENSION;
use crate::error::{MorioError, Result};
use std::fmt;

/// Suffix appended to a module template to disable it.
pub const DISABLED_MARKER: &str = "disabled";

/// Activation state of a module template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleState {
    /// File carries the canonical extension.
    Enabled,
    /// File carries the canonical extension plus the disabled marker.
    Disabled,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleState::Enabled => write!(f, "enabled"),
            ModuleState::Disabled => write!(f, "disabled"),
        }
    }
}

/// Classify a file name as a module template.
///
/// Returns `None` for files that are not module templates: other
/// extensions, hidden files, and names that would be ambiguous because the
/// logical name itself ends in the canonical extension.
pub fn classify(file_name: &str) -> Option<(String, ModuleState)> {
    if file_name.starts_with('.') {
        return None;
    }

    let enabled_suffix = format!(".{}", TEMPLATE_EXTENSION);
    let disabled_suffix = format!(".{}.{}", TEMPLATE_EXTENSION, DISABLED_MARKER);

    let (name, state) = if let Some(name) = file_name.strip_suffix(&disabled_suffix) {
        (name, ModuleState::Disabled)
    } else if let Some(name) = file_name.strip_suffix(&enabled_suffix) {
        (name, ModuleState::Enabled)
    } else {
        return None;
    };

    if name.is_empty() || name.ends_with(&enabled_suffix) {
        return None;
    }

    Some((name.to_string(), state))
}

/// File name of module `name` in the given state.
pub fn file_name(name: &str, state: ModuleState) -> String {
    match state {
        ModuleState::Enabled => format!("{}.{}", name, TEMPLATE_EXTENSION),
        ModuleState::Disabled => format!("{}.{}.{}", name, TEMPLATE_EXTENSION, DISABLED_MARKER),
    }
}

/// Logical module name of a template file, regardless of its state.
pub fn module_name(file_name: &str) -> Option<String> {
    classify(file_name).map(|(name, _)| name)
}

/// Reject module names that cannot round-trip through a file name.
pub fn validate_module_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && classify(&file_name(name, ModuleState::Enabled)).is_some();

    if valid {
        Ok(())
    } else {
        Err(MorioError::UserError(format!("invalid module name '{}'", name)))
    }
}
