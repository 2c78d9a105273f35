//! Flat-file variable store with custom-over-default precedence.

use super::value::{format_flag, parse_flag};
use crate::context::ClientContext;
use crate::error::{MorioError, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Variable names double as file names, so they must be filesystem-safe.
static VAR_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("Invalid var name regex"));

/// Storage tier of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarTier {
    /// Set explicitly by the user.
    Custom,
    /// Harvested from templates or seeded by morio itself.
    Default,
}

impl fmt::Display for VarTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarTier::Custom => write!(f, "custom"),
            VarTier::Default => write!(f, "default"),
        }
    }
}

/// Validate that `name` can be used as a variable name.
pub fn validate_name(name: &str) -> Result<()> {
    if VAR_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(MorioError::UserError(format!(
            "invalid variable name '{}': use letters, digits, '_', '-' and '.', \
             not starting with '.' or '-'",
            name
        )))
    }
}

/// The two-tier variable store.
///
/// Constructed with both tier directories; neither needs to exist until the
/// first write into it.
#[derive(Debug, Clone)]
pub struct VarStore {
    custom_dir: PathBuf,
    default_dir: PathBuf,
}

impl VarStore {
    /// Create a store over the given tier directories.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(custom_dir: P, default_dir: Q) -> Self {
        Self {
            custom_dir: custom_dir.into(),
            default_dir: default_dir.into(),
        }
    }

    /// Create the store for a configuration tree.
    pub fn from_context(ctx: &ClientContext) -> Self {
        Self::new(&ctx.custom_vars_dir, &ctx.default_vars_dir)
    }

    fn tier_dir(&self, tier: VarTier) -> &Path {
        match tier {
            VarTier::Custom => &self.custom_dir,
            VarTier::Default => &self.default_dir,
        }
    }

    /// Effective value of `name`: custom, else default, else empty.
    pub fn get(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        if let Some(value) = self.read_tier(VarTier::Custom, name)? {
            return Ok(value);
        }
        Ok(self.read_tier(VarTier::Default, name)?.unwrap_or_default())
    }

    /// Value of `name` in a single tier, `None` when that tier has no entry.
    pub fn get_tier(&self, tier: VarTier, name: &str) -> Result<Option<String>> {
        validate_name(name)?;
        self.read_tier(tier, name)
    }

    /// Effective values of every variable present in either tier.
    pub fn get_all(&self) -> Result<BTreeMap<String, String>> {
        let mut names = self.list_names(VarTier::Default)?;
        names.extend(self.list_names(VarTier::Custom)?);

        names
            .into_iter()
            .map(|name| {
                let value = self.get(&name)?;
                Ok((name, value))
            })
            .collect()
    }

    /// All entries of a single tier.
    pub fn tier_values(&self, tier: VarTier) -> Result<BTreeMap<String, String>> {
        let mut values = BTreeMap::new();
        for name in self.list_names(tier)? {
            if let Some(value) = self.read_tier(tier, &name)? {
                values.insert(name, value);
            }
        }
        Ok(values)
    }

    /// Write a custom value, replacing any previous custom value.
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.write_tier(VarTier::Custom, name, value)
    }

    /// Write a default value, replacing any previous default value.
    pub fn set_default(&self, name: &str, value: &str) -> Result<()> {
        self.write_tier(VarTier::Default, name, value)
    }

    /// Store a boolean as a custom value.
    pub fn set_flag(&self, name: &str, value: bool) -> Result<()> {
        self.set(name, format_flag(value))
    }

    /// Read the effective value of `name` as a boolean.
    pub fn flag(&self, name: &str) -> Result<bool> {
        Ok(parse_flag(&self.get(name)?))
    }

    /// Remove the custom value of `name`. A missing entry is not an error.
    ///
    /// Returns whether a custom value was removed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        let path = self.custom_dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(var = name, "removed custom value");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MorioError::StorageError(format!(
                "failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Remove every custom value. Returns the names that were removed.
    pub fn remove_all_custom(&self) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for name in self.list_names(VarTier::Custom)? {
            if self.remove(&name)? {
                removed.push(name);
            }
        }
        Ok(removed)
    }

    /// Write every entry of `values` as a custom value.
    ///
    /// All names are validated before anything is written.
    pub fn import(&self, values: &BTreeMap<String, String>) -> Result<()> {
        for name in values.keys() {
            validate_name(name)?;
        }
        for (name, value) in values {
            self.set(name, value)?;
        }
        Ok(())
    }

    fn read_tier(&self, tier: VarTier, name: &str) -> Result<Option<String>> {
        let path = self.tier_dir(tier).join(name);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MorioError::StorageError(format!(
                "failed to read {} value '{}': {}",
                tier,
                path.display(),
                e
            ))),
        }
    }

    fn write_tier(&self, tier: VarTier, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        let path = self.tier_dir(tier).join(name);
        crate::fs::atomic_write_file(&path, value).map_err(|e| {
            MorioError::StorageError(format!(
                "failed to write {} value '{}': {}",
                tier,
                path.display(),
                e
            ))
        })?;
        debug!(var = name, %tier, "stored value");
        Ok(())
    }

    fn list_names(&self, tier: VarTier) -> Result<BTreeSet<String>> {
        let dir = self.tier_dir(tier);
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => {
                return Err(MorioError::StorageError(format!(
                    "failed to list {} variables in '{}': {}",
                    tier,
                    dir.display(),
                    e
                )));
            }
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                MorioError::StorageError(format!("failed to read directory entry: {}", e))
            })?;

            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }

            // Leftover temp files and anything else that is not a valid name
            // are not variables.
            if let Some(name) = entry.file_name().to_str()
                && VAR_NAME_REGEX.is_match(name)
            {
                names.insert(name.to_string());
            }
        }

        Ok(names)
    }
}
