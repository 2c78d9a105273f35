//! Listing and toggling modules on disk.

use super::area::{AREAS, ModuleArea};
use super::state::{ModuleState, classify, file_name, validate_module_name};
use crate::agents::Agent;
use crate::context::ClientContext;
use crate::error::{MorioError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Modules found in one or more areas, split by state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleListing {
    pub enabled: BTreeSet<String>,
    pub disabled: BTreeSet<String>,
}

impl ModuleListing {
    /// Add every module of `other` to this listing.
    pub fn merge(&mut self, other: ModuleListing) {
        self.enabled.extend(other.enabled);
        self.disabled.extend(other.disabled);
    }

    /// True when no module was found.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty() && self.disabled.is_empty()
    }
}

/// A module template file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    pub area: ModuleArea,
    pub name: String,
    pub state: ModuleState,
    pub path: PathBuf,
}

/// Reads and changes module state for one configuration tree.
#[derive(Debug, Clone)]
pub struct ModuleManager {
    ctx: ClientContext,
}

impl ModuleManager {
    pub fn new(ctx: &ClientContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Every module template in `area`. A missing area has no modules; an
    /// area that exists but cannot be read is an error.
    pub fn files(&self, area: ModuleArea) -> Result<Vec<ModuleFile>> {
        let dir = self.ctx.area_dir(area);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MorioError::ModuleStateError(format!(
                    "unable to load module list from '{}': {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                MorioError::ModuleStateError(format!(
                    "failed to read entry in '{}': {}",
                    dir.display(),
                    e
                ))
            })?;

            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            if let Some((name, state)) = classify(&file_name) {
                files.push(ModuleFile {
                    area,
                    name,
                    state,
                    path: entry.path(),
                });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Enabled and disabled modules in `area`.
    pub fn list(&self, area: ModuleArea) -> Result<ModuleListing> {
        let mut listing = ModuleListing::default();
        for file in self.files(area)? {
            match file.state {
                ModuleState::Enabled => listing.enabled.insert(file.name),
                ModuleState::Disabled => listing.disabled.insert(file.name),
            };
        }
        Ok(listing)
    }

    /// Enabled and disabled modules across every area of `agent`.
    pub fn list_agent(&self, agent: Agent) -> Result<ModuleListing> {
        let mut listing = ModuleListing::default();
        for area in ModuleArea::for_agent(agent) {
            listing.merge(self.list(area)?);
        }
        Ok(listing)
    }

    /// Every template of module `name`, across all areas.
    pub fn find(&self, name: &str) -> Result<Vec<ModuleFile>> {
        validate_module_name(name)?;
        let mut found = Vec::new();
        for area in AREAS {
            found.extend(self.files(*area)?.into_iter().filter(|f| f.name == name));
        }
        Ok(found)
    }

    /// Enable module `name` in `area`. Returns whether a file was renamed;
    /// an already enabled or missing module is left alone.
    pub fn enable(&self, area: ModuleArea, name: &str) -> Result<bool> {
        self.transition(area, name, ModuleState::Disabled, ModuleState::Enabled)
    }

    /// Disable module `name` in `area`. Returns whether a file was renamed;
    /// an already disabled or missing module is left alone.
    pub fn disable(&self, area: ModuleArea, name: &str) -> Result<bool> {
        self.transition(area, name, ModuleState::Enabled, ModuleState::Disabled)
    }

    /// Enable module `name` in every area where it exists.
    pub fn enable_module(&self, name: &str) -> Result<Vec<ModuleArea>> {
        self.fan_out(name, |area| self.enable(area, name))
    }

    /// Disable module `name` in every area where it exists.
    pub fn disable_module(&self, name: &str) -> Result<Vec<ModuleArea>> {
        self.fan_out(name, |area| self.disable(area, name))
    }

    fn fan_out<F>(&self, name: &str, mut op: F) -> Result<Vec<ModuleArea>>
    where
        F: FnMut(ModuleArea) -> Result<bool>,
    {
        validate_module_name(name)?;
        let mut changed = Vec::new();
        for area in AREAS {
            if op(*area)? {
                changed.push(*area);
            }
        }
        Ok(changed)
    }

    fn transition(
        &self,
        area: ModuleArea,
        name: &str,
        from: ModuleState,
        to: ModuleState,
    ) -> Result<bool> {
        validate_module_name(name)?;

        let listing = self.list(area)?;
        let present = match from {
            ModuleState::Enabled => listing.enabled.contains(name),
            ModuleState::Disabled => listing.disabled.contains(name),
        };
        if !present {
            return Ok(false);
        }

        let dir = self.ctx.area_dir(area);
        let source = dir.join(file_name(name, from));
        let destination = dir.join(file_name(name, to));

        crate::fs::rename_no_clobber(&source, &destination).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                MorioError::ModuleStateError(format!(
                    "module '{}' has both an enabled and a disabled template in '{}'; \
                     remove one of them",
                    name,
                    dir.display()
                ))
            } else {
                MorioError::ModuleStateError(format!(
                    "failed to rename '{}' to '{}': {}",
                    source.display(),
                    destination.display(),
                    e
                ))
            }
        })?;

        info!(module = name, %area, state = %to, "changed module state");
        Ok(true)
    }
}
