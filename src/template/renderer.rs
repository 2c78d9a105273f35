//! Rendering templates into collector configuration files.

use super::engine::{CONTENT_VAR, RenderMode, SOURCE_FILE_VAR, render_str};
use super::metadata::extract_default_vars;
use crate::context::OUTPUT_EXTENSION;
use crate::error::{MorioError, Result};
use crate::modules::state::{ModuleState, classify};
use crate::vars::{VarStore, VarTier};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of rendering one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Template the file was rendered from.
    pub source: PathBuf,
    /// Where the rendered configuration was written.
    pub destination: PathBuf,
    /// Defaults the template declares, as written to the default tier.
    pub defaults: BTreeMap<String, String>,
}

/// Renders templates through the shared layout and harvests their defaults
/// into the store.
#[derive(Debug)]
pub struct Renderer<'a> {
    store: &'a VarStore,
    layout_path: PathBuf,
}

impl<'a> Renderer<'a> {
    /// Create a renderer that wraps output in the layout at `layout_path`.
    pub fn new<P: Into<PathBuf>>(store: &'a VarStore, layout_path: P) -> Self {
        Self {
            store,
            layout_path: layout_path.into(),
        }
    }

    /// Render `source` through the layout without writing anything.
    pub fn render_to_string(
        &self,
        source: &Path,
        context: &BTreeMap<String, String>,
    ) -> Result<String> {
        let template = read_template(source)?;
        let layout = read_template(&self.layout_path)?;

        let mut context = context.clone();
        context.insert(SOURCE_FILE_VAR.to_string(), source.display().to_string());

        let body = render_str(
            &source.display().to_string(),
            &template,
            &context,
            RenderMode::Config,
        )?;

        context.insert(CONTENT_VAR.to_string(), body);
        render_str(
            &self.layout_path.display().to_string(),
            &layout,
            &context,
            RenderMode::Config,
        )
    }

    /// Render `source` to `destination`, then store the defaults it declares.
    pub fn render_file(
        &self,
        source: &Path,
        destination: &Path,
        context: &BTreeMap<String, String>,
    ) -> Result<RenderedFile> {
        let rendered = self.render_to_string(source, context)?;

        crate::fs::atomic_write_file(destination, &rendered).map_err(|e| {
            MorioError::TemplateRenderError(format!(
                "failed to write '{}': {}",
                destination.display(),
                e
            ))
        })?;
        debug!(source = %source.display(), destination = %destination.display(), "rendered template");

        let defaults = extract_default_vars(source, context)?;
        self.store_defaults(source, &defaults)?;

        Ok(RenderedFile {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            defaults,
        })
    }

    /// Render every enabled template directly under `source_folder` into
    /// `destination_folder`.
    ///
    /// Previously rendered files in the destination are removed first; other
    /// files there are left alone. `name.yaml` renders to `name.yml`, and
    /// disabled templates (`name.yaml.disabled`) are skipped. A missing source
    /// folder renders nothing.
    pub fn render_folder(
        &self,
        source_folder: &Path,
        destination_folder: &Path,
        context: &BTreeMap<String, String>,
    ) -> Result<Vec<RenderedFile>> {
        clear_rendered(destination_folder)?;

        let mut rendered = Vec::new();
        for (name, source) in list_templates(source_folder)? {
            let destination = destination_folder.join(format!("{}.{}", name, OUTPUT_EXTENSION));
            rendered.push(self.render_file(&source, &destination, context)?);
        }

        Ok(rendered)
    }

    fn store_defaults(&self, source: &Path, defaults: &BTreeMap<String, String>) -> Result<()> {
        for (name, value) in defaults {
            let current = self.store.get_tier(VarTier::Default, name)?;
            if current.as_deref() == Some(value.as_str()) {
                continue;
            }
            self.store.set_default(name, value)?;
            info!(var = %name, value = %value, template = %source.display(), "stored template default");
        }
        Ok(())
    }
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        MorioError::TemplateRenderError(format!(
            "failed to read template '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Enabled module templates directly under `folder` with their module
/// names, sorted by file name. Uses the same naming rule as module listing,
/// so only templates `morio modules` can see are rendered.
fn list_templates(folder: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(MorioError::TemplateRenderError(format!(
                "failed to list templates in '{}': {}",
                folder.display(),
                e
            )));
        }
    };

    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            MorioError::TemplateRenderError(format!("failed to read directory entry: {}", e))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some((name, ModuleState::Enabled)) = classify(file_name) {
            templates.push((name, path));
        }
    }

    templates.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(templates)
}

/// Remove files with the rendered-output extension from `folder`.
fn clear_rendered(folder: &Path) -> Result<()> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(MorioError::TemplateRenderError(format!(
                "failed to list '{}': {}",
                folder.display(),
                e
            )));
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| {
            MorioError::TemplateRenderError(format!("failed to read directory entry: {}", e))
        })?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, OUTPUT_EXTENSION) {
            fs::remove_file(&path).map_err(|e| {
                MorioError::TemplateRenderError(format!(
                    "failed to remove stale '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            debug!(path = %path.display(), "removed stale rendered file");
        }
    }

    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
