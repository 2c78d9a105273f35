//! Module documentation: template docs joined with the global catalog.
//!
//! The global catalog (`global-vars.yaml`) describes variables shared by many
//! templates:
//!
//! ```yaml
//! MORIO_SERVER:
//!   default: morio.example.com
//!   about: FQDN of the Morio collector
//! ```
//!
//! It is only consulted for display. Rendering never reads it.

use super::manager::{ModuleFile, ModuleManager};
use crate::error::{MorioError, Result};
use crate::template::{TemplateDoc, extract_metadata};
use crate::vars::stringify_value;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// One entry of the global variable catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalVar {
    pub default: Option<String>,
    pub about: Option<String>,
}

/// The global variable catalog, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalVarCatalog {
    vars: BTreeMap<String, GlobalVar>,
}

impl GlobalVarCatalog {
    /// Load the catalog; a missing file is an empty catalog.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content).map_err(|e| match e {
                MorioError::TemplateParseError(msg) => MorioError::TemplateParseError(format!(
                    "global variable catalog '{}': {}",
                    path.display(),
                    msg
                )),
                other => other,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(MorioError::UserError(format!(
                "failed to read global variable catalog '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Parse the catalog. Entries that are not mappings are skipped.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| MorioError::TemplateParseError(e.to_string()))?;

        let mut vars = BTreeMap::new();
        if let Some(root) = value.as_mapping() {
            for (name, entry) in root {
                let (Some(name), Some(entry)) = (name.as_str(), entry.as_mapping()) else {
                    continue;
                };
                vars.insert(
                    name.to_string(),
                    GlobalVar {
                        default: entry.get("default").map(stringify_value),
                        about: entry.get("about").and_then(Value::as_str).map(str::to_string),
                    },
                );
            }
        }
        Ok(Self { vars })
    }

    pub fn get(&self, name: &str) -> Option<&GlobalVar> {
        self.vars.get(name)
    }
}

/// Documentation of one template of a module.
#[derive(Debug, Clone)]
pub struct ModuleTemplateInfo {
    pub file: ModuleFile,
    pub doc: TemplateDoc,
}

impl ModuleManager {
    /// Documentation for every template of module `name`, in area order.
    ///
    /// `vars` is the effective variable context used to render docs.
    pub fn module_info(
        &self,
        name: &str,
        vars: &BTreeMap<String, String>,
    ) -> Result<Vec<ModuleTemplateInfo>> {
        self.find(name)?
            .into_iter()
            .map(|file| {
                let doc = extract_metadata(&file.path, vars)?;
                Ok(ModuleTemplateInfo { file, doc })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn catalog_parses_entries() {
        let catalog = GlobalVarCatalog::from_yaml(
            r#"
MORIO_SERVER:
  default: morio.example.com
  about: FQDN of the collector
MORIO_PORT:
  default: 9092
broken: just a string
"#,
        )
        .unwrap();

        assert_eq!(catalog.vars.len(), 2);
        let server = catalog.get("MORIO_SERVER").unwrap();
        assert_eq!(server.default.as_deref(), Some("morio.example.com"));
        assert_eq!(server.about.as_deref(), Some("FQDN of the collector"));
        assert_eq!(catalog.get("MORIO_PORT").unwrap().default.as_deref(), Some("9092"));
        assert!(catalog.get("MORIO_PORT").unwrap().about.is_none());
        assert!(catalog.get("broken").is_none());
    }

    #[test]
    fn missing_catalog_is_empty() {
        let temp = TempDir::new().unwrap();
        let catalog = GlobalVarCatalog::load(temp.path().join("global-vars.yaml")).unwrap();
        assert!(catalog.vars.is_empty());
    }

    #[test]
    fn invalid_catalog_is_parse_error() {
        let err = GlobalVarCatalog::from_yaml("a: [b").unwrap_err();
        assert!(matches!(err, MorioError::TemplateParseError(_)));
    }
}
