//! Template documentation and default-value extraction.
//!
//! Rendering a template with `MORIO_DOCS` set yields a YAML document that
//! describes the template:
//!
//! ```yaml
//! about: Free text description
//! vars:
//!   local:            # variables only this template uses
//!     NAME: description
//!   global:           # references into the global variable catalog
//!     - MORIO_SERVER
//!   defaults:         # seeded into the default tier by `morio template`
//!     NAME: value
//! ```
//!
//! Every section is optional. A section of the wrong shape is treated as
//! absent rather than as an error; only output that is not YAML at all fails.

use super::engine::{RenderMode, SOURCE_FILE_VAR, render_str};
use crate::error::{MorioError, Result};
use crate::vars::stringify_value;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed documentation block of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDoc {
    /// Free text description of the template.
    pub about: Option<String>,
    /// Declared variables.
    pub vars: Option<TemplateVars>,
}

/// The `vars` section of a template's documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    /// Descriptions of variables local to this template.
    pub local: Option<BTreeMap<String, String>>,
    /// Names of global variables this template uses.
    pub global: Option<Vec<String>>,
    /// Default values, already converted to text.
    pub defaults: Option<BTreeMap<String, String>>,
}

impl TemplateDoc {
    /// Parse documentation-mode output.
    ///
    /// Fails with `TemplateParseError` only when `rendered` is not YAML.
    pub fn parse(rendered: &str) -> Result<Self> {
        if rendered.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(rendered)
            .map_err(|e| MorioError::TemplateParseError(e.to_string()))?;

        Ok(Self::from_value(&value))
    }

    fn from_value(value: &Value) -> Self {
        let Some(root) = value.as_mapping() else {
            return Self::default();
        };

        Self {
            about: get(root, "about").and_then(Value::as_str).map(str::to_string),
            vars: get(root, "vars")
                .and_then(Value::as_mapping)
                .map(TemplateVars::from_mapping),
        }
    }

    /// Default values declared by the template; empty when none are declared.
    pub fn default_vars(&self) -> BTreeMap<String, String> {
        self.vars
            .as_ref()
            .and_then(|vars| vars.defaults.clone())
            .unwrap_or_default()
    }

    /// Local variable descriptions; empty when none are declared.
    pub fn local_vars(&self) -> BTreeMap<String, String> {
        self.vars
            .as_ref()
            .and_then(|vars| vars.local.clone())
            .unwrap_or_default()
    }

    /// Referenced global variable names; empty when none are declared.
    pub fn global_vars(&self) -> Vec<String> {
        self.vars
            .as_ref()
            .and_then(|vars| vars.global.clone())
            .unwrap_or_default()
    }
}

impl TemplateVars {
    fn from_mapping(vars: &Mapping) -> Self {
        Self {
            local: get(vars, "local")
                .and_then(Value::as_mapping)
                .map(string_map),
            global: get(vars, "global").and_then(Value::as_sequence).map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            defaults: get(vars, "defaults")
                .and_then(Value::as_mapping)
                .map(string_map),
        }
    }
}

fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(Value::String(key.to_string()))
}

/// Keys that are not scalars cannot name a variable and are dropped.
fn string_map(map: &Mapping) -> BTreeMap<String, String> {
    map.iter()
        .filter_map(|(key, value)| match key {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                Some((stringify_value(key), stringify_value(value)))
            }
            _ => None,
        })
        .collect()
}

/// Render the template at `source` in documentation mode and parse the result.
///
/// `vars` is the effective variable context, so templates that reference
/// variables outside their docs branch still render.
pub fn extract_metadata(source: &Path, vars: &BTreeMap<String, String>) -> Result<TemplateDoc> {
    let template = std::fs::read_to_string(source).map_err(|e| {
        MorioError::TemplateRenderError(format!(
            "failed to read template '{}': {}",
            source.display(),
            e
        ))
    })?;

    let mut context = vars.clone();
    context.insert(SOURCE_FILE_VAR.to_string(), source.display().to_string());

    let name = source.display().to_string();
    let rendered = render_str(&name, &template, &context, RenderMode::Docs)?;

    TemplateDoc::parse(&rendered).map_err(|e| match e {
        MorioError::TemplateParseError(msg) => MorioError::TemplateParseError(format!(
            "docs of '{}' are not valid YAML: {}",
            source.display(),
            msg
        )),
        other => other,
    })
}

/// Default values declared by the template at `source`.
pub fn extract_default_vars(
    source: &Path,
    vars: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    Ok(extract_metadata(source, vars)?.default_vars())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_doc() {
        let doc = TemplateDoc::parse(
            r#"
about: Ships nginx logs
vars:
  local:
    NGINX_PATH: Where nginx logs
  global:
    - MORIO_SERVER
  defaults:
    NGINX_PATH: /var/log/nginx
    RETRIES: 3
    ENABLED: true
    RATIO: 0.5
"#,
        )
        .unwrap();

        assert_eq!(doc.about.as_deref(), Some("Ships nginx logs"));
        assert_eq!(doc.local_vars()["NGINX_PATH"], "Where nginx logs");
        assert_eq!(doc.global_vars(), vec!["MORIO_SERVER".to_string()]);

        let defaults = doc.default_vars();
        assert_eq!(defaults["NGINX_PATH"], "/var/log/nginx");
        assert_eq!(defaults["RETRIES"], "3");
        assert_eq!(defaults["ENABLED"], "true");
        assert_eq!(defaults["RATIO"], "0.5");
    }

    #[test]
    fn test_missing_sections_yield_empty_maps() {
        let doc = TemplateDoc::parse("about: only text\n").unwrap();
        assert!(doc.vars.is_none());
        assert!(doc.default_vars().is_empty());
        assert!(doc.local_vars().is_empty());
        assert!(doc.global_vars().is_empty());
    }

    #[test]
    fn test_empty_output_is_empty_doc() {
        assert_eq!(TemplateDoc::parse("").unwrap(), TemplateDoc::default());
        assert_eq!(TemplateDoc::parse("\n  \n").unwrap(), TemplateDoc::default());
    }

    #[test]
    fn test_non_mapping_root_is_empty_doc() {
        assert_eq!(
            TemplateDoc::parse("- just\n- a list\n").unwrap(),
            TemplateDoc::default()
        );
    }

    #[test]
    fn test_wrong_shapes_are_absent() {
        let doc = TemplateDoc::parse(
            r#"
about: [not, text]
vars:
  local: a string
  global: {not: a list}
  defaults: [1, 2]
"#,
        )
        .unwrap();

        assert!(doc.about.is_none());
        let vars = doc.vars.unwrap();
        assert!(vars.local.is_none());
        assert!(vars.global.is_none());
        assert!(vars.defaults.is_none());
    }

    #[test]
    fn test_vars_of_wrong_shape_is_absent() {
        let doc = TemplateDoc::parse("vars: 42\n").unwrap();
        assert!(doc.vars.is_none());
    }

    #[test]
    fn test_non_string_global_entries_are_skipped() {
        let doc = TemplateDoc::parse("vars:\n  global: [A, 1, {b: c}, B]\n").unwrap();
        assert_eq!(doc.global_vars(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = TemplateDoc::parse("about: [unclosed\n").unwrap_err();
        assert!(matches!(err, MorioError::TemplateParseError(_)));
    }

    #[test]
    fn test_extract_metadata_renders_docs_branch() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("nginx.yaml");
        std::fs::write(
            &source,
            "{% if MORIO_DOCS %}\nabout: nginx\nvars:\n  defaults:\n    LEVEL: info\n{% else %}\nlevel: {{ LEVEL }}\n{% endif %}\n",
        )
        .unwrap();

        let doc = extract_metadata(&source, &BTreeMap::new()).unwrap();
        assert_eq!(doc.about.as_deref(), Some("nginx"));

        let defaults = extract_default_vars(&source, &BTreeMap::new()).unwrap();
        assert_eq!(defaults.get("LEVEL").map(String::as_str), Some("info"));
    }

    #[test]
    fn test_extract_metadata_reports_unparseable_docs() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bad.yaml");
        std::fs::write(&source, "{% if MORIO_DOCS %}about: [oops{% endif %}").unwrap();

        let err = extract_metadata(&source, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, MorioError::TemplateParseError(_)));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_extract_metadata_missing_template() {
        let temp = TempDir::new().unwrap();
        let err = extract_metadata(&temp.path().join("nope.yaml"), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, MorioError::TemplateRenderError(_)));
    }
}
