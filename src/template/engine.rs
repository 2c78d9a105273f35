//! Template engine for collector configuration.
//!
//! Templates are written in Tera's Jinja2-style syntax. Every variable from
//! the store is exposed as a string under its own name, and a few reserved
//! names are injected by morio:
//!
//! - `MORIO_DOCS`: boolean, `true` only when rendering a template to read
//!   its embedded documentation
//! - `MORIO_TEMPLATE_SOURCE_FILE`: path of the template being rendered
//! - `MORIO_TEMPLATE_CONTENT`: the rendered body, available to the layout
//!
//! A typical template documents itself in a docs branch:
//!
//! ```text
//! {% if MORIO_DOCS %}
//! about: Collects nginx access logs
//! vars:
//!   local:
//!     NGINX_LOG_PATH: Where nginx writes its access log
//!   defaults:
//!     NGINX_LOG_PATH: /var/log/nginx/access.log
//! {% else %}
//! - module: nginx
//!   access:
//!     var.paths: ["{{ NGINX_LOG_PATH | default(value="/var/log/nginx/access.log") }}"]
//! {% endif %}
//! ```
//!
//! Output is never HTML-escaped. Rendering is a pure function of the
//! template text and the context.

use crate::error::{MorioError, Result};
use std::collections::BTreeMap;
use std::error::Error as _;
use tera::{Context, Tera};

/// Boolean flag selecting documentation mode.
pub const DOCS_FLAG: &str = "MORIO_DOCS";

/// Path of the template being rendered.
pub const SOURCE_FILE_VAR: &str = "MORIO_TEMPLATE_SOURCE_FILE";

/// Rendered body handed to the shared layout.
pub const CONTENT_VAR: &str = "MORIO_TEMPLATE_CONTENT";

/// Whether a render produces configuration or documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Produce the configuration consumed by a collector.
    Config,
    /// Produce the YAML documentation block of the template.
    Docs,
}

impl RenderMode {
    fn docs_flag(self) -> bool {
        matches!(self, RenderMode::Docs)
    }
}

/// Render `template` (identified by `name` in error messages) against `vars`.
pub fn render_str(
    name: &str,
    template: &str,
    vars: &BTreeMap<String, String>,
    mode: RenderMode,
) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, template)
        .map_err(|e| render_error(name, &e))?;

    let mut context = Context::new();
    for (key, value) in vars {
        context.insert(key.as_str(), value);
    }
    context.insert(DOCS_FLAG, &mode.docs_flag());

    tera.render(name, &context)
        .map_err(|e| render_error(name, &e))
}

/// Tera wraps the useful message in a chain of sources; flatten it.
fn render_error(name: &str, err: &tera::Error) -> MorioError {
    let mut message = format!("{}: {}", name, err);
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    MorioError::TemplateRenderError(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let out = render_str(
            "t",
            "level: {{ LEVEL }}",
            &vars([("LEVEL", "info")]),
            RenderMode::Config,
        )
        .unwrap();
        assert_eq!(out, "level: info");
    }

    #[test]
    fn test_default_filter_for_unset_variable() {
        let out = render_str(
            "t",
            r#"level: {{ LEVEL | default(value="warn") }}"#,
            &BTreeMap::new(),
            RenderMode::Config,
        )
        .unwrap();
        assert_eq!(out, "level: warn");
    }

    #[test]
    fn test_docs_flag_selects_branch() {
        let template = "{% if MORIO_DOCS %}docs{% else %}config{% endif %}";
        let config = render_str("t", template, &BTreeMap::new(), RenderMode::Config).unwrap();
        let docs = render_str("t", template, &BTreeMap::new(), RenderMode::Docs).unwrap();
        assert_eq!(config, "config");
        assert_eq!(docs, "docs");
    }

    #[test]
    fn test_no_html_escaping() {
        let out = render_str(
            "t",
            "cmd: {{ CMD }}",
            &vars([("CMD", "a < b && c > 'd'")]),
            RenderMode::Config,
        )
        .unwrap();
        assert_eq!(out, "cmd: a < b && c > 'd'");
    }

    #[test]
    fn test_string_comparison_for_flags() {
        let template = r#"{% if DEBUG == "true" %}debug{% else %}quiet{% endif %}"#;
        let on = render_str("t", template, &vars([("DEBUG", "true")]), RenderMode::Config);
        let off = render_str("t", template, &vars([("DEBUG", "false")]), RenderMode::Config);
        assert_eq!(on.unwrap(), "debug");
        assert_eq!(off.unwrap(), "quiet");
    }

    #[test]
    fn test_malformed_template_is_render_error() {
        let err = render_str("broken.yaml", "{% if %}", &BTreeMap::new(), RenderMode::Config)
            .unwrap_err();
        assert!(matches!(err, MorioError::TemplateRenderError(_)));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_undefined_variable_is_render_error() {
        let err = render_str("t", "{{ MISSING }}", &BTreeMap::new(), RenderMode::Config)
            .unwrap_err();
        assert!(matches!(err, MorioError::TemplateRenderError(_)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = "{% for x in [3, 1, 2] %}{{ x }}{% endfor %} {{ A }}{{ B }}";
        let ctx = vars([("A", "a"), ("B", "b")]);
        let first = render_str("t", template, &ctx, RenderMode::Config).unwrap();
        let second = render_str("t", template, &ctx, RenderMode::Config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "312 ab");
    }
}
