use crate::context::ClientContext;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const TEST_LAYOUT: &str =
    "# Generated by morio from {{ MORIO_TEMPLATE_SOURCE_FILE }}\n{{ MORIO_TEMPLATE_CONTENT }}";

pub(crate) const TEST_GLOBAL_VARS: &str = r#"
MORIO_SERVER:
  default: morio.example.com
  about: FQDN of the Morio collector
"#;

/// An empty configuration tree in a temporary directory.
pub(crate) fn create_empty_tree() -> (TempDir, ClientContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ClientContext::from_root(temp_dir.path());
    (temp_dir, ctx)
}

/// A configuration tree with a layout, a global catalog and a main config
/// template for every agent.
pub(crate) fn create_test_tree() -> (TempDir, ClientContext) {
    let (temp_dir, ctx) = create_empty_tree();

    write_file(&ctx.layout_path(), TEST_LAYOUT);
    write_file(&ctx.global_vars_path(), TEST_GLOBAL_VARS);

    for agent in crate::agents::Agent::ALL {
        write_file(
            &ctx.config_template_path(*agent),
            &format!(
                "{{% if MORIO_DOCS %}}\nabout: Main {agent} config\nvars:\n  global:\n    - MORIO_SERVER\n  defaults:\n    MORIO_SERVER: morio.example.com\n{{% else %}}\noutput.kafka.hosts: [\"{{{{ MORIO_SERVER | default(value=\"morio.example.com\") }}}}:9092\"]\ntopic: {agent}\n{{% endif %}}\n",
                agent = agent
            ),
        );
    }

    (temp_dir, ctx)
}

pub(crate) fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Create empty module template files in `dir`.
pub(crate) fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            write_file(&path, &format!("# {}\n", name));
            path
        })
        .collect()
}
