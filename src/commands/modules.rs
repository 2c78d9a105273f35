//! Implementation of the `morio modules` commands.
//!
//! `info` is where global variable references meet the global catalog: a
//! template referring to a global the catalog does not describe is flagged
//! here, never while rendering.

use crate::agents::Agent;
use crate::cli::ModulesAction;
use crate::context::ClientContext;
use crate::error::Result;
use crate::modules::{GlobalVarCatalog, ModuleListing, ModuleManager, ModuleTemplateInfo};
use crate::vars::VarStore;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Dispatch modules subcommands.
pub fn dispatch_modules(ctx: &ClientContext, action: ModulesAction) -> Result<()> {
    let manager = ModuleManager::new(ctx);

    match action {
        ModulesAction::List => show_listing(&manager),
        ModulesAction::Enable(args) => {
            if manager.enable_module(&args.name)?.is_empty() {
                println!("No disabled module named '{}'.", args.name);
                println!();
            }
            show_listing(&manager)
        }
        ModulesAction::Disable(args) => {
            if manager.disable_module(&args.name)?.is_empty() {
                println!("No enabled module named '{}'.", args.name);
                println!();
            }
            show_listing(&manager)
        }
        ModulesAction::Info(args) => {
            let vars = VarStore::from_context(ctx).get_all()?;
            let catalog = GlobalVarCatalog::load(ctx.global_vars_path())?;
            let infos = manager.module_info(&args.name, &vars)?;
            print!("{}", format_module_info(&args.name, &infos, &catalog, &vars));
            Ok(())
        }
    }
}

fn show_listing(manager: &ModuleManager) -> Result<()> {
    for agent in Agent::ALL {
        print!("{}", format_listing(*agent, &manager.list_agent(*agent)?));
    }
    Ok(())
}

/// Enabled and disabled modules of one agent.
pub fn format_listing(agent: Agent, listing: &ModuleListing) -> String {
    let mut out = String::new();
    for (state, names) in [("enabled", &listing.enabled), ("disabled", &listing.disabled)] {
        if names.is_empty() {
            let _ = writeln!(out, "No {} modules {}", agent, state);
        } else {
            let _ = writeln!(out, "{} {} modules:", capitalize(state), agent);
            for name in names {
                let _ = writeln!(out, " - {}", name);
            }
        }
    }
    out.push('\n');
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Documentation of every template of module `name`.
pub fn format_module_info(
    name: &str,
    infos: &[ModuleTemplateInfo],
    catalog: &GlobalVarCatalog,
    vars: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();
    if infos.is_empty() {
        let _ = writeln!(out, "No module named '{}'.", name);
        return out;
    }

    let _ = writeln!(out, "Module: {}", name);
    for info in infos {
        let doc = &info.doc;
        let _ = writeln!(out);
        let _ = writeln!(out, "-- {} ({}) --", info.file.area, info.file.state);
        if let Some(about) = &doc.about {
            let _ = writeln!(out, "{}", about.trim_end());
        }

        let local = doc.local_vars();
        if !local.is_empty() {
            let _ = writeln!(out, "  -- local vars --");
            for (var, about) in &local {
                let _ = writeln!(out, "    {}", var);
                let _ = writeln!(out, "      {}", about);
            }
        }

        let globals = doc.global_vars();
        if !globals.is_empty() {
            let _ = writeln!(out, "  -- global vars --");
            for var in &globals {
                let _ = writeln!(out, "    {}", var);
                match catalog.get(var) {
                    Some(entry) => {
                        if let Some(about) = &entry.about {
                            let _ = writeln!(out, "      {}", about);
                        }
                    }
                    None => {
                        let _ = writeln!(out, "      (not described in the global catalog)");
                    }
                }
            }
        }

        let defaults = doc.default_vars();
        if !defaults.is_empty() || !globals.is_empty() {
            let _ = writeln!(out, "  -- defaults --");
            for (var, value) in &defaults {
                let _ = writeln!(out, "    {}: {}", var, value);
            }
            for var in &globals {
                if defaults.contains_key(var) {
                    continue;
                }
                let value = vars
                    .get(var)
                    .cloned()
                    .or_else(|| catalog.get(var).and_then(|entry| entry.default.clone()))
                    .unwrap_or_default();
                let _ = writeln!(out, "    {}: {}", var, value);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleArea;
    use crate::test_support::{TEST_GLOBAL_VARS, create_test_tree, write_file};

    fn listing(enabled: &[&str], disabled: &[&str]) -> ModuleListing {
        ModuleListing {
            enabled: enabled.iter().map(|s| s.to_string()).collect(),
            disabled: disabled.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn listing_output() {
        let text = format_listing(Agent::Logs, &listing(&["journald", "nginx"], &[]));
        assert_eq!(
            text,
            "Enabled logs modules:\n - journald\n - nginx\nNo logs modules disabled\n\n"
        );
    }

    #[test]
    fn empty_listing_output() {
        let text = format_listing(Agent::Audit, &ModuleListing::default());
        assert_eq!(text, "No audit modules enabled\nNo audit modules disabled\n\n");
    }

    #[test]
    fn info_joins_docs_with_catalog() {
        let (_temp, ctx) = create_test_tree();
        write_file(
            &ctx.area_dir(ModuleArea::MetricsModules).join("system.yaml.disabled"),
            "{% if MORIO_DOCS %}\nabout: System metrics\nvars:\n  local:\n    PERIOD: Collection period\n  global: [MORIO_SERVER, MORIO_UNKNOWN]\n  defaults:\n    PERIOD: 10s\n{% else %}\n- module: system\n{% endif %}\n",
        );
        let manager = ModuleManager::new(&ctx);
        let vars = BTreeMap::new();
        let infos = manager.module_info("system", &vars).unwrap();
        let catalog = GlobalVarCatalog::from_yaml(TEST_GLOBAL_VARS).unwrap();

        let text = format_module_info("system", &infos, &catalog, &vars);

        assert!(text.starts_with("Module: system\n"));
        assert!(text.contains("-- metrics/module-templates.d (disabled) --"));
        assert!(text.contains("System metrics"));
        assert!(text.contains("    PERIOD\n      Collection period\n"));
        assert!(text.contains("    MORIO_SERVER\n      FQDN of the Morio collector\n"));
        assert!(text.contains("    MORIO_UNKNOWN\n      (not described in the global catalog)\n"));
        assert!(text.contains("    PERIOD: 10s\n"));
        assert!(text.contains("    MORIO_SERVER: morio.example.com\n"));
    }

    #[test]
    fn info_prefers_effective_value_for_globals() {
        let catalog = GlobalVarCatalog::from_yaml(TEST_GLOBAL_VARS).unwrap();
        let (_temp, ctx) = create_test_tree();
        write_file(
            &ctx.area_dir(ModuleArea::AuditModules).join("auditd.yaml"),
            "{% if MORIO_DOCS %}\nvars:\n  global: [MORIO_SERVER]\n{% endif %}\n",
        );
        let vars: BTreeMap<String, String> =
            [("MORIO_SERVER".to_string(), "collector.internal".to_string())].into();
        let infos = ModuleManager::new(&ctx).module_info("auditd", &vars).unwrap();

        let text = format_module_info("auditd", &infos, &catalog, &vars);

        assert!(text.contains("    MORIO_SERVER: collector.internal\n"));
    }

    #[test]
    fn info_for_unknown_module() {
        let text = format_module_info(
            "ghost",
            &[],
            &GlobalVarCatalog::default(),
            &BTreeMap::new(),
        );
        assert_eq!(text, "No module named 'ghost'.\n");
    }
}
