//! Implementation of the `morio vars` commands.

use crate::cli::{ExportFormat, TierArg, VarsAction};
use crate::context::ClientContext;
use crate::error::{MorioError, Result};
use crate::vars::{VarStore, VarTier, stringify_value};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Dispatch vars subcommands.
pub fn dispatch_vars(ctx: &ClientContext, action: VarsAction) -> Result<()> {
    let store = VarStore::from_context(ctx);

    match action {
        VarsAction::List(args) => {
            let values = list_values(&store, args.tier)?;
            if values.is_empty() {
                println!("No variables set.");
            } else {
                print!("{}", format_listing(&values));
            }
            Ok(())
        }
        VarsAction::Get(args) => {
            println!("{}", store.get(&args.name)?);
            Ok(())
        }
        VarsAction::Set(args) => store.set(&args.name, &args.value),
        VarsAction::SetDefault(args) => store.set_default(&args.name, &args.value),
        VarsAction::Rm(args) => {
            if !store.remove(&args.name)? {
                println!("No custom value for {}.", args.name);
            }
            Ok(())
        }
        VarsAction::Enable(args) => store.set_flag(&args.name, true),
        VarsAction::Disable(args) => store.set_flag(&args.name, false),
        VarsAction::Clear(args) => store.set(&args.name, ""),
        VarsAction::Wipe => {
            let removed = store.remove_all_custom()?;
            println!("Removed {} custom value(s).", removed.len());
            Ok(())
        }
        VarsAction::Export(args) => {
            print!("{}", export_document(&store.get_all()?, args.format)?);
            Ok(())
        }
        VarsAction::Import(args) => {
            let values = read_import(&args.file)?;
            store.import(&values)?;
            println!("Imported {} value(s).", values.len());
            Ok(())
        }
    }
}

/// Values shown by `vars list` for `tier`.
pub fn list_values(store: &VarStore, tier: TierArg) -> Result<BTreeMap<String, String>> {
    match tier {
        TierArg::Custom => store.tier_values(VarTier::Custom),
        TierArg::Default => store.tier_values(VarTier::Default),
        TierArg::Effective => store.get_all(),
    }
}

/// `NAME: value` lines, names padded to a common width.
pub fn format_listing(values: &BTreeMap<String, String>) -> String {
    let width = values.keys().map(String::len).max().unwrap_or(0);
    values
        .iter()
        .map(|(name, value)| format!("{:<width$}  {}\n", name, value, width = width))
        .collect()
}

/// Serialize the effective mapping as one document.
pub fn export_document(values: &BTreeMap<String, String>, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Yaml => serde_yaml::to_string(values)
            .map_err(|e| MorioError::UserError(format!("failed to export variables: {}", e))),
        ExportFormat::Json => serde_json::to_string_pretty(values)
            .map(|json| json + "\n")
            .map_err(|e| MorioError::UserError(format!("failed to export variables: {}", e))),
    }
}

/// Read a YAML mapping of names to values. Non-string scalars are
/// stringified the way template defaults are.
pub fn read_import(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        MorioError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })?;
    parse_import(&content)
        .map_err(|e| MorioError::UserError(format!("'{}': {}", path.display(), e)))
}

fn parse_import(content: &str) -> std::result::Result<BTreeMap<String, String>, String> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let value: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let mapping = value
        .as_mapping()
        .ok_or_else(|| "expected a mapping of variable names to values".to_string())?;

    mapping
        .iter()
        .map(|(name, value)| match name.as_str() {
            Some(name) => Ok((name.to_string(), stringify_value(value))),
            None => Err(format!("variable name {:?} is not a string", name)),
        })
        .collect()
}
