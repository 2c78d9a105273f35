//! Conversion of structured values to the store's text format.

use serde_yaml::Value;

/// Text stored for a true flag.
pub const TRUE: &str = "true";

/// Text stored for a false flag.
pub const FALSE: &str = "false";

/// Format a boolean the way the store expects it.
pub fn format_flag(value: bool) -> &'static str {
    if value { TRUE } else { FALSE }
}

/// Parse a stored value as a flag. Only the exact text `true` is true.
pub fn parse_flag(value: &str) -> bool {
    value.trim() == TRUE
}

/// Convert a YAML value to the text stored for a variable.
///
/// - booleans become `true` / `false`
/// - integers are written in decimal, floats in their shortest form
/// - strings are kept as-is
/// - null becomes the empty string
/// - sequences and mappings are written on one line as JSON, which is
///   also valid flow-style YAML
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => format_flag(*b).to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(f) = n.as_f64() {
                f.to_string()
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => stringify_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => collection_text(value),
    }
}

/// One-line text for a sequence or mapping. JSON is valid flow YAML and
/// quotes every string, so the text parses back to the same value.
/// Mappings with keys JSON cannot express fall back to block YAML.
fn collection_text(value: &Value) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(_) => serde_yaml::to_string(value)
            .map(|yaml| yaml.trim_end().to_string())
            .unwrap_or_default(),
    }
}
