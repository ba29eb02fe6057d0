//! Dotted-path lookup into theme mappings.

use serde_json::Value;

/// Resolve a dotted path such as `colors.primary` against `root`.
///
/// Never fails: an empty path, an absent root, a missing key or an absent
/// intermediate value all yield an empty string value. `null` counts as absent.
///
/// ```
/// use bundlekit_config::theme::value_by_path;
/// use serde_json::json;
///
/// let theme = json!({ "colors": { "primary": "#fff" } });
/// assert_eq!(value_by_path(Some(&theme), "colors.primary"), json!("#fff"));
/// assert_eq!(value_by_path(Some(&theme), "colors.missing"), json!(""));
/// ```
pub fn value_by_path(root: Option<&Value>, path: &str) -> Value {
    if path.is_empty() {
        return empty();
    }

    let mut current = root;
    for key in path.split('.') {
        current = match current {
            Some(Value::Object(map)) => map.get(key),
            Some(Value::Array(items)) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => return empty(),
        };
    }

    match current {
        None | Some(Value::Null) => empty(),
        Some(value) => value.clone(),
    }
}

/// Render a resolved value as raw text for embedding into generated output.
///
/// Strings are emitted without quotes, scalars as their literal text and
/// compound values as JSON.
pub fn render_raw(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn empty() -> Value {
    Value::String(String::new())
}
