// Response cleanup before payloads reach the host

use serde_json::Value;

/// Zero-width no-break space, which Raindrop leaves in some titles and excerpts.
pub const MARKER: char = '\u{FEFF}';

/// Return a copy of `value` with every [`MARKER`] removed from every string.
///
/// Arrays and objects are walked to any depth; object key order is kept.
/// Numbers, booleans and null are returned unchanged.
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_marker(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), sanitize(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn strip_marker(s: &str) -> String {
    if s.contains(MARKER) {
        s.chars().filter(|c| *c != MARKER).collect()
    } else {
        s.to_string()
    }
}

/// Sanitize and render as 2-space indented JSON.
pub fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sanitize(value))
}
