use serde_json::{Map, Value};

/// Recursively sort all object keys, producing a new Value.
///
/// - Object keys are sorted by byte-wise string order, at every depth.
/// - Arrays keep their element order; only their elements are visited.
/// - Scalars, including `null`, are returned unchanged.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Compact JSON text of `value` with every object's keys in sorted order.
///
/// Structurally equal values produce identical text regardless of the key
/// insertion order they were built with.
pub fn canonicalize(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    serde_json::to_string(&sort_keys(value)).unwrap_or_default()
}
