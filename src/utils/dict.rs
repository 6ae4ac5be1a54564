//! Helpers for walking nested JSON objects (parsed device replies).

use serde_json::{Map, Value};

/// Python-style truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Extract the chain of single-key objects as a path.
///
/// Descends while the current object has exactly one key and that key's
/// value is itself an object.
///
/// # Examples
/// ```
/// use libbart::utils::dict::extract_path;
/// use serde_json::json;
///
/// let vrfs = json!({"L3vpn": {"L3vpnVRF": {"VRF": {"VRF": ""}}}});
/// assert_eq!(extract_path(&vrfs), ["L3vpn", "L3vpnVRF", "VRF"]);
/// ```
pub fn extract_path(data: &Value) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = data;

    while let Value::Object(map) = current {
        if map.len() != 1 {
            break;
        }
        let Some((key, child)) = map.iter().next() else {
            break;
        };
        if !child.is_object() {
            break;
        }
        path.push(key.clone());
        current = child;
    }

    path
}

/// Follow `keys` down a nested object and return what is below the last one.
///
/// Stops early, returning the current value, once it is falsy (`null`,
/// empty object, empty string, ...). A missing key or a non-object on the
/// way yields `None`.
pub fn deref_multi<'a, S: AsRef<str>>(data: &'a Value, keys: &[S]) -> Option<&'a Value> {
    let mut current = data;

    for key in keys {
        if !is_truthy(current) {
            break;
        }
        current = current.as_object()?.get(key.as_ref())?;
    }

    Some(current)
}

/// Drop entries whose value is the string `"0"`
pub fn clean_zero_values(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| v.as_str() != Some("0"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
