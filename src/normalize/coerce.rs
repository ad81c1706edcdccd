use serde_json::{Map, Value};

/// First non-null value stored under any of `keys`.
pub(super) fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Legacy boolean encodings: only `true`, `"true"` and `"Y"` count as set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true" || s == "Y",
        _ => false,
    }
}

/// Text attribute; scalars are stringified, anything structured becomes empty.
pub(super) fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Non-negative length; integral numbers and numeric strings are accepted.
pub(super) fn size(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).unwrap_or(0)
            } else {
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => f as u32,
                    _ => 0,
                }
            }
        }
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Elements of a collection attribute; anything but an array is an empty collection.
pub(super) fn elements(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}
