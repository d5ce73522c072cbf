use serde_json::{Map, Value};

/// Fields a new account must carry, in the order they are reported when missing.
pub const SIGNUP_FIELDS: [&str; 3] = ["email", "password", "username"];

/// A value counts as present unless it is absent, `null`, `false`, zero,
/// or an empty string/array/object.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::Bool(true)) => true,
    }
}

/// Returns the required fields that are not present, preserving `required` order.
pub fn missing_fields(body: &Map<String, Value>, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !is_present(body.get(*field)))
        .collect()
}

/// A non-empty string field, or `None`.
pub fn non_empty_str<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Text used to look a value up by equality. Non-string values use their JSON form.
pub fn lookup_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
