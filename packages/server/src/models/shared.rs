use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;

/// Serde helper for fields that clients send either as strings or as raw
/// JSON values.
///
/// * JSON field absent  => `None` (with `#[serde(default)]`)
/// * JSON field = null  => `None`
/// * JSON string        => the string, verbatim
/// * any other value    => its compact JSON text (`16`, `true`, `[1,2]`)
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lowercase_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a base-10 integer that must not be negative.
///
/// `label` is the human name used in messages, e.g. `"Temporary HP"`.
pub fn parse_non_negative(label: &str, raw: &str) -> Result<i32, AppError> {
    let value: i32 = raw.parse().map_err(|_| {
        AppError::Validation(format!("Invalid {} format", lowercase_first(label)))
    })?;
    if value < 0 {
        return Err(AppError::Validation(format!("{label} cannot be negative")));
    }
    Ok(value)
}

pub fn parse_level(raw: &str) -> Result<i32, AppError> {
    let level: i32 = raw
        .parse()
        .map_err(|_| AppError::Validation("Invalid level format".into()))?;
    if !(1..=20).contains(&level) {
        return Err(AppError::Validation(
            "Level must be between 1 and 20".into(),
        ));
    }
    Ok(level)
}

/// Parse a catalog reference; `key` is the request field name.
pub fn parse_uuid(key: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("Invalid UUID format for {key}: {raw}")))
}

/// Check that a document is syntactically valid JSON. The text itself is
/// stored untouched.
pub fn validate_json(label: &str, raw: &str) -> Result<(), AppError> {
    serde_json::from_str::<serde::de::IgnoredAny>(raw)
        .map(|_| ())
        .map_err(|e| AppError::Validation(format!("Invalid {label} JSON format: {e}")))
}
