use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a timestamp.
///
/// Numbers are Unix timestamps in milliseconds; strings are RFC3339. Anything else, or a value
/// outside chrono's range, yields `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(ms)
        }
        Value::String(s) => s.parse::<DateTime<Utc>>().ok(),
        _ => None,
    }
}

/// Lenient deserializer for epoch-millisecond fields such as the registry's `updatedAt`.
///
/// Accepts integers (ms) and RFC3339 strings; anything unparsable becomes `None` instead of
/// failing the surrounding entry.
pub fn deserialize_optional_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&value).map(|ts| ts.timestamp_millis()))
}

/// Lenient deserializer for optional string metadata.
///
/// A value of any other JSON type becomes `None`, so one mistyped field never costs the
/// surrounding registry entry.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Lenient deserializer for token counts.
///
/// Accepts unsigned integers, and non-negative floats (saturated to `u64`). Negative numbers and
/// non-numbers become `None`.
pub fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().or_else(|| {
        value.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)
    }))
}
