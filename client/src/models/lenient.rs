//! Tolerant field decoders for records read back from the store.
//!
//! The entry form historically submitted numeric inputs as strings, so the
//! store holds both `"bagCount": 50` and `"bagCount": "50"`. These decoders
//! accept either form and read anything unusable as absent, so one malformed
//! leaf never fails a whole listing page.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a decimal from a JSON number or a numeric string.
pub fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_to_decimal))
}

/// Decode free text, keeping the textual form of numbers and booleans.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            log::warn!("Ignoring non-text value {} in text field", other);
            None
        }
    })
}

/// Decode text that is always present, reading unusable values as empty.
pub fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Decode a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => {
            let parsed = parse_date(&s);
            if parsed.is_none() {
                log::warn!("Ignoring unreadable date '{}'", s);
            }
            parsed
        }
        _ => None,
    })
}

/// Parse the calendar date at the start of `input`.
///
/// Accepts a bare `YYYY-MM-DD` or a date-time whose first ten characters are
/// the date (`2024-03-01T00:00:00.000Z`). The date is taken as written, with
/// no timezone shift.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let head = input.get(..10)?;
    let rest = &input[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn value_to_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                _ => {
                    log::warn!("Ignoring non-numeric value '{}' in numeric field", s);
                    None
                }
            }
        }
        Value::Null => None,
        other => {
            log::warn!("Ignoring non-numeric value {} in numeric field", other);
            None
        }
    }
}
