//! Projection Engine - read-only renderings of a single record.
//!
//! ```text
//!                    ┌──────────────┐
//!               ┌───▶│ view         │──▶ [(label, value)]  (detail screen)
//! KiraiRecord ──┼───▶│ print        │──▶ PrintDocument     (two columns, 1-17)
//!   + registry  └───▶│ list         │──▶ ListRow           (listing table)
//!                    └──────────────┘
//! ```
//!
//! All projections are pure. A missing leaf is never an error: it renders as
//! [`NOT_AVAILABLE`]. Zero and the empty string are values, not absences.

pub mod list;
pub mod print;
pub mod selection;
pub mod view;

use serde_json::{Map, Number, Value};

use crate::models::lenient::parse_date;
use crate::registry::FieldKind;

pub use list::{ListRow, LIST_HEADERS};
pub use print::{print_projection, PrintDocument, PrintHeader, PrintItem, PrintOptions};
pub use selection::Selection;
pub use view::{view_projection, view_projection_with, ViewRow};

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// How dates are shown on screen and paper.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Look up `group.key` in a record's JSON form.
pub(crate) fn lookup<'a>(record: &'a Map<String, Value>, group: &str, key: &str) -> Option<&'a Value> {
    record.get(group)?.as_object()?.get(key)
}

/// Render a registered leaf according to its kind.
pub fn render_leaf(value: Option<&Value>, kind: FieldKind) -> String {
    match (value, kind) {
        (None, _) | (Some(Value::Null), _) => NOT_AVAILABLE.to_string(),
        (Some(Value::String(s)), FieldKind::Date) => parse_date(s)
            .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|| s.clone()),
        (Some(value), _) => render_value(value),
    }
}

/// Render any JSON value; objects and arrays fall back to compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => render_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Integers print bare and decimals without a trailing `.0`.
fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_decimal).unwrap_or_else(|| n.to_string())
    }
}

/// `0.0` -> `"0"`, `12.5` -> `"12.5"`.
pub fn format_decimal(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null_are_not_available() {
        assert_eq!(render_leaf(None, FieldKind::Text), "N/A");
        assert_eq!(render_leaf(Some(&Value::Null), FieldKind::Decimal), "N/A");
    }

    #[test]
    fn test_zero_and_empty_are_values() {
        assert_eq!(render_leaf(Some(&json!(0.0)), FieldKind::Decimal), "0");
        assert_eq!(render_leaf(Some(&json!(0)), FieldKind::Decimal), "0");
        assert_eq!(render_leaf(Some(&json!("")), FieldKind::Text), "");
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(render_value(&json!(12.5)), "12.5");
        assert_eq!(render_value(&json!(950.0)), "950");
        assert_eq!(render_value(&json!(-3)), "-3");
    }

    #[test]
    fn test_date_rendering() {
        assert_eq!(render_leaf(Some(&json!("2024-03-01")), FieldKind::Date), "01/03/2024");
        assert_eq!(render_leaf(Some(&json!("sometime")), FieldKind::Date), "sometime");
    }

    #[test]
    fn test_structured_fallback() {
        assert_eq!(render_value(&json!({ "a": 1 })), r#"{"a":1}"#);
        assert_eq!(render_value(&json!([1, "x"])), r#"[1,"x"]"#);
    }
}
