//! On-screen detail view: a flat, labeled sequence.
//!
//! Order is registry order first, then anything the registry does not know
//! in lexicographic key order. Registered fields always appear, even when
//! their group is missing from the record.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{render_leaf, render_value};
use crate::models::KiraiRecord;
use crate::registry::{registry, Entry, FieldRegistry, GroupSpec};

/// One `(label, value)` line of the detail view.
///
/// `section` is the title of the registered group the row belongs to;
/// top-level fields and unregistered groups have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'static str>,
}

impl ViewRow {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
            section: None,
        }
    }

    fn in_section(mut self, section: Option<&'static str>) -> Self {
        self.section = section;
        self
    }
}

/// View projection over the process-wide registry.
pub fn view_projection(record: &KiraiRecord) -> Vec<ViewRow> {
    view_projection_with(record, registry())
}

/// View projection over an explicit registry.
pub fn view_projection_with(record: &KiraiRecord, registry: &FieldRegistry) -> Vec<ViewRow> {
    let map = record.to_json_map();
    let mut rows = Vec::new();

    for entry in registry.entries() {
        match entry {
            Entry::Scalar(spec) => {
                rows.push(ViewRow::new(spec.alias, render_leaf(map.get(spec.key), spec.kind)));
            }
            Entry::Group(group) => {
                emit_group(&mut rows, registry, group.name, Some(group), map.get(group.name));
            }
        }
    }

    for (key, value) in sorted_entries(&map, |key| !registry.is_registered(key) && !registry.is_internal(key)) {
        match value {
            Value::Object(_) => emit_group(&mut rows, registry, key, None, Some(value)),
            other => rows.push(ViewRow::new(registry.label_of("", key), render_value(other))),
        }
    }

    rows
}

fn emit_group(
    rows: &mut Vec<ViewRow>,
    registry: &FieldRegistry,
    name: &str,
    spec: Option<&GroupSpec>,
    value: Option<&Value>,
) {
    let fields = value.and_then(Value::as_object);
    let section = spec.map(|g| g.title);

    if let Some(group) = spec {
        for field in group.fields.iter().filter(|f| f.visible) {
            let leaf = fields.and_then(|m| m.get(field.key));
            rows.push(ViewRow::new(field.alias, render_leaf(leaf, field.kind)).in_section(section));
        }
    }

    let Some(fields) = fields else {
        return;
    };
    let known = |key: &str| spec.is_some_and(|g| g.fields.iter().any(|f| f.key == key));
    for (key, value) in sorted_entries(fields, |key| !known(key) && !registry.is_internal(key)) {
        rows.push(ViewRow::new(registry.label_of(name, key), render_value(value)).in_section(section));
    }
}

/// Entries passing `keep`, in lexicographic key order.
fn sorted_entries<'a>(map: &'a Map<String, Value>, keep: impl Fn(&str) -> bool) -> Vec<(&'a str, &'a Value)> {
    let mut entries: Vec<(&str, &Value)> = map
        .iter()
        .filter(|(key, _)| keep(key.as_str()))
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoadingDetails;
    use serde_json::json;

    fn labels(rows: &[ViewRow]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    fn value_of<'a>(rows: &'a [ViewRow], label: &str) -> &'a str {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
            .unwrap_or_else(|| panic!("missing label {}", label))
    }

    fn record(value: serde_json::Value) -> KiraiRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_record_lists_every_registered_label() {
        let rows = view_projection(&KiraiRecord::new("KL-1"));
        let expected: usize = registry()
            .entries()
            .iter()
            .map(|e| match e {
                Entry::Scalar(_) => 1,
                Entry::Group(g) => g.fields.iter().filter(|f| f.visible).count(),
            })
            .sum();
        assert_eq!(rows.len(), expected);
        assert_eq!(value_of(&rows, "KL Number"), "KL-1");
        assert!(rows.iter().skip(1).all(|r| r.value == "N/A"));
    }

    #[test]
    fn test_zero_bag_count_is_not_missing() {
        let mut with_zero = KiraiRecord::new("KL-2");
        with_zero.loading_details = Some(LoadingDetails {
            bag_count: Some(0.0),
            ..Default::default()
        });
        assert_eq!(value_of(&view_projection(&with_zero), "Bag Count"), "0");

        let mut without = KiraiRecord::new("KL-2");
        without.loading_details = Some(LoadingDetails::default());
        assert_eq!(value_of(&view_projection(&without), "Bag Count"), "N/A");
    }

    #[test]
    fn test_order_follows_registry_not_input() {
        let a = record(json!({
            "notes": "fragile",
            "loadingDetails": { "totalRate": 100, "perBag": 2 },
            "klno": "X1"
        }));
        let b = record(json!({
            "klno": "X1",
            "loadingDetails": { "perBag": 2, "totalRate": 100 },
            "notes": "fragile"
        }));
        let rows_a = view_projection(&a);
        assert_eq!(rows_a, view_projection(&b));
        assert_eq!(rows_a, view_projection(&a));

        let l = labels(&rows_a);
        assert_eq!(l[0], "KL Number");
        assert_eq!(l[1], "Loading Date");
        let per_bag = l.iter().position(|x| *x == "Per Bag").unwrap();
        let total = l.iter().position(|x| *x == "Total Rate").unwrap();
        assert!(per_bag < total);
        assert_eq!(l.last(), Some(&"Instructions"));
    }

    #[test]
    fn test_unregistered_keys_follow_in_key_order() {
        let r = record(json!({
            "klno": "X2",
            "_id": "abc",
            "__v": 0,
            "updatedAt": "2024-01-02",
            "createdAt": "2024-01-01",
            "riceMill": { "_id": "m", "name": "Mill", "address": { "line1": "Main Rd" } }
        }));
        let rows = view_projection(&r);
        let l = labels(&rows);

        assert!(!l.contains(&"_id"));
        assert!(!l.contains(&"__v"));
        assert!(!l.contains(&"riceMill._id"));
        assert!(!l.contains(&"Rice Mill ID"));

        let created = l.iter().position(|x| *x == "createdAt").unwrap();
        let updated = l.iter().position(|x| *x == "updatedAt").unwrap();
        let instructions = l.iter().position(|x| *x == "Instructions").unwrap();
        assert!(instructions < created && created < updated);

        assert_eq!(value_of(&rows, "riceMill.address"), r#"{"line1":"Main Rd"}"#);
        let gst = l.iter().position(|x| *x == "GST Number").unwrap();
        let address = l.iter().position(|x| *x == "riceMill.address").unwrap();
        assert_eq!(address, gst + 1);
    }

    #[test]
    fn test_unregistered_object_expands_with_fallback_labels() {
        let r = record(json!({ "klno": "X3", "audit": { "by": "ravi", "at": 3 } }));
        let rows = view_projection(&r);
        assert_eq!(value_of(&rows, "audit.at"), "3");
        assert_eq!(value_of(&rows, "audit.by"), "ravi");
    }

    #[test]
    fn test_rows_carry_group_titles() {
        let r = record(json!({
            "klno": "X5",
            "lorryDetails": { "driverName": "Raju", "permit": "AP-9" },
            "audit": { "by": "ravi" }
        }));
        let rows = view_projection(&r);
        let section_of = |label: &str| rows.iter().find(|r| r.label == label).unwrap().section;

        assert_eq!(section_of("KL Number"), None);
        assert_eq!(section_of("Driver Name"), Some("Lorry Details"));
        assert_eq!(section_of("lorryDetails.permit"), Some("Lorry Details"));
        assert_eq!(section_of("Per Bag"), Some("Loading Details"));
        assert_eq!(section_of("audit.by"), None);
    }

    #[test]
    fn test_dates_and_text_values() {
        let r = record(json!({
            "klno": "X4",
            "loadingDate": "2024-03-01",
            "kiraiDetails": { "balance": "2000 pending" },
            "notes": ""
        }));
        let rows = view_projection(&r);
        assert_eq!(value_of(&rows, "Loading Date"), "01/03/2024");
        assert_eq!(value_of(&rows, "Reached Date"), "N/A");
        assert_eq!(value_of(&rows, "Balance"), "2000 pending");
        assert_eq!(value_of(&rows, "Notes"), "");
    }
}
