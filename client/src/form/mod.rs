//! Form Binder - user input to a [`KiraiRecord`].
//!
//! Inputs are raw strings keyed by registry path (`klno`,
//! `riceMill.phone`, `loadingDetails.bagCount`, ...). Binding parses each
//! input by its field kind and nests it under its group:
//!
//! ```text
//! "loadingDetails.bagCount" = "120"  ──▶  { "loadingDetails": { "bagCount": 120.0 } }
//! "loadingDate" = "2024-03-01"       ──▶  { "loadingDate": "2024-03-01" }
//! "notes" = "   "                    ──▶  (absent)
//! ```
//!
//! A failed bind or save never alters the inputs, so the user can correct
//! them and submit again.

pub mod lookup;

use chrono::{Local, NaiveDate};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::api::KiraiStore;
use crate::error::{FormError, FormResult, SubmitError};
use crate::models::{DhalariDetails, Extra, KiraiRecord, RiceMill};
use crate::registry::{registry, FieldKind, FieldPath};

pub use lookup::{matching_dhalaris, matching_rice_mills};

/// Input format of date fields.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form inputs for a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KiraiForm {
    inputs: BTreeMap<String, String>,
}

impl KiraiForm {
    /// A fresh form with the loading date preset to today.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// A fresh form with the loading date preset to `today`.
    pub fn with_today(today: NaiveDate) -> Self {
        let mut inputs = BTreeMap::new();
        inputs.insert("loadingDate".to_string(), today.format(INPUT_DATE_FORMAT).to_string());
        Self { inputs }
    }

    /// A form with no inputs at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the input bound to `path`. Unknown paths are rejected.
    pub fn set(&mut self, path: &str, value: impl Into<String>) -> FormResult<()> {
        let field = resolve(path)?;
        self.inputs.insert(field.dotted(), value.into());
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.inputs.get(path).map(String::as_str)
    }

    /// Non-blank inputs in path order.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set `path=value` from a single `KEY=VALUE` argument.
    pub fn apply_assignment(&mut self, assignment: &str) -> FormResult<()> {
        let (path, value) = assignment
            .split_once('=')
            .ok_or_else(|| FormError::UnknownField(assignment.to_string()))?;
        self.set(path.trim(), value)
    }

    /// Copy every registered field of `record` into the inputs.
    pub fn fill_from(&mut self, record: &KiraiRecord) {
        let map = record.to_json_map();
        for field in registry().paths() {
            let value = match field.group {
                None => map.get(field.key()),
                Some(group) => map.get(group).and_then(|g| g.get(field.key())),
            };
            if let Some(text) = value.and_then(input_text) {
                self.inputs.insert(field.dotted(), text);
            }
        }
    }

    /// Copy a rice mill snapshot, replacing any previous selection.
    pub fn select_rice_mill(&mut self, mill: &RiceMill) {
        let id = snapshot_id(&mill.id, &mill.extra);
        self.replace_group(
            "riceMill",
            [
                ("id", id.as_deref()),
                ("name", mill.name.as_deref()),
                ("phone", mill.phone.as_deref()),
                ("contactPerson", mill.contact_person.as_deref()),
                ("location", mill.location.as_deref()),
                ("gst", mill.gst.as_deref()),
            ],
        );
    }

    /// Copy a dhalari snapshot, replacing any previous selection.
    pub fn select_dhalari(&mut self, dhalari: &DhalariDetails) {
        let id = snapshot_id(&dhalari.id, &dhalari.extra);
        self.replace_group(
            "dhalariDetails",
            [
                ("id", id.as_deref()),
                ("name", dhalari.name.as_deref()),
                ("rythuName", dhalari.rythu_name.as_deref()),
                ("location", dhalari.location.as_deref()),
            ],
        );
    }

    fn replace_group<const N: usize>(&mut self, group: &str, values: [(&str, Option<&str>); N]) {
        let prefix = format!("{}.", group);
        self.inputs.retain(|path, _| !path.starts_with(&prefix));
        for (key, value) in values {
            if let Some(value) = value {
                self.inputs.insert(format!("{}{}", prefix, key), value.to_string());
            }
        }
    }

    /// Required-field check: the KL number must be non-blank.
    pub fn validate(&self) -> FormResult<()> {
        match self.get("klno") {
            Some(klno) if !klno.trim().is_empty() => Ok(()),
            _ => Err(FormError::MissingKlNo),
        }
    }

    /// Build the record the inputs describe.
    pub fn bind(&self) -> FormResult<KiraiRecord> {
        self.validate()?;

        let mut root = Map::new();
        for (path, raw) in self.inputs() {
            let field = resolve(path)?;
            let value = parse_input(&field, raw.trim())?;
            match field.group {
                None => {
                    root.insert(field.key().to_string(), value);
                }
                Some(group) => {
                    let entry = root
                        .entry(group.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(fields) = entry {
                        fields.insert(field.key().to_string(), value);
                    }
                }
            }
        }

        let record: KiraiRecord =
            serde_json::from_value(Value::Object(root)).map_err(|e| FormError::Unbindable(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Bind and save. The store is not called when binding fails.
    pub async fn submit<S: KiraiStore>(&self, store: &S) -> Result<KiraiRecord, SubmitError> {
        let record = self.bind()?;
        let saved = store.save_record(&record).await?;
        Ok(saved)
    }
}

fn resolve(path: &str) -> FormResult<FieldPath> {
    registry()
        .resolve(path)
        .ok_or_else(|| FormError::UnknownField(path.to_string()))
}

fn parse_input(field: &FieldPath, raw: &str) -> FormResult<Value> {
    match field.kind() {
        FieldKind::Text => Ok(Value::String(raw.to_string())),
        FieldKind::Decimal => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| FormError::InvalidNumber {
                field: field.dotted(),
                value: raw.to_string(),
            }),
        FieldKind::Date => NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT)
            .map(|d| Value::String(d.format(INPUT_DATE_FORMAT).to_string()))
            .map_err(|_| FormError::InvalidDate {
                field: field.dotted(),
                value: raw.to_string(),
            }),
    }
}

/// Input text of a stored leaf.
fn input_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lookup entries carry their id as `id` or as the store's `_id`.
fn snapshot_id(id: &Option<String>, extra: &Extra) -> Option<String> {
    id.clone()
        .or_else(|| extra.get("_id").and_then(Value::as_str).map(str::to_string))
}
