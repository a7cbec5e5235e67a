//! Field Registry - the single source of field order and labels.
//!
//! The registry is static configuration: which top-level keys and groups a
//! record has, in what order they are displayed, what each field is called on
//! screen, and what kind of value it holds. Both projections and the form
//! binder read it; nothing else decides ordering.
//!
//! ```text
//! klno ─ loadingDate ─ reachedDate ─ riceMill{..} ─ dhalariDetails{..} ─ ...
//!   │                                    │
//!   └─ Scalar(FieldSpec)                 └─ Group(GroupSpec { fields: [FieldSpec] })
//! ```
//!
//! The table is built once per process on first use ([`registry`]) and is
//! read-only afterwards.

pub mod print_layout;

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

pub use print_layout::{PrintColumn, PrintLine, PrintSource, PRINT_LAYOUT};

// =============================================================================
// Descriptors
// =============================================================================

/// What a leaf holds; drives rendering and input parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Decimal,
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Decimal => write!(f, "decimal"),
            FieldKind::Date => write!(f, "date"),
        }
    }
}

/// One leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire key (camelCase).
    pub key: &'static str,
    /// Display label.
    pub alias: &'static str,
    pub kind: FieldKind,
    /// Internal identifiers can be bound but are never displayed.
    pub visible: bool,
}

const fn text(key: &'static str, alias: &'static str) -> FieldSpec {
    FieldSpec { key, alias, kind: FieldKind::Text, visible: true }
}

const fn decimal(key: &'static str, alias: &'static str) -> FieldSpec {
    FieldSpec { key, alias, kind: FieldKind::Decimal, visible: true }
}

const fn date(key: &'static str, alias: &'static str) -> FieldSpec {
    FieldSpec { key, alias, kind: FieldKind::Date, visible: true }
}

const fn internal(key: &'static str, alias: &'static str) -> FieldSpec {
    FieldSpec { key, alias, kind: FieldKind::Text, visible: false }
}

/// A nested group of fields (`riceMill`, `loadingDetails`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: &'static str,
    /// Section heading.
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

/// A top-level entry of the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Scalar(FieldSpec),
    Group(GroupSpec),
}

impl Entry {
    pub fn key(&self) -> &'static str {
        match self {
            Entry::Scalar(spec) => spec.key,
            Entry::Group(group) => group.name,
        }
    }
}

/// Storage bookkeeping keys that are never displayed.
pub const INTERNAL_KEYS: &[&str] = &["_id", "__v"];

// =============================================================================
// Layout table
// =============================================================================

const RICE_MILL: &[FieldSpec] = &[
    internal("id", "Rice Mill ID"),
    text("name", "Rice Mill Name"),
    text("phone", "Rice Mill Phone"),
    text("contactPerson", "Contact Person"),
    text("location", "Rice Mill Location"),
    text("gst", "GST Number"),
];

const DHALARI: &[FieldSpec] = &[
    internal("id", "Dhalari ID"),
    text("name", "Dhalari Name"),
    text("rythuName", "Rythu Name"),
    text("location", "Dhalari Location"),
];

const LORRY: &[FieldSpec] = &[
    text("driverName", "Driver Name"),
    text("driverLocation", "Driver Location"),
    text("ownerName", "Owner Name"),
    text("ownerLocation", "Owner Location"),
    text("lorryNumber", "Lorry Number"),
    text("driverNumber", "Driver Number"),
];

const LOADING: &[FieldSpec] = &[
    decimal("perBag", "Per Bag"),
    text("deliveryType", "Delivery Type"),
    text("riceType", "Rice Type"),
    decimal("bagCount", "Bag Count"),
    text("waymentType", "Wayment Type"),
    decimal("loadingRate", "Loading Rate"),
    decimal("commission", "Commission"),
    decimal("totalRate", "Total Rate"),
];

const WEIGHTAGE: &[FieldSpec] = &[
    internal("id", "Weightage ID"),
    text("billNumber", "Bill Number"),
    text("type", "Weightage Type"),
    decimal("total", "Total Weight"),
    decimal("empty", "Empty Weight"),
    decimal("itemWeight", "Item Weight"),
];

const KIRAI: &[FieldSpec] = &[
    text("type", "Kirai Type"),
    decimal("perTon", "Per Ton"),
    decimal("advance", "Advance"),
    text("balance", "Balance"),
    decimal("driverAllowances", "Driver Allowances"),
];

const MEDIATOR: &[FieldSpec] = &[
    text("name", "Mediator Name"),
    text("number", "Mediator Number"),
];

const TRANSPORT_OFFICE: &[FieldSpec] = &[
    text("name", "Transport Office"),
    text("phoneNumber", "Transport Office Phone"),
];

/// Display order of a record.
pub static RECORD_LAYOUT: &[Entry] = &[
    Entry::Scalar(text("klno", "KL Number")),
    Entry::Scalar(date("loadingDate", "Loading Date")),
    Entry::Scalar(date("reachedDate", "Reached Date")),
    Entry::Group(GroupSpec { name: "riceMill", title: "Rice Mill Details", fields: RICE_MILL }),
    Entry::Group(GroupSpec { name: "dhalariDetails", title: "Dhalari Details", fields: DHALARI }),
    Entry::Group(GroupSpec { name: "lorryDetails", title: "Lorry Details", fields: LORRY }),
    Entry::Group(GroupSpec { name: "loadingDetails", title: "Loading Details", fields: LOADING }),
    Entry::Group(GroupSpec { name: "weightageDetails", title: "Weightage Details", fields: WEIGHTAGE }),
    Entry::Group(GroupSpec { name: "kiraiDetails", title: "Kirai Details", fields: KIRAI }),
    Entry::Group(GroupSpec { name: "mediator", title: "Mediator", fields: MEDIATOR }),
    Entry::Group(GroupSpec { name: "transportOffices", title: "Transport Office", fields: TRANSPORT_OFFICE }),
    Entry::Scalar(text("notes", "Notes")),
    Entry::Scalar(text("instructions", "Instructions")),
];

/// Process-wide registry over [`RECORD_LAYOUT`].
pub static FIELD_REGISTRY: Lazy<FieldRegistry> = Lazy::new(|| FieldRegistry::new(RECORD_LAYOUT));

/// Shorthand for the process-wide registry.
pub fn registry() -> &'static FieldRegistry {
    &FIELD_REGISTRY
}

// =============================================================================
// Paths
// =============================================================================

/// A resolved field: top-level scalar (`group == None`) or group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    pub group: Option<&'static str>,
    pub spec: &'static FieldSpec,
}

impl FieldPath {
    pub fn key(&self) -> &'static str {
        self.spec.key
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    /// Dotted form, e.g. `loadingDetails.bagCount` or `klno`.
    pub fn dotted(&self) -> String {
        match self.group {
            Some(group) => format!("{}.{}", group, self.spec.key),
            None => self.spec.key.to_string(),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Indexed, read-only view over a record layout.
#[derive(Debug)]
pub struct FieldRegistry {
    layout: &'static [Entry],
    groups: HashMap<&'static str, &'static GroupSpec>,
    scalars: HashMap<&'static str, &'static FieldSpec>,
}

impl FieldRegistry {
    pub fn new(layout: &'static [Entry]) -> Self {
        let mut groups = HashMap::new();
        let mut scalars = HashMap::new();
        for entry in layout {
            match entry {
                Entry::Scalar(spec) => {
                    scalars.insert(spec.key, spec);
                }
                Entry::Group(group) => {
                    groups.insert(group.name, group);
                }
            }
        }
        Self { layout, groups, scalars }
    }

    /// Top-level entries in display order.
    pub fn entries(&self) -> &'static [Entry] {
        self.layout
    }

    /// Whether a top-level key is part of the layout.
    pub fn is_registered(&self, key: &str) -> bool {
        self.groups.contains_key(key) || self.scalars.contains_key(key)
    }

    pub fn group(&self, name: &str) -> Option<&'static GroupSpec> {
        self.groups.get(name).copied()
    }

    pub fn scalar(&self, key: &str) -> Option<&'static FieldSpec> {
        self.scalars.get(key).copied()
    }

    /// Top-level keys rendered without a subfield breakdown, in order.
    pub fn scalar_keys(&self) -> Vec<&'static str> {
        self.layout
            .iter()
            .filter_map(|entry| match entry {
                Entry::Scalar(spec) => Some(spec.key),
                Entry::Group(_) => None,
            })
            .collect()
    }

    /// Displayed subfield keys of `group`, in order. Empty for unknown groups.
    pub fn order_of(&self, group: &str) -> Vec<&'static str> {
        self.group(group)
            .map(|g| g.fields.iter().filter(|f| f.visible).map(|f| f.key).collect())
            .unwrap_or_default()
    }

    /// Display label of `group.key`.
    ///
    /// Unregistered fields fall back to `"<group>.<key>"`; an unregistered
    /// top-level key (empty `group`) falls back to the key itself.
    pub fn label_of(&self, group: &str, key: &str) -> Cow<'static, str> {
        if group.is_empty() {
            return match self.scalar(key) {
                Some(spec) => Cow::Borrowed(spec.alias),
                None => Cow::Owned(key.to_string()),
            };
        }
        let alias = self
            .group(group)
            .and_then(|g| g.fields.iter().find(|f| f.key == key))
            .map(|f| f.alias);
        match alias {
            Some(alias) => Cow::Borrowed(alias),
            None => Cow::Owned(format!("{}.{}", group, key)),
        }
    }

    /// Resolve a dotted path (`klno`, `riceMill.phone`) to its field.
    pub fn resolve(&self, path: &str) -> Option<FieldPath> {
        match path.split_once('.') {
            None => self.scalar(path).map(|spec| FieldPath { group: None, spec }),
            Some((group, key)) => {
                let group = self.group(group)?;
                group
                    .fields
                    .iter()
                    .find(|f| f.key == key)
                    .map(|spec| FieldPath { group: Some(group.name), spec })
            }
        }
    }

    /// Every bindable path in layout order, internal identifiers included.
    pub fn paths(&self) -> Vec<FieldPath> {
        let mut paths = Vec::new();
        for entry in self.layout {
            match entry {
                Entry::Scalar(spec) => paths.push(FieldPath { group: None, spec }),
                Entry::Group(group) => {
                    paths.extend(group.fields.iter().map(|spec| FieldPath {
                        group: Some(group.name),
                        spec,
                    }));
                }
            }
        }
        paths
    }

    /// Storage bookkeeping keys are hidden everywhere.
    pub fn is_internal(&self, key: &str) -> bool {
        INTERNAL_KEYS.contains(&key)
    }
}
