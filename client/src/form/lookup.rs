//! Pick lists for rice mills and dhalaris.

use crate::models::{DhalariDetails, RiceMill};

/// A lookup entry searchable by name.
pub trait Named {
    fn name(&self) -> Option<&str>;
}

impl Named for RiceMill {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Named for DhalariDetails {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Entries whose name contains `query`, ignoring case.
///
/// A blank query matches everything, unnamed entries included. A non-blank
/// query never matches an unnamed entry.
pub fn matching<'a, T: Named>(entries: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            query.is_empty()
                || entry
                    .name()
                    .is_some_and(|name| name.to_lowercase().contains(&query))
        })
        .collect()
}

/// The single entry `query` designates: an exact name match (ignoring case),
/// else the only substring match. `None` when absent or ambiguous.
pub fn resolve<'a, T: Named>(entries: &'a [T], query: &str) -> Option<&'a T> {
    let wanted = query.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    let exact = entries
        .iter()
        .find(|entry| entry.name().is_some_and(|name| name.to_lowercase() == wanted));
    if exact.is_some() {
        return exact;
    }
    match matching(entries, query).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

pub fn matching_rice_mills<'a>(mills: &'a [RiceMill], query: &str) -> Vec<&'a RiceMill> {
    matching(mills, query)
}

pub fn matching_dhalaris<'a>(dhalaris: &'a [DhalariDetails], query: &str) -> Vec<&'a DhalariDetails> {
    matching(dhalaris, query)
}
