//! Search/Filter Adapter - turns a search box into a store query.
//!
//! ```text
//! (SearchField, "Mill2") ──▶ Filter { riceMill.name, "Mill2" } ──▶ GET /v1/kirai/filter
//! (SearchField, "   ")   ──▶ Page { page, size }               ──▶ GET /v1/kirai/getKiraiDetails
//! ```
//!
//! An empty value is not a filter: the adapter falls back to the paginated
//! listing. [`Listing`] holds the paging state and the in-flight request.

pub mod listing;

use std::fmt;
use std::str::FromStr;

use crate::api::KiraiStore;
use crate::error::ApiResult;
use crate::models::KiraiRecord;

pub use listing::{Completion, Listing, Ticket};

/// Fields a listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchField {
    #[default]
    KlNo,
    RiceMillName,
    DhalariName,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [
        SearchField::KlNo,
        SearchField::RiceMillName,
        SearchField::DhalariName,
    ];

    /// Record path sent as `fieldName`.
    pub fn path(self) -> &'static str {
        match self {
            SearchField::KlNo => "klno",
            SearchField::RiceMillName => "riceMill.name",
            SearchField::DhalariName => "dhalariDetails.name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::KlNo => "KL Number",
            SearchField::RiceMillName => "Rice Mill Name",
            SearchField::DhalariName => "Dhalari Name",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SearchField {
    type Err = String;

    /// Accepts short names (`klno`, `rice-mill`, `dhalari`), record paths
    /// and display labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let short = match wanted.as_str() {
            "klno" | "kl" | "kl-number" => Some(SearchField::KlNo),
            "rice-mill" | "ricemill" | "mill" => Some(SearchField::RiceMillName),
            "dhalari" => Some(SearchField::DhalariName),
            _ => None,
        };
        short
            .or_else(|| {
                Self::ALL.into_iter().find(|field| {
                    field.path().to_lowercase() == wanted || field.label().to_lowercase() == wanted
                })
            })
            .ok_or_else(|| format!("unknown search field '{}' (expected klno, rice-mill or dhalari)", s))
    }
}

/// One request against the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingQuery {
    /// Zero-based page of the full listing.
    Page { page: usize, size: usize },
    Filter { field: SearchField, value: String },
}

impl ListingQuery {
    /// Filter when `value` has content after trimming, else the given page.
    pub fn from_search(field: SearchField, value: &str, page: usize, size: usize) -> Self {
        let value = value.trim();
        if value.is_empty() {
            ListingQuery::Page { page, size }
        } else {
            ListingQuery::Filter {
                field,
                value: value.to_string(),
            }
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, ListingQuery::Filter { .. })
    }

    /// Run the query against `store`.
    pub async fn execute<S: KiraiStore>(&self, store: &S) -> ApiResult<Vec<KiraiRecord>> {
        match self {
            ListingQuery::Page { page, size } => store.list_page(*page, *size).await,
            ListingQuery::Filter { field, value } => store.filter(field.path(), value).await,
        }
    }
}
