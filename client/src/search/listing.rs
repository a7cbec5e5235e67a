//! Listing state: paging, filter mode and the in-flight request.
//!
//! The state machine is sans-IO. [`Listing::request`] hands out a query and a
//! [`Ticket`]; the caller runs the query and reports back through
//! [`Listing::complete`]. Only the latest ticket is applied, so a response for
//! a superseded query never overwrites newer results.
//!
//! ```text
//!            search("x")                 clear_search()
//!   Paged ────────────────▶ Filtered ─────────────────▶ Paged (same page)
//!    │ ▲                      (navigation disabled)
//!    └─┘ next_page / prev_page
//! ```

use super::{ListingQuery, SearchField};
use crate::api::KiraiStore;
use crate::error::{ApiError, ApiResult};
use crate::models::KiraiRecord;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What happened to a reported response.
#[derive(Debug)]
pub enum Completion {
    /// Results replaced the current rows; carries the row count.
    Applied(usize),
    /// The ticket was superseded; nothing changed.
    Stale,
    /// The request failed; previous rows are kept.
    Failed(ApiError),
}

/// Paging and filter state of the record listing.
#[derive(Debug)]
pub struct Listing {
    page_size: usize,
    page: usize,
    search: Option<(SearchField, String)>,
    records: Vec<KiraiRecord>,
    /// Page number and row count of the last page loaded in paged mode.
    loaded: Option<(usize, usize)>,
    last_error: Option<String>,
    issued: u64,
    pending: Option<(Ticket, ListingQuery)>,
}

impl Listing {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            search: None,
            records: Vec::new(),
            loaded: None,
            last_error: None,
            issued: 0,
            pending: None,
        }
    }

    /// Start on a given zero-based page.
    pub fn at_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn records(&self) -> &[KiraiRecord] {
        &self.records
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_filtering(&self) -> bool {
        self.search.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Page navigation is only available outside filter mode.
    pub fn pagination_enabled(&self) -> bool {
        !self.is_filtering()
    }

    pub fn can_prev(&self) -> bool {
        self.pagination_enabled() && self.page > 0
    }

    /// Needs the current page loaded and full; disabled once a page came
    /// back shorter than the page size.
    pub fn can_next(&self) -> bool {
        self.pagination_enabled()
            && self
                .loaded
                .is_some_and(|(page, len)| page == self.page && len >= self.page_size)
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Clamps at page 0.
    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Enter filter mode, or leave it when `value` is blank.
    pub fn search(&mut self, field: SearchField, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.clear_search();
        } else {
            self.search = Some((field, value.to_string()));
        }
    }

    /// Back to paged mode at the page viewed before searching.
    pub fn clear_search(&mut self) {
        self.search = None;
    }

    /// The query the current state asks for.
    pub fn query(&self) -> ListingQuery {
        match &self.search {
            Some((field, value)) => ListingQuery::Filter {
                field: *field,
                value: value.clone(),
            },
            None => ListingQuery::Page {
                page: self.page,
                size: self.page_size,
            },
        }
    }

    /// Issue a request for the current query.
    ///
    /// Returns `None` while the same query is already in flight. A different
    /// query supersedes the pending one.
    pub fn request(&mut self) -> Option<(Ticket, ListingQuery)> {
        let query = self.query();
        if let Some((_, pending)) = &self.pending {
            if *pending == query {
                log::debug!("Listing busy with {:?}", query);
                return None;
            }
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.pending = Some((ticket, query.clone()));
        Some((ticket, query))
    }

    /// Report the outcome of the request behind `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: ApiResult<Vec<KiraiRecord>>) -> Completion {
        let query = match self.pending.take() {
            Some((latest, query)) if latest == ticket => query,
            other => {
                self.pending = other;
                log::warn!("Discarding stale listing response {:?}", ticket);
                return Completion::Stale;
            }
        };

        match result {
            Ok(records) => {
                let count = records.len();
                if let ListingQuery::Page { page, .. } = query {
                    self.loaded = Some((page, count));
                }
                self.records = records;
                self.last_error = None;
                log::info!("Listing loaded {} record(s)", count);
                Completion::Applied(count)
            }
            Err(e) => {
                log::warn!("Listing request failed: {}", e);
                // the shown rows still belong to the last loaded page
                if let (false, Some((page, _))) = (query.is_filter(), self.loaded) {
                    self.page = page;
                }
                self.last_error = Some(e.to_string());
                Completion::Failed(e)
            }
        }
    }

    /// Request, run against `store`, and apply in one step.
    ///
    /// `None` when a request for the same query is already in flight.
    pub async fn load<S: KiraiStore>(&mut self, store: &S) -> Option<Completion> {
        let (ticket, query) = self.request()?;
        let result = query.execute(store).await;
        Some(self.complete(ticket, result))
    }
}
