//! End-to-end flows over an in-memory record store.

use std::cell::{Cell, RefCell};

use kirai::error::ApiResult;
use kirai::registry::PrintColumn;
use kirai::{
    ApiError, Completion, DhalariDetails, FormError, KiraiForm, KiraiRecord, KiraiStore, Listing,
    ListingQuery, PrintOptions, RiceMill, SearchField, Selection, SubmitError,
};
use serde_json::json;

#[derive(Default)]
struct MemoryStore {
    records: RefCell<Vec<KiraiRecord>>,
    saves: Cell<usize>,
    list_calls: Cell<usize>,
    filter_calls: Cell<usize>,
}

impl MemoryStore {
    fn with(records: Vec<KiraiRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Default::default()
        }
    }
}

impl KiraiStore for MemoryStore {
    async fn save_record(&self, record: &KiraiRecord) -> ApiResult<KiraiRecord> {
        self.saves.set(self.saves.get() + 1);
        self.records.borrow_mut().push(record.clone());
        Ok(record.clone())
    }

    async fn list_page(&self, page: usize, size: usize) -> ApiResult<Vec<KiraiRecord>> {
        self.list_calls.set(self.list_calls.get() + 1);
        Ok(self
            .records
            .borrow()
            .iter()
            .skip(page * size)
            .take(size)
            .cloned()
            .collect())
    }

    async fn filter(&self, field_name: &str, value: &str) -> ApiResult<Vec<KiraiRecord>> {
        self.filter_calls.set(self.filter_calls.get() + 1);
        let hit = |record: &KiraiRecord| match field_name {
            "klno" => record.klno == value,
            "riceMill.name" => record.rice_mill_name() == Some(value),
            "dhalariDetails.name" => record.dhalari_name() == Some(value),
            _ => false,
        };
        if !["klno", "riceMill.name", "dhalariDetails.name"].contains(&field_name) {
            return Err(ApiError::Status {
                status: 400,
                message: format!("cannot filter on {}", field_name),
            });
        }
        Ok(self.records.borrow().iter().filter(|r| hit(r)).cloned().collect())
    }

    async fn rice_mills(&self) -> ApiResult<Vec<RiceMill>> {
        Ok(vec![])
    }

    async fn dhalaris(&self) -> ApiResult<Vec<DhalariDetails>> {
        Ok(vec![])
    }
}

fn record(value: serde_json::Value) -> KiraiRecord {
    serde_json::from_value(value).unwrap()
}

fn two_mills() -> MemoryStore {
    MemoryStore::with(vec![
        record(json!({ "klno": "A1", "riceMill": { "name": "Mill1" } })),
        record(json!({ "klno": "A2", "riceMill": { "name": "Mill2" } })),
    ])
}

fn numbered(n: usize) -> MemoryStore {
    MemoryStore::with((0..n).map(|i| KiraiRecord::new(format!("KL-{:03}", i))).collect())
}

fn klnos(listing: &Listing) -> Vec<&str> {
    listing.records().iter().map(|r| r.klno.as_str()).collect()
}

#[tokio::test]
async fn test_filter_by_rice_mill_name_returns_exact_match() {
    let store = two_mills();
    let mut listing = Listing::new(10);

    listing.search(SearchField::RiceMillName, "Mill2");
    assert!(matches!(listing.load(&store).await, Some(Completion::Applied(1))));
    assert_eq!(klnos(&listing), vec!["A2"]);
    assert_eq!(store.filter_calls.get(), 1);
}

#[tokio::test]
async fn test_empty_value_returns_paginated_page() {
    let store = two_mills();
    let query = ListingQuery::from_search(SearchField::RiceMillName, "", 0, 10);
    assert_eq!(query, ListingQuery::Page { page: 0, size: 10 });

    let records = query.execute(&store).await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.klno.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A2"]);
    assert_eq!(store.filter_calls.get(), 0);
    assert_eq!(store.list_calls.get(), 1);
}

#[tokio::test]
async fn test_search_then_clear_restores_previous_page() {
    let store = numbered(25);
    let mut listing = Listing::new(10);

    listing.load(&store).await;
    assert!(listing.next_page());
    listing.load(&store).await;
    assert_eq!(listing.page(), 1);
    assert_eq!(klnos(&listing)[0], "KL-010");

    listing.search(SearchField::KlNo, "KL-003");
    assert!(!listing.pagination_enabled());
    assert!(!listing.next_page());
    assert!(!listing.prev_page());
    listing.load(&store).await;
    assert_eq!(klnos(&listing), vec!["KL-003"]);

    listing.clear_search();
    assert!(listing.pagination_enabled());
    listing.load(&store).await;
    assert_eq!(listing.page(), 1);
    assert_eq!(klnos(&listing)[0], "KL-010");

    assert!(listing.next_page());
    listing.load(&store).await;
    assert_eq!(klnos(&listing).len(), 5);
    assert!(!listing.can_next());
}

#[tokio::test]
async fn test_failed_filter_keeps_previous_results() {
    let store = two_mills();
    let mut listing = Listing::new(10);
    listing.load(&store).await;

    // the in-memory store rejects this path
    let (ticket, _) = listing.request().unwrap();
    let result = store.filter("lorryDetails.lorryNumber", "x").await;
    let outcome = listing.complete(ticket, result);
    assert!(matches!(outcome, Completion::Failed(ApiError::Status { status: 400, .. })));
    assert_eq!(klnos(&listing), vec!["A1", "A2"]);
}

#[tokio::test]
async fn test_empty_klno_never_saves() {
    let store = MemoryStore::default();

    let mut form = KiraiForm::new();
    form.set("lorryDetails.driverName", "Raju").unwrap();
    let err = form.submit(&store).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(FormError::MissingKlNo)));

    form.set("klno", "   ").unwrap();
    assert!(form.submit(&store).await.is_err());
    assert_eq!(store.saves.get(), 0);
    assert_eq!(form.get("lorryDetails.driverName"), Some("Raju"));
}

#[tokio::test]
async fn test_valid_klno_saves_exactly_once() {
    let store = MemoryStore::default();

    let mut form = KiraiForm::new();
    form.set("klno", "KL-1001").unwrap();
    let saved = form.submit(&store).await.unwrap();

    assert_eq!(saved.klno, "KL-1001");
    assert_eq!(store.saves.get(), 1);
    assert_eq!(store.records.borrow()[0].klno, "KL-1001");
}

#[tokio::test]
async fn test_malformed_number_blocks_save() {
    let store = MemoryStore::default();
    let mut form = KiraiForm::new();
    form.set("klno", "KL-1").unwrap();
    form.set("kiraiDetails.perTon", "nine fifty").unwrap();

    assert!(matches!(
        form.submit(&store).await,
        Err(SubmitError::Validation(FormError::InvalidNumber { .. }))
    ));
    assert_eq!(store.saves.get(), 0);
}

#[tokio::test]
async fn test_select_from_listing_then_view_and_print() {
    let store = two_mills();
    let mut listing = Listing::new(10);
    listing.load(&store).await;

    let mut selection = Selection::new();
    selection.select(listing.records()[1].clone());

    let rows = selection.view().unwrap();
    assert_eq!(rows[0].value, "A2");
    assert!(rows.iter().any(|r| r.label == "Rice Mill Name" && r.value == "Mill2"));

    let doc = selection.print(&PrintOptions::default()).unwrap();
    assert_eq!(doc.header.rice_mill, "Mill2");
    assert_eq!(doc.column(PrintColumn::Left).count(), 9);

    selection.close();
    assert!(selection.print(&PrintOptions::default()).is_none());
}
