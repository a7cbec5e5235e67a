//! Record store and auth service access.
//!
//! [`KiraiStore`] is the seam used by the form binder and the listing: the
//! CLI plugs in the HTTP [`ApiClient`], tests plug in an in-memory store.
//!
//! ## Endpoints
//!
//! | Method | Path | Body / Query | Returns |
//! |--------|------|--------------|---------|
//! | POST | `/api/auth/login` | `{email, password}` | `LoginResponse` |
//! | POST | `/v1/kirai/saveKiraiDetails` | `KiraiRecord` | `KiraiRecord` |
//! | GET | `/v1/kirai/getKiraiDetails` | `page`, `size` | `[KiraiRecord]` |
//! | GET | `/v1/kirai/filter` | `fieldName`, `value` | `[KiraiRecord]` |
//! | GET | `/v1/kirai/getAllRiceMills` | - | `[RiceMill]` |
//! | GET | `/v1/kirai/getAllDhalariDetails` | - | `[DhalariDetails]` |

pub mod client;

use crate::error::ApiResult;
use crate::models::{DhalariDetails, KiraiRecord, RiceMill};

pub use client::ApiClient;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SAVE_PATH: &str = "/v1/kirai/saveKiraiDetails";
pub const LIST_PATH: &str = "/v1/kirai/getKiraiDetails";
pub const FILTER_PATH: &str = "/v1/kirai/filter";
pub const RICE_MILLS_PATH: &str = "/v1/kirai/getAllRiceMills";
pub const DHALARIS_PATH: &str = "/v1/kirai/getAllDhalariDetails";

/// Operations the client needs from the record store.
#[allow(async_fn_in_trait)]
pub trait KiraiStore {
    /// Persist a new record; returns the stored form.
    async fn save_record(&self, record: &KiraiRecord) -> ApiResult<KiraiRecord>;

    /// Zero-based page of all records.
    async fn list_page(&self, page: usize, size: usize) -> ApiResult<Vec<KiraiRecord>>;

    /// Records whose `field_name` path matches `value`.
    async fn filter(&self, field_name: &str, value: &str) -> ApiResult<Vec<KiraiRecord>>;

    async fn rice_mills(&self) -> ApiResult<Vec<RiceMill>>;

    async fn dhalaris(&self) -> ApiResult<Vec<DhalariDetails>>;
}
