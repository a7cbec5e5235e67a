//! # Kirai - freight-commission record client
//!
//! Kirai records one freight transaction per KL number: which rice mill and
//! dhalari were involved, the lorry, loading and weighment details, and the
//! freight charges. This crate enters new records, lists and searches stored
//! ones, and renders a single record for the screen or for print.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  KiraiForm │────▶│ KiraiRecord │────▶│ KiraiStore  │────▶│ record store │
//! │  (binder)  │     │  (models)   │     │ (ApiClient) │     │  (HTTP/JSON) │
//! └────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//!                          │                    ▲
//!                          ▼                    │
//!                   ┌─────────────┐      ┌─────────────┐
//!                   │ projections │      │   Listing   │
//!                   │ view/print  │      │ page/filter │
//!                   └─────────────┘      └─────────────┘
//!                          ▲
//!                   ┌─────────────┐
//!                   │  registry   │  field order + labels
//!                   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kirai::{ApiClient, Config, Listing, SearchField, SessionStore, view_projection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let session = SessionStore::from_config(&config)?.require()?;
//!     let store = ApiClient::new(&config)?.with_session(&session);
//!
//!     let mut listing = Listing::new(config.page_size);
//!     listing.search(SearchField::RiceMillName, "Mill2");
//!     listing.load(&store).await;
//!     for record in listing.records() {
//!         for row in view_projection(record) {
//!             println!("{}: {}", row.label, row.value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Record, party snapshots and auth payloads
//! - [`registry`] - Field order, labels and print layout
//! - [`projection`] - View, print and listing renderings
//! - [`search`] - Filter adapter and listing state
//! - [`form`] - Form binder and lookup pick lists
//! - [`api`] - Store trait and HTTP client
//! - [`session`] - Persisted login
//! - [`config`] - Environment configuration

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Static configuration
pub mod registry;

// Rendering
pub mod projection;

// Listing and entry
pub mod form;
pub mod search;

// Transport and auth state
pub mod api;
pub mod session;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ApiError,
    ClientError,
    ConfigError,
    FormError,
    SessionError,
    SubmitError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    DhalariDetails,
    KiraiDetails,
    KiraiRecord,
    LoadingDetails,
    LoginResponse,
    LorryDetails,
    Mediator,
    RiceMill,
    TransportOffice,
    User,
    WeightageDetails,
};

// =============================================================================
// Re-exports - Registry and projections
// =============================================================================

pub use registry::{registry, FieldKind, FieldRegistry};

pub use projection::{
    print_projection,
    view_projection,
    ListRow,
    PrintDocument,
    PrintOptions,
    Selection,
    ViewRow,
    LIST_HEADERS,
    NOT_AVAILABLE,
};

// =============================================================================
// Re-exports - Entry, listing and transport
// =============================================================================

pub use form::KiraiForm;
pub use search::{Completion, Listing, ListingQuery, SearchField};
pub use api::{ApiClient, KiraiStore};
pub use session::{Session, SessionStore};
pub use config::Config;
