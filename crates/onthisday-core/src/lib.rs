//! # On This Day Core
//!
//! Core library for On This Day - historical events, births and deaths for
//! any calendar day, fetched from a remote JSON API.
//!
//! This crate provides the data model, fetching, caching and query logic
//! independent of any user interface.
//!
//! ## Architecture
//!
//! - **model**: Two-stage decode of the API payload into `Day`/`Event`
//! - **fetch**: `DaySource` trait and the HTTP client implementing it
//! - **state**: Session-scoped day cache with per-date in-flight tracking
//! - **query**: Pure filtering, counting and sorting over cached days
//! - **date**: Month/day keys and user date parsing

pub mod date;
pub mod error;
pub mod fetch;
pub mod model;
pub mod query;
pub mod state;

pub use date::DateKey;
pub use error::{OnThisDayError, Result};
pub use fetch::{ClientConfig, DaySource, HttpDayClient};
pub use model::{Day, Event, EventLink, EventType};
pub use query::{CategoryTotals, EventQuery, SortDirection, SortKey, SortOrder};
pub use state::AppState;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
