//! Fetching days from the remote API.
//!
//! The cache depends only on the [`DaySource`] trait; [`HttpDayClient`] is
//! the production implementation. One request is issued per `(month, day)`
//! and the response is validated and decoded before it is returned.

pub mod http;
pub mod traits;

pub use http::{ClientConfig, HttpDayClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use traits::DaySource;
