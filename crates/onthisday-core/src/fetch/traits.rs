//! Day source trait definition.
//!
//! `DaySource` is the seam between the cache and the network. The HTTP client
//! implements it for production use; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::Day;

/// Something that can produce one day's events.
///
/// Implementations must not touch any cache; they perform one fetch per call
/// and report failures through the error taxonomy:
/// - `OnThisDayError::Network` when no response was received
/// - `OnThisDayError::BadResponse` when the status code is >= 400
/// - `OnThisDayError::Decode` when the payload does not parse
#[async_trait]
pub trait DaySource: Send + Sync {
    /// Fetch the events for `month`/`day`. Values are not range-checked.
    async fn fetch_day(&self, month: u32, day: u32) -> Result<Day>;
}
