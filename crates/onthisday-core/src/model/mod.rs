//! Event and day models.
//!
//! The API publishes one day as a loosely typed JSON object. Decoding is done
//! in two stages:
//! - **raw**: serde types mirroring the wire shape
//! - **types**: the validated domain model the rest of the crate works with

pub mod raw;
pub mod types;

pub use raw::{decode_day, split_year, RawDay, RawEvent, YEAR_SEPARATOR};
pub use types::{Day, Event, EventLink, EventType, UNKNOWN_YEAR};
