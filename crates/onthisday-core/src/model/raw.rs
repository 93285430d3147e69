//! Two-stage decode of the API payload.
//!
//! Stage one deserializes into loosely typed `RawDay`/`RawEvent` values that
//! mirror the wire shape. Stage two (`TryFrom`) validates and normalizes them
//! into [`Day`]/[`Event`], dropping link entries that are incomplete or carry
//! an unparseable URL.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use super::types::{Day, Event, EventLink, EventType, UNKNOWN_YEAR};
use crate::error::{OnThisDayError, Result};

/// Literal separator between year and description in event text.
pub const YEAR_SEPARATOR: &str = " &#8211; ";

/// Link sub-key holding the URL.
const LINK_URL_KEY: &str = "1";
/// Link sub-key holding the display title.
const LINK_TITLE_KEY: &str = "2";

/// Wire shape of one day.
#[derive(Debug, Deserialize)]
pub struct RawDay {
    pub date: String,
    pub data: HashMap<String, Vec<RawEvent>>,
}

/// Wire shape of one event. `links` maps arbitrary keys to positional
/// sub-objects; it is kept untyped until validation.
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub text: String,
    pub links: Map<String, Value>,
}

/// Decode one day's payload bytes.
pub fn decode_day(bytes: &[u8]) -> Result<Day> {
    let raw: RawDay = serde_json::from_slice(bytes)?;
    Day::try_from(raw)
}

/// Split `"<year> &#8211; <text>"` into its parts.
///
/// Only an exact two-way split with a non-empty description counts as dated;
/// anything else keeps the whole string as text under the `"?"` year.
pub fn split_year(raw: &str) -> (String, String) {
    let parts: Vec<&str> = raw.split(YEAR_SEPARATOR).collect();
    match parts.as_slice() {
        [year, text] if !text.is_empty() => (year.to_string(), text.to_string()),
        _ => (UNKNOWN_YEAR.to_string(), raw.to_string()),
    }
}

/// Extract the valid links from a raw `links` map.
pub fn extract_links(links: &Map<String, Value>) -> Vec<EventLink> {
    links
        .values()
        .filter_map(|entry| {
            let entry = entry.as_object()?;
            let address = entry.get(LINK_URL_KEY)?.as_str()?;
            let title = entry.get(LINK_TITLE_KEY)?.as_str()?;
            let url = Url::parse(address).ok()?;
            Some(EventLink::new(title, url))
        })
        .collect()
}

impl TryFrom<RawEvent> for Event {
    type Error = OnThisDayError;

    fn try_from(raw: RawEvent) -> Result<Self> {
        if raw.text.trim().is_empty() {
            return Err(OnThisDayError::Decode("event has empty text".to_string()));
        }
        let (year, text) = split_year(&raw.text);
        let links = extract_links(&raw.links);
        Ok(Event::new(year, text, links))
    }
}

impl TryFrom<RawDay> for Day {
    type Error = OnThisDayError;

    fn try_from(raw: RawDay) -> Result<Self> {
        let mut data = HashMap::new();
        for (category, events) in raw.data {
            let Some(kind) = EventType::from_label(&category) else {
                tracing::debug!(category = %category, "ignoring unknown category");
                continue;
            };
            let events = events
                .into_iter()
                .map(Event::try_from)
                .collect::<Result<Vec<_>>>()?;
            data.insert(kind, events);
        }
        Ok(Day::new(raw.date, data))
    }
}
