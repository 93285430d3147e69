//! Domain types for one day of historical events.
//!
//! These are the normalized forms produced by the validating transform in
//! [`super::raw`]; nothing here knows about the API's loose JSON shape.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::date::DateKey;
use crate::error::{OnThisDayError, Result};

/// Sentinel year for events whose text carried no year prefix.
pub const UNKNOWN_YEAR: &str = "?";

/// Event category, one per key of a day's `data` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Events,
    Births,
    Deaths,
}

impl EventType {
    /// All categories, in union order.
    pub const ALL: [EventType; 3] = [EventType::Events, EventType::Births, EventType::Deaths];

    /// Display label, which is also the payload's category key.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Events => "Events",
            EventType::Births => "Births",
            EventType::Deaths => "Deaths",
        }
    }

    /// Map a payload category key to its type.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = OnThisDayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "event" | "events" => Ok(EventType::Events),
            "birth" | "births" => Ok(EventType::Births),
            "death" | "deaths" => Ok(EventType::Deaths),
            other => Err(OnThisDayError::InvalidInput(format!(
                "Unknown category: {} (use events, births or deaths)",
                other
            ))),
        }
    }
}

/// A titled link related to an event.
#[derive(Debug, Clone, Serialize)]
pub struct EventLink {
    pub id: Uuid,
    pub title: String,
    pub url: Url,
}

impl EventLink {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url,
        }
    }
}

/// Identity is excluded: two links are equal when they point at the same
/// place with the same title.
impl PartialEq for EventLink {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.url == other.url
    }
}

impl Eq for EventLink {}

/// One historical event, birth or death.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: Uuid,
    /// Year as published, or `"?"` when the text had no year prefix
    pub year: String,
    /// Description with the year prefix stripped
    pub text: String,
    /// Related links; order carries no meaning
    pub links: Vec<EventLink>,
}

impl Event {
    pub fn new(year: impl Into<String>, text: impl Into<String>, links: Vec<EventLink>) -> Self {
        Self {
            id: Uuid::new_v4(),
            year: year.into(),
            text: text.into(),
            links,
        }
    }

    /// Whether the event carried a year prefix.
    pub fn is_dated(&self) -> bool {
        self.year != UNKNOWN_YEAR
    }

    /// Numeric year for sorting: `"1969"` is 1969, `"44 BC"` is -44.
    pub fn year_value(&self) -> Option<i64> {
        let mut parts = self.year.split_whitespace();
        let number: i64 = parts.next()?.parse().ok()?;
        match parts.next().map(|era| era.to_ascii_uppercase()) {
            None => Some(number),
            Some(era) if era == "AD" || era == "CE" => Some(number),
            Some(era) if era == "BC" || era == "BCE" => Some(-number),
            Some(_) => None,
        }
    }

    fn sorted_links(&self) -> Vec<(&str, &str)> {
        let mut links: Vec<(&str, &str)> = self
            .links
            .iter()
            .map(|link| (link.url.as_str(), link.title.as_str()))
            .collect();
        links.sort_unstable();
        links
    }
}

/// Structural equality: identity is ignored and links compare as a set.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year
            && self.text == other.text
            && self.sorted_links() == other.sorted_links()
    }
}

impl Eq for Event {}

/// One day's worth of events, grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    /// Raw API label, e.g. `"September_25"`
    pub date: String,
    /// Events per category, in API order
    pub data: HashMap<EventType, Vec<Event>>,
}

impl Day {
    pub fn new(date: impl Into<String>, data: HashMap<EventType, Vec<Event>>) -> Self {
        Self {
            date: date.into(),
            data,
        }
    }

    /// Display form of the date label: underscores become spaces.
    pub fn display_date(&self) -> String {
        self.date.replace('_', " ")
    }

    /// Cache key derived from the date label.
    pub fn key(&self) -> Result<DateKey> {
        DateKey::from_label(&self.date)
    }

    /// Events of one category; an absent category is empty.
    pub fn events(&self, kind: EventType) -> &[Event] {
        self.data.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of events across all categories.
    pub fn total(&self) -> usize {
        EventType::ALL.iter().map(|kind| self.events(*kind).len()).sum()
    }
}
