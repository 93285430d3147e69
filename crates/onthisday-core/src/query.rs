//! Query and filter logic.
//!
//! Pure derivations from cached days to the list the presentation layer
//! shows. Nothing here performs I/O or touches shared state, so callers can
//! recompute on every selection change.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::date::DateKey;
use crate::model::{Day, Event, EventType};

/// Selection driving a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Category to show; `None` means all categories combined
    pub event_type: Option<EventType>,

    /// Day to read; `None` means the caller's default date
    pub date: Option<DateKey>,

    /// Case-insensitive substring filter on event text; empty means no filter
    pub search: String,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, kind: EventType) -> Self {
        self.event_type = Some(kind);
        self
    }

    pub fn all_types(mut self) -> Self {
        self.event_type = None;
        self
    }

    pub fn date(mut self, date: DateKey) -> Self {
        self.date = Some(date);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }
}

/// Per-category counts for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub events: usize,
    pub births: usize,
    pub deaths: usize,
}

impl CategoryTotals {
    pub fn get(&self, kind: EventType) -> usize {
        match kind {
            EventType::Events => self.events,
            EventType::Births => self.births,
            EventType::Deaths => self.deaths,
        }
    }

    pub fn total(&self) -> usize {
        self.events + self.births + self.deaths
    }
}

/// Column to sort a result list by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Year,
    Text,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Sort order for table views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Whether an event's text contains `needle` (already lowercased).
fn matches_search(event: &Event, needle: &str) -> bool {
    needle.is_empty() || event.text.to_lowercase().contains(needle)
}

/// Events of `day` matching the query's category and search text.
///
/// A single category keeps its stored order. All categories are concatenated
/// as events, births, deaths.
pub fn select(day: &Day, query: &EventQuery) -> Vec<Event> {
    // Whitespace-only means no filter; otherwise the text is matched as typed.
    let needle = if query.search.trim().is_empty() {
        String::new()
    } else {
        query.search.to_lowercase()
    };
    let kinds: &[EventType] = match &query.event_type {
        Some(kind) => std::slice::from_ref(kind),
        None => &EventType::ALL,
    };

    kinds
        .iter()
        .flat_map(|kind| day.events(*kind))
        .filter(|event| matches_search(event, &needle))
        .cloned()
        .collect()
}

/// Resolve the query's day in `cache` (falling back to `default_date`) and
/// select from it. An uncached day yields nothing.
pub fn select_from(
    cache: &HashMap<DateKey, Arc<Day>>,
    default_date: DateKey,
    query: &EventQuery,
) -> Vec<Event> {
    let key = query.date.unwrap_or(default_date);
    cache
        .get(&key)
        .map(|day| select(day, query))
        .unwrap_or_default()
}

/// Number of events in one category of `day`.
pub fn count(day: &Day, kind: EventType) -> usize {
    day.events(kind).len()
}

/// Counts for all categories of `day`.
pub fn totals(day: &Day) -> CategoryTotals {
    CategoryTotals {
        events: count(day, EventType::Events),
        births: count(day, EventType::Births),
        deaths: count(day, EventType::Deaths),
    }
}

/// Stable in-place sort. Numeric years order chronologically and undated
/// events always sort last.
pub fn sort_events(events: &mut [Event], order: SortOrder) {
    events.sort_by(|a, b| {
        let ordering = match order.key {
            SortKey::Year => match (a.year_value(), b.year_value()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => a.year.cmp(&b.year),
            },
            SortKey::Text => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
        };
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(year: &str, text: &str) -> Event {
        Event::new(year, text, vec![])
    }

    fn sample_day() -> Day {
        let mut data = HashMap::new();
        data.insert(
            EventType::Events,
            vec![
                event("1969", "Moon landing by Apollo 11"),
                event("1066", "Battle of Hastings"),
                event("1492", "Columbus reaches the Americas"),
                event("1776", "Declaration signed"),
                event("1989", "Wall falls"),
            ],
        );
        data.insert(
            EventType::Births,
            vec![
                event("1920", "A distiller of moonshine"),
                event("1951", "An actor"),
                event("1564", "A playwright"),
            ],
        );
        Day::new("September_25", data)
    }

    #[test]
    fn test_single_category_keeps_order() {
        let day = sample_day();
        let births = select(&day, &EventQuery::new().event_type(EventType::Births));
        let years: Vec<&str> = births.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["1920", "1951", "1564"]);
    }

    #[test]
    fn test_union_search_is_case_insensitive() {
        let day = sample_day();
        let found = select(&day, &EventQuery::new().search("moon"));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "Moon landing by Apollo 11");
        assert_eq!(found[1].text, "A distiller of moonshine");
    }

    #[test]
    fn test_union_order_is_events_births_deaths() {
        let day = sample_day();
        let all = select(&day, &EventQuery::new());
        assert_eq!(all.len(), 8);
        assert_eq!(all[4].text, "Wall falls");
        assert_eq!(all[5].text, "A distiller of moonshine");
    }

    #[test]
    fn test_blank_search_does_not_filter() {
        let day = sample_day();
        let found = select(&day, &EventQuery::new().search("   "));
        assert_eq!(found.len(), day.total());
    }

    #[test]
    fn test_search_spaces_are_part_of_the_text() {
        let day = sample_day();
        assert!(select(&day, &EventQuery::new().search("11 ")).is_empty());
        assert!(select(&day, &EventQuery::new().search(" 1969")).is_empty());

        let found = select(&day, &EventQuery::new().search(" 11"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Moon landing by Apollo 11");
    }

    #[test]
    fn test_absent_category_selects_nothing() {
        let day = sample_day();
        assert!(select(&day, &EventQuery::new().event_type(EventType::Deaths)).is_empty());
    }

    #[test]
    fn test_select_from_uncached_date_is_empty() {
        let mut cache = HashMap::new();
        cache.insert(DateKey::new(9, 25), Arc::new(sample_day()));

        let query = EventQuery::new().date(DateKey::new(3, 1));
        assert!(select_from(&cache, DateKey::new(9, 25), &query).is_empty());

        let default_query = EventQuery::new().event_type(EventType::Births);
        assert_eq!(select_from(&cache, DateKey::new(9, 25), &default_query).len(), 3);
    }

    #[test]
    fn test_totals() {
        let totals = totals(&sample_day());
        assert_eq!(totals.events, 5);
        assert_eq!(totals.births, 3);
        assert_eq!(totals.deaths, 0);
        assert_eq!(totals.total(), 8);
        assert_eq!(totals.get(EventType::Births), 3);
    }

    #[test]
    fn test_sort_by_year_numeric_with_undated_last() {
        let mut events = vec![
            event("?", "Undated"),
            event("1969", "b"),
            event("44 BC", "a"),
            event("800", "c"),
        ];
        sort_events(&mut events, SortOrder::default());
        let years: Vec<&str> = events.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["44 BC", "800", "1969", "?"]);

        sort_events(
            &mut events,
            SortOrder::new(SortKey::Year, SortDirection::Descending),
        );
        let years: Vec<&str> = events.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["1969", "800", "44 BC", "?"]);
    }

    #[test]
    fn test_sort_by_text_ignores_case() {
        let mut events = vec![event("1", "beta"), event("2", "Alpha"), event("3", "gamma")];
        sort_events(&mut events, SortOrder::new(SortKey::Text, SortDirection::Ascending));
        let texts: Vec<&str> = events.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Alpha", "beta", "gamma"]);
    }
}
