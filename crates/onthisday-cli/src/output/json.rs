//! JSON output formatting for events and counts.

use onthisday_core::{CategoryTotals, DateKey, Event};

use crate::helpers::Category;

/// Convert an event to JSON for output.
pub fn event_json(event: &Event) -> serde_json::Value {
    let links: Vec<serde_json::Value> = event
        .links
        .iter()
        .map(|link| {
            serde_json::json!({
                "title": link.title,
                "url": link.url.as_str(),
            })
        })
        .collect();
    serde_json::json!({
        "id": event.id,
        "year": event.year,
        "text": event.text,
        "links": links,
    })
}

/// Convert multiple events to JSON array for output.
pub fn events_json(events: &[Event]) -> Vec<serde_json::Value> {
    events.iter().map(event_json).collect()
}

pub fn totals_json(totals: &CategoryTotals) -> serde_json::Value {
    serde_json::json!({
        "events": totals.events,
        "births": totals.births,
        "deaths": totals.deaths,
        "total": totals.total(),
    })
}

/// Full `show` document.
pub fn show_json(
    date: DateKey,
    category: Category,
    search: &str,
    events: &[Event],
    totals: &CategoryTotals,
) -> serde_json::Value {
    serde_json::json!({
        "date": date.to_string(),
        "type": category.as_str(),
        "search": search,
        "count": events.len(),
        "events": events_json(events),
        "totals": totals_json(totals),
    })
}

/// Full `counts` document.
pub fn counts_json(date: DateKey, totals: &CategoryTotals) -> serde_json::Value {
    serde_json::json!({
        "date": date.to_string(),
        "totals": totals_json(totals),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use onthisday_core::EventLink;

    fn sample() -> Event {
        let url = "https://wikipedia.org/wiki/Battle_of_Stamford_Bridge"
            .parse()
            .unwrap();
        Event::new(
            "1066",
            "The Battle of Stamford Bridge",
            vec![EventLink::new("Battle of Stamford Bridge", url)],
        )
    }

    #[test]
    fn test_event_json_shape() {
        let value = event_json(&sample());
        assert_eq!(value["year"], "1066");
        assert_eq!(value["text"], "The Battle of Stamford Bridge");
        assert_eq!(value["links"][0]["title"], "Battle of Stamford Bridge");
        assert_eq!(
            value["links"][0]["url"],
            "https://wikipedia.org/wiki/Battle_of_Stamford_Bridge"
        );
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_show_json_shape() {
        let totals = CategoryTotals {
            events: 1,
            births: 2,
            deaths: 0,
        };
        let value = show_json(
            DateKey::new(9, 25),
            Category::Events,
            "battle",
            &[sample()],
            &totals,
        );
        assert_eq!(value["date"], "September 25");
        assert_eq!(value["type"], "events");
        assert_eq!(value["search"], "battle");
        assert_eq!(value["count"], 1);
        assert_eq!(value["totals"]["total"], 3);
    }

    #[test]
    fn test_counts_json_shape() {
        let totals = CategoryTotals {
            events: 5,
            births: 3,
            deaths: 1,
        };
        let value = counts_json(DateKey::new(9, 25), &totals);
        assert_eq!(value["totals"]["events"], 5);
        assert_eq!(value["totals"]["total"], 9);
    }
}
