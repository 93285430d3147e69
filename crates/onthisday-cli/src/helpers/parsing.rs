//! Parsing helpers for dates, categories and output format.

use std::fmt;
use std::str::FromStr;

use onthisday_core::{DateKey, EventType, OnThisDayError};
use serde::{Deserialize, Serialize};

use crate::errors::CliError;

/// A category selection: one event type, or all of them combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Events,
    Births,
    Deaths,
    All,
}

impl Category {
    /// The event type to query; `None` selects the union.
    pub fn event_type(&self) -> Option<EventType> {
        match self {
            Category::Events => Some(EventType::Events),
            Category::Births => Some(EventType::Births),
            Category::Deaths => Some(EventType::Deaths),
            Category::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Events => "events",
            Category::Births => "births",
            Category::Deaths => "deaths",
            Category::All => "all",
        }
    }
}

impl From<Option<EventType>> for Category {
    fn from(kind: Option<EventType>) -> Self {
        match kind {
            Some(EventType::Events) => Category::Events,
            Some(EventType::Births) => Category::Births,
            Some(EventType::Deaths) => Category::Deaths,
            None => Category::All,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = OnThisDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Category::All);
        }
        s.parse::<EventType>()
            .map(|kind| Category::from(Some(kind)))
            .map_err(|_| {
                OnThisDayError::InvalidInput(format!(
                    "Unknown category: {} (use events, births, deaths or all)",
                    s.trim()
                ))
            })
    }
}

/// Resolve an optional date argument, defaulting to `fallback`.
pub fn parse_date(value: Option<&str>, fallback: DateKey) -> anyhow::Result<DateKey> {
    match value {
        None => Ok(fallback),
        Some(text) => Ok(DateKey::parse(text)?),
    }
}

/// Requested output format from `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format flag value.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_forms() {
        assert_eq!("all".parse::<Category>().unwrap(), Category::All);
        assert_eq!("ALL".parse::<Category>().unwrap(), Category::All);
        assert_eq!("birth".parse::<Category>().unwrap(), Category::Births);
        assert_eq!("Deaths".parse::<Category>().unwrap(), Category::Deaths);
        assert_eq!("events".parse::<Category>().unwrap(), Category::Events);
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        let err = "holidays".parse::<Category>().unwrap_err();
        assert!(matches!(err, OnThisDayError::InvalidInput(_)));
        assert!(err.to_string().contains("holidays"));
    }

    #[test]
    fn test_category_event_type() {
        assert_eq!(Category::All.event_type(), None);
        assert_eq!(Category::Births.event_type(), Some(EventType::Births));
        assert_eq!(Category::from(None), Category::All);
    }

    #[test]
    fn test_parse_date_fallback() {
        let fallback = DateKey::new(9, 25);
        assert_eq!(parse_date(None, fallback).unwrap(), fallback);
        assert_eq!(parse_date(Some("3/1"), fallback).unwrap(), DateKey::new(3, 1));
    }

    #[test]
    fn test_parse_date_invalid_is_core_input_error() {
        let err = parse_date(Some("Smarch 40"), DateKey::new(1, 1)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OnThisDayError>(),
            Some(OnThisDayError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(
            parse_output_format(Some("plain")).unwrap(),
            Some(OutputFormat::Plain)
        );
        assert_eq!(
            parse_output_format(Some("table")).unwrap(),
            Some(OutputFormat::Table)
        );
        assert!(parse_output_format(Some("yaml")).is_err());
    }
}
