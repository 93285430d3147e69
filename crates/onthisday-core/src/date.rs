//! Calendar day keys (month + day, no year).
//!
//! A `DateKey` is what the cache is keyed by and what the fetch client turns
//! into a request path. Its `Display` form ("September 25") matches the
//! display date derived from a day's raw API label ("September_25").

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{OnThisDayError, Result};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A month/day pair identifying one "on this day" page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateKey {
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    /// Build a key without range checks; out-of-range values reach the remote
    /// service, which rejects them.
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// The local calendar date.
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self::new(now.month(), now.day())
    }

    /// Derive a key from a day's raw API label, e.g. `"September_25"`.
    pub fn from_label(label: &str) -> Result<Self> {
        parse_month_day_words(&label.replace('_', " "))
            .ok_or_else(|| OnThisDayError::Decode(format!("Unrecognised date label: {}", label)))
    }

    /// Parse a user-supplied date.
    ///
    /// Accepts `today`, `September 25`, `Sep 25`, `September_25`, `9/25`,
    /// `09-25` and `2024-09-25`.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("today") {
            return Ok(Self::today());
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::new(date.month(), date.day()));
        }

        let parsed = parse_month_day_numeric(trimmed)
            .or_else(|| parse_month_day_words(&trimmed.replace('_', " ")));

        match parsed {
            Some(key) => Ok(key),
            None => Err(OnThisDayError::InvalidInput(format!(
                "Invalid date: {} (expected e.g. \"September 25\", \"9/25\" or \"today\")",
                value
            ))),
        }
    }

    /// Full English month name, if the month is in range.
    pub fn month_name(&self) -> Option<&'static str> {
        month_index(self.month).map(|index| MONTH_NAMES[index])
    }

    /// Whether month and day are within calendar bounds (1-12, 1-31).
    pub fn is_in_range(&self) -> bool {
        (1..=12).contains(&self.month) && (1..=31).contains(&self.day)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month_name() {
            Some(name) => write!(f, "{} {}", name, self.day),
            None => write!(f, "{}/{}", self.month, self.day),
        }
    }
}

impl FromStr for DateKey {
    type Err = OnThisDayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn month_index(month: u32) -> Option<usize> {
    if (1..=12).contains(&month) {
        Some(month as usize - 1)
    } else {
        None
    }
}

fn checked(month: u32, day: u32) -> Option<DateKey> {
    let key = DateKey::new(month, day);
    key.is_in_range().then_some(key)
}

/// `9/25` or `09-25`.
fn parse_month_day_numeric(value: &str) -> Option<DateKey> {
    let (month, day) = value.split_once('/').or_else(|| value.split_once('-'))?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    checked(month, day)
}

/// `September 25` or `Sep 25`, case-insensitive.
fn parse_month_day_words(value: &str) -> Option<DateKey> {
    let mut parts = value.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || name.len() < 3 {
        return None;
    }

    let position = MONTH_NAMES
        .iter()
        .position(|month| month.to_lowercase().starts_with(&name))?;
    checked(position as u32 + 1, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_api_label() {
        assert_eq!(DateKey::new(9, 25).to_string(), "September 25");
        assert_eq!(DateKey::new(3, 1).to_string(), "March 1");
    }

    #[test]
    fn test_display_out_of_range_falls_back_to_numbers() {
        assert_eq!(DateKey::new(13, 40).to_string(), "13/40");
    }

    #[test]
    fn test_from_label() {
        assert_eq!(DateKey::from_label("September_25").unwrap(), DateKey::new(9, 25));
        assert!(DateKey::from_label("Smarch_25").is_err());
    }

    #[test]
    fn test_parse_accepted_forms() {
        let expected = DateKey::new(9, 25);
        for input in [
            "September 25",
            "september 25",
            "Sep 25",
            "September_25",
            "9/25",
            "09-25",
            "2024-09-25",
        ] {
            assert_eq!(DateKey::parse(input).unwrap(), expected, "input {}", input);
        }
    }

    #[test]
    fn test_parse_today() {
        assert_eq!(DateKey::parse("Today").unwrap(), DateKey::today());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(DateKey::parse("13/1").is_err());
        assert!(DateKey::parse("March 32").is_err());
        assert!(DateKey::parse("0/5").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = DateKey::parse("yesterday-ish").unwrap_err();
        assert!(matches!(err, OnThisDayError::InvalidInput(_)));
        assert!(DateKey::parse("Ma 3").is_err());
    }
}
