use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date key shared by every source, rendered as `YYYY-MM-DD`.
///
/// Inputs that parse as a calendar date are reduced to their written
/// calendar fields (no timezone conversion). Anything else is kept verbatim
/// after trimming, so pre-normalized keys round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDate(String);

impl CanonicalDate {
    /// Normalizes a date-like input. Idempotent.
    #[must_use]
    pub fn normalize(input: &str) -> Self {
        let trimmed = input.trim();
        match parse_calendar_date(trimmed) {
            Some(date) => Self::from_calendar_date(date),
            None => Self(trimmed.to_owned()),
        }
    }

    #[must_use]
    pub fn from_calendar_date(date: NaiveDate) -> Self {
        Self(date.format(CANONICAL_FORMAT).to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date behind this key, `None` for verbatim fallback keys.
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, CANONICAL_FORMAT).ok()
    }

    #[must_use]
    pub fn is_calendar_date(&self) -> bool {
        self.calendar_date().is_some()
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalDate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalDate {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(value: NaiveDate) -> Self {
        Self::from_calendar_date(value)
    }
}

impl PartialEq<str> for CanonicalDate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalDate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    if input.is_empty() {
        return None;
    }

    let date = DateTime::parse_from_rfc3339(input)
        .map(|value| value.date_naive())
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                .map(|value| value.date())
        })
        .or_else(|| parse_date_only(input))
        .or_else(|| parse_date_only(leading_date_token(input)))?;

    // Years outside four digits would not render back through the same format.
    (0..=9999).contains(&date.year()).then_some(date)
}

fn parse_date_only(input: &str) -> Option<NaiveDate> {
    if input.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

fn leading_date_token(input: &str) -> &str {
    let end = input
        .find(|c: char| c.is_whitespace() || c == 'T')
        .unwrap_or(input.len());
    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::CanonicalDate;

    #[test]
    fn timestamp_truncates_to_written_calendar_day() {
        let date = CanonicalDate::normalize("2021-04-15T23:30:00-05:00");
        assert_eq!(date.as_str(), "2021-04-15");
    }

    #[test]
    fn garbage_falls_back_to_trimmed_input() {
        let date = CanonicalDate::normalize("  week 15  ");
        assert_eq!(date.as_str(), "week 15");
        assert!(!date.is_calendar_date());
    }
}
