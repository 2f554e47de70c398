use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::CanonicalDate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: CanonicalDate,
    pub price: f64,
}

impl PricePoint {
    #[must_use]
    pub fn new(date: CanonicalDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Daily tweet counts keyed by date.
///
/// A date missing from the map is "unknown", which is not the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetCountMap {
    counts: IndexMap<CanonicalDate, u64>,
}

impl TweetCountMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a count. A later entry for the same date replaces the earlier one.
    pub fn insert(&mut self, date: CanonicalDate, count: u64) -> Option<u64> {
        self.counts.insert(date, count)
    }

    #[must_use]
    pub fn get(&self, date: &str) -> Option<u64> {
        self.counts.get(date).copied()
    }

    #[must_use]
    pub fn contains(&self, date: &str) -> bool {
        self.counts.contains_key(date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalDate, u64)> {
        self.counts.iter().map(|(date, count)| (date, *count))
    }
}

impl FromIterator<(CanonicalDate, u64)> for TweetCountMap {
    fn from_iter<T: IntoIterator<Item = (CanonicalDate, u64)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAnnotation {
    pub date: CanonicalDate,
    pub label: String,
    pub detail: Option<String>,
    pub link: Option<String>,
}

impl EventAnnotation {
    #[must_use]
    pub fn new(date: CanonicalDate, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
            detail: None,
            link: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// One word-cloud term, passed through to the rendering widget untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub weight: f64,
}
