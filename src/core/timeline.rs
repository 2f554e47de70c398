use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CanonicalDate, EventAnnotation, PricePoint, TweetCountMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: CanonicalDate,
    pub price: f64,
    /// `None` when the tweet source has no entry for this date.
    pub tweets: Option<u64>,
    pub events: Vec<EventAnnotation>,
}

/// Counts of source entries that the left join dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub discarded_tweet_dates: usize,
    pub discarded_events: usize,
    pub repeated_price_dates: usize,
}

/// Price-anchored join of every source onto one date axis.
///
/// The axis is exactly the price series, in source order. Tweet counts and
/// events only annotate dates that already exist there; entries for any
/// other date are discarded because the chart's x domain is fixed by price
/// data. When the price series repeats a date, tweet counts attach to every
/// occurrence and events attach to the first one only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    first_slot: IndexMap<CanonicalDate, usize>,
}

impl Timeline {
    #[must_use]
    pub fn merge(
        prices: &[PricePoint],
        tweets: &TweetCountMap,
        events: &[EventAnnotation],
    ) -> Self {
        Self::merge_with_report(prices, tweets, events).0
    }

    #[must_use]
    pub fn merge_with_report(
        prices: &[PricePoint],
        tweets: &TweetCountMap,
        events: &[EventAnnotation],
    ) -> (Self, MergeReport) {
        let mut report = MergeReport::default();
        let mut first_slot = IndexMap::with_capacity(prices.len());
        let mut entries = Vec::with_capacity(prices.len());

        for (index, point) in prices.iter().enumerate() {
            if first_slot.contains_key(&point.date) {
                report.repeated_price_dates += 1;
            } else {
                first_slot.insert(point.date.clone(), index);
            }
            entries.push(TimelineEntry {
                date: point.date.clone(),
                price: point.price,
                tweets: tweets.get(point.date.as_str()),
                events: Vec::new(),
            });
        }

        report.discarded_tweet_dates = tweets
            .iter()
            .filter(|(date, _)| !first_slot.contains_key(*date))
            .count();

        for event in events {
            let date = CanonicalDate::normalize(event.date.as_str());
            match first_slot.get(&date) {
                Some(&slot) => {
                    let mut event = event.clone();
                    event.date = date;
                    entries[slot].events.push(event);
                }
                None => report.discarded_events += 1,
            }
        }

        debug!(
            dates = entries.len(),
            discarded_tweet_dates = report.discarded_tweet_dates,
            discarded_events = report.discarded_events,
            repeated_price_dates = report.repeated_price_dates,
            "merged timeline"
        );

        (
            Self {
                entries,
                first_slot,
            },
            report,
        )
    }

    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, date: &str) -> bool {
        self.first_slot.contains_key(date)
    }

    #[must_use]
    pub fn position(&self, date: &str) -> Option<usize> {
        self.first_slot.get(date).copied()
    }

    /// First entry for `date`.
    #[must_use]
    pub fn get(&self, date: &str) -> Option<&TimelineEntry> {
        self.position(date).map(|slot| &self.entries[slot])
    }

    #[must_use]
    pub fn entry_at(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    pub fn dates(&self) -> impl Iterator<Item = &CanonicalDate> {
        self.entries.iter().map(|entry| &entry.date)
    }

    #[must_use]
    pub fn max_price(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| OrderedFloat(entry.price))
            .max()
            .map(OrderedFloat::into_inner)
    }

    #[must_use]
    pub fn min_price(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| OrderedFloat(entry.price))
            .min()
            .map(OrderedFloat::into_inner)
    }

    /// Every annotation in timeline order, source order within a date.
    pub fn events(&self) -> impl Iterator<Item = &EventAnnotation> {
        self.entries.iter().flat_map(|entry| entry.events.iter())
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.events.len()).sum()
    }
}
