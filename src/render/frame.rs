use serde::{Deserialize, Serialize};

use crate::core::{CanonicalDate, Timeline};
use crate::error::{TimelineError, TimelineResult};

/// Data handed to the render collaborator when a chart is (re)built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub coin: String,
    pub generation: u64,
    pub labels: Vec<CanonicalDate>,
    pub prices: Vec<f64>,
    /// Present only when tweet counts are available for the coin.
    pub tweet_bars: Option<Vec<Option<u64>>>,
    /// Shared y value for event markers.
    pub marker_value: Option<f64>,
    pub event_count: usize,
}

impl ChartFrame {
    #[must_use]
    pub fn from_timeline(
        coin: &str,
        generation: u64,
        timeline: &Timeline,
        tweets_available: bool,
        marker_value: Option<f64>,
    ) -> Self {
        let entries = timeline.entries();
        Self {
            coin: coin.to_owned(),
            generation,
            labels: entries.iter().map(|entry| entry.date.clone()).collect(),
            prices: entries.iter().map(|entry| entry.price).collect(),
            tweet_bars: tweets_available
                .then(|| entries.iter().map(|entry| entry.tweets).collect()),
            marker_value,
            event_count: timeline.event_count(),
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.labels.len() != self.prices.len() {
            return Err(TimelineError::InvalidData(
                "chart frame labels and prices must have equal length".to_owned(),
            ));
        }
        if let Some(bars) = &self.tweet_bars {
            if bars.len() != self.labels.len() {
                return Err(TimelineError::InvalidData(
                    "chart frame tweet bars must align with labels".to_owned(),
                ));
            }
        }
        if self.prices.iter().any(|price| !price.is_finite()) {
            return Err(TimelineError::InvalidData(
                "chart frame prices must be finite".to_owned(),
            ));
        }
        if self.marker_value.is_some_and(|value| !value.is_finite()) {
            return Err(TimelineError::InvalidData(
                "chart frame marker value must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
