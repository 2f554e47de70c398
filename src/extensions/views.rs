//! Detail views derived from the current selection.
//!
//! Each view is rebuilt from a `SelectionContext`; none of them holds state
//! between selections.

use serde::{Deserialize, Serialize};

use crate::api::PredictionLookup;
use crate::core::{CanonicalDate, EventAnnotation, WordCloudEntry};

use super::SelectionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweetStat {
    Count(u64),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatsView {
    pub coin: String,
    pub date: CanonicalDate,
    pub price: Option<f64>,
    pub tweets: TweetStat,
}

impl DailyStatsView {
    #[must_use]
    pub fn derive(context: &SelectionContext<'_>) -> Option<Self> {
        let date = context.selection?;
        let entry = context.selected_entry();
        Some(Self {
            coin: context.coin.to_owned(),
            date: date.clone(),
            price: entry.map(|entry| entry.price),
            tweets: entry
                .and_then(|entry| entry.tweets)
                .map_or(TweetStat::Unknown, TweetStat::Count),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetailView {
    pub coin: String,
    pub date: CanonicalDate,
    pub events: Vec<EventAnnotation>,
}

impl EventDetailView {
    #[must_use]
    pub fn derive(context: &SelectionContext<'_>) -> Option<Self> {
        let date = context.selection?;
        Some(Self {
            coin: context.coin.to_owned(),
            date: date.clone(),
            events: context
                .selected_entry()
                .map(|entry| entry.events.clone())
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub model_id: String,
    pub lookup: PredictionLookup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionPanelView {
    pub coin: String,
    pub date: CanonicalDate,
    pub rows: Vec<PredictionRow>,
}

impl PredictionPanelView {
    #[must_use]
    pub fn derive(context: &SelectionContext<'_>) -> Option<Self> {
        let date = context.selection?;
        let rows = context
            .predictions
            .resolve_all(Some(context.coin), date.as_str())
            .into_iter()
            .map(|(model_id, lookup)| PredictionRow { model_id, lookup })
            .collect();
        Some(Self {
            coin: context.coin.to_owned(),
            date: date.clone(),
            rows,
        })
    }
}

/// Word-cloud terms plus the coin/date context the widget is drawn for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudView {
    pub coin: String,
    pub date: CanonicalDate,
    pub words: Vec<WordCloudEntry>,
}

impl WordCloudView {
    #[must_use]
    pub fn derive(context: &SelectionContext<'_>) -> Option<Self> {
        let date = context.selection?;
        Some(Self {
            coin: context.coin.to_owned(),
            date: date.clone(),
            words: context.word_cloud.to_vec(),
        })
    }
}

/// All four detail panels for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionViews {
    pub daily_stats: DailyStatsView,
    pub events: EventDetailView,
    pub predictions: PredictionPanelView,
    pub word_cloud: WordCloudView,
}

impl SelectionViews {
    /// `None` while nothing is selected.
    #[must_use]
    pub fn derive(context: &SelectionContext<'_>) -> Option<Self> {
        Some(Self {
            daily_stats: DailyStatsView::derive(context)?,
            events: EventDetailView::derive(context)?,
            predictions: PredictionPanelView::derive(context)?,
            word_cloud: WordCloudView::derive(context)?,
        })
    }
}
