use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{MergeReport, TimelineEntry};
use crate::interaction::SelectionState;

use super::TimelineStatus;

/// Load state of one model's prediction log, as recorded in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionSourceSummary {
    Pending,
    Loaded { entries: usize, ignored_lines: usize },
    Failed { reason: String },
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub coin: String,
    pub generation: u64,
    pub status: TimelineStatus,
    pub entries: Vec<TimelineEntry>,
    #[serde(default)]
    pub merge_report: Option<MergeReport>,
    pub tweets_available: bool,
    pub selection: SelectionState,
    #[serde(default)]
    pub prediction_sources: IndexMap<String, PredictionSourceSummary>,
}
