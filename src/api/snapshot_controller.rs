use crate::error::{TimelineError, TimelineResult};
use crate::render::ChartSurface;

use super::{ModelLogState, PredictionSourceSummary, TimelineEngine, TimelineSnapshot};

impl<S: ChartSurface> TimelineEngine<S> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        let prediction_sources = self
            .predictions
            .model_ids()
            .filter_map(|model_id| {
                let summary = match self.predictions.state(model_id)? {
                    ModelLogState::Pending => PredictionSourceSummary::Pending,
                    ModelLogState::Loaded(log) => PredictionSourceSummary::Loaded {
                        entries: log.entries().len(),
                        ignored_lines: log.ignored_lines(),
                    },
                    ModelLogState::Failed(reason) => PredictionSourceSummary::Failed {
                        reason: reason.clone(),
                    },
                };
                Some((model_id.to_owned(), summary))
            })
            .collect();

        TimelineSnapshot {
            coin: self.ticket.coin.clone(),
            generation: self.ticket.generation,
            status: self.status.clone(),
            entries: self
                .timeline
                .as_ref()
                .map(|timeline| timeline.entries().to_vec())
                .unwrap_or_default(),
            merge_report: self.merge_report,
            tweets_available: self.tweets_available(),
            selection: self.selection.state().clone(),
            prediction_sources,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
