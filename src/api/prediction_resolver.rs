use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::PredictionRecord;
use crate::error::{TimelineError, TimelineResult};
use crate::sources::{LogLookup, PredictionLog};

/// Per-model answer for one date.
///
/// `Absent` (the log has no line for the date), `Malformed` (a line exists
/// but does not match the glyph pattern) and `SourceError` (the log itself
/// could not be loaded) stay distinct so each can be shown differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLookup {
    Found(PredictionRecord),
    Malformed { raw: String },
    Absent,
    SourceError { reason: String },
    /// The model's log has not arrived yet.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLogState {
    Pending,
    Loaded(PredictionLog),
    Failed(String),
}

/// Holds one parsed log per configured model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionResolver {
    models: IndexMap<String, ModelLogState>,
}

impl PredictionResolver {
    #[must_use]
    pub fn new<I, S>(model_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: model_ids
                .into_iter()
                .map(|id| (id.into(), ModelLogState::Pending))
                .collect(),
        }
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    #[must_use]
    pub fn state(&self, model_id: &str) -> Option<&ModelLogState> {
        self.models.get(model_id)
    }

    /// Forgets every loaded log.
    pub fn reset(&mut self) {
        for state in self.models.values_mut() {
            *state = ModelLogState::Pending;
        }
    }

    /// Stores a model's log payload, or the reason it could not be fetched.
    pub fn load(&mut self, model_id: &str, payload: Result<&str, String>) -> TimelineResult<()> {
        let state = self
            .models
            .get_mut(model_id)
            .ok_or_else(|| TimelineError::UnknownModel(model_id.to_owned()))?;
        *state = match payload {
            Ok(text) => {
                let log = PredictionLog::parse(model_id, text);
                debug!(model = model_id, entries = log.entries().len(), "loaded prediction log");
                ModelLogState::Loaded(log)
            }
            Err(reason) => {
                warn!(model = model_id, reason = %reason, "prediction log unavailable");
                ModelLogState::Failed(reason)
            }
        };
        Ok(())
    }

    pub fn resolve(
        &self,
        coin: Option<&str>,
        date: &str,
        model_id: &str,
    ) -> TimelineResult<PredictionLookup> {
        let state = self
            .models
            .get(model_id)
            .ok_or_else(|| TimelineError::UnknownModel(model_id.to_owned()))?;
        Ok(match state {
            ModelLogState::Pending => PredictionLookup::Pending,
            ModelLogState::Failed(reason) => PredictionLookup::SourceError {
                reason: reason.clone(),
            },
            ModelLogState::Loaded(log) => match log.lookup(coin, date) {
                LogLookup::Parsed(record) => PredictionLookup::Found(record.clone()),
                LogLookup::Unparsed(raw) => PredictionLookup::Malformed {
                    raw: raw.to_owned(),
                },
                LogLookup::Absent => PredictionLookup::Absent,
            },
        })
    }

    /// One lookup per model, in configuration order.
    #[must_use]
    pub fn resolve_all(&self, coin: Option<&str>, date: &str) -> Vec<(String, PredictionLookup)> {
        self.models
            .keys()
            .filter_map(|model_id| {
                self.resolve(coin, date, model_id)
                    .ok()
                    .map(|lookup| (model_id.clone(), lookup))
            })
            .collect()
    }
}
