use serde::{Deserialize, Serialize};

use crate::api::PredictionResolver;
use crate::core::{CanonicalDate, Timeline, TimelineEntry, WordCloudEntry};
use crate::error::SourceKind;
use crate::interaction::SelectionChange;

/// Read-only state handed to selection consumers.
///
/// Consumers derive their view from this on every notification and keep no
/// selection of their own.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub coin: &'a str,
    pub generation: u64,
    pub selection: Option<&'a CanonicalDate>,
    pub timeline: Option<&'a Timeline>,
    pub word_cloud: &'a [WordCloudEntry],
    pub predictions: &'a PredictionResolver,
}

impl<'a> SelectionContext<'a> {
    /// Timeline entry for the selected date.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&'a TimelineEntry> {
        let date = self.selection?;
        self.timeline?.get(date.as_str())
    }
}

/// Event stream exposed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// Emitted for every selection transition, including coin-switch clears.
    SelectionChanged(SelectionChange),
    /// A payload for the current coin was applied.
    DataRefreshed { source: SourceKind },
}

/// Dependent view notified synchronously by the engine.
pub trait SelectionConsumer {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &TimelineEvent, context: &SelectionContext<'_>);
}
