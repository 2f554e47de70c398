use tracing::trace;

use crate::extensions::{SelectionContext, TimelineEvent};
use crate::render::ChartSurface;

use super::TimelineEngine;

impl<S: ChartSurface> TimelineEngine<S> {
    /// Read-only view of the state consumers derive from.
    #[must_use]
    pub fn selection_context(&self) -> SelectionContext<'_> {
        SelectionContext {
            coin: &self.ticket.coin,
            generation: self.ticket.generation,
            selection: self.selection.selected_date(),
            timeline: self.timeline.as_ref(),
            word_cloud: &self.sources.word_cloud,
            predictions: &self.predictions,
        }
    }

    pub(super) fn emit_event(&mut self, event: TimelineEvent) {
        if self.consumers.is_empty() {
            return;
        }
        // Consumers are detached while notified so the context can borrow
        // the rest of the engine.
        let mut consumers = std::mem::take(&mut self.consumers);
        {
            let context = self.selection_context();
            for consumer in &mut consumers {
                trace!(consumer = consumer.id(), ?event, "notify consumer");
                consumer.on_event(&event, &context);
            }
        }
        self.consumers = consumers;
    }
}
