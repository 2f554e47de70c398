use crate::error::{TimelineError, TimelineResult};
use crate::extensions::SelectionConsumer;
use crate::render::ChartSurface;

use super::TimelineEngine;

impl<S: ChartSurface> TimelineEngine<S> {
    /// Registers a selection consumer with a unique identifier.
    pub fn register_consumer(&mut self, consumer: Box<dyn SelectionConsumer>) -> TimelineResult<()> {
        let consumer_id = consumer.id().to_owned();
        if consumer_id.is_empty() {
            return Err(TimelineError::InvalidData(
                "consumer id must not be empty".to_owned(),
            ));
        }
        if self.has_consumer(&consumer_id) {
            return Err(TimelineError::InvalidData(format!(
                "consumer with id `{consumer_id}` is already registered"
            )));
        }
        self.consumers.push(consumer);
        Ok(())
    }

    /// Unregisters a consumer by id. Returns `true` when removed.
    pub fn unregister_consumer(&mut self, consumer_id: &str) -> bool {
        if let Some(position) = self
            .consumers
            .iter()
            .position(|entry| entry.id() == consumer_id)
        {
            self.consumers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    #[must_use]
    pub fn has_consumer(&self, consumer_id: &str) -> bool {
        self.consumers
            .iter()
            .any(|consumer| consumer.id() == consumer_id)
    }
}
