use crate::core::{CanonicalDate, CategoryDateScale, ScaleMapping};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{EventMarker, SelectionViews, TimelineEvent, place_event_markers};
use crate::interaction::{
    InteractionState, PointerResponse, SelectionCause, SelectionChange,
    marker_pointer_click, marker_pointer_move,
};
use crate::render::ChartSurface;

use super::{PredictionLookup, TimelineEngine};

impl<S: ChartSurface> TimelineEngine<S> {
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    /// Projects the current timeline's annotations through `scales`.
    ///
    /// Recomputed on every call; hosts pass the scales of the pass they are
    /// drawing or hit-testing.
    pub fn event_markers(&self, scales: &impl ScaleMapping) -> TimelineResult<Vec<EventMarker>> {
        match &self.timeline {
            Some(timeline) => place_event_markers(timeline, scales, self.config.markers),
            None => Ok(Vec::new()),
        }
    }

    /// Hover over the overlay: tooltip and pointer cursor for the first hit.
    pub fn pointer_move(
        &mut self,
        scales: &impl ScaleMapping,
        x: f64,
        y: f64,
    ) -> TimelineResult<PointerResponse> {
        let markers = self.event_markers(scales)?;
        let response = marker_pointer_move(
            &markers,
            x,
            y,
            self.config.markers.hit_radius_px,
            &self.config.tooltip,
        );
        self.interaction.on_pointer_move(x, y, response.cursor);
        Ok(response)
    }

    /// Click on the overlay. Selects the first hit marker's date, if any.
    pub fn pointer_click(
        &mut self,
        scales: &impl ScaleMapping,
        x: f64,
        y: f64,
    ) -> TimelineResult<PointerResponse> {
        let markers = self.event_markers(scales)?;
        let response = marker_pointer_click(&markers, x, y, self.config.markers.hit_radius_px);
        self.interaction.on_pointer_move(x, y, response.cursor);
        if let Some(date) = response.selection_request.clone() {
            self.apply_selection(Some(date), SelectionCause::MarkerClick);
        }
        Ok(response)
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Selects the timeline date at `index`, as resolved by the chart widget.
    pub fn click_data_point(&mut self, index: usize) -> TimelineResult<SelectionChange> {
        let date = self
            .timeline
            .as_ref()
            .and_then(|timeline| timeline.entry_at(index))
            .map(|entry| entry.date.clone())
            .ok_or_else(|| {
                TimelineError::InvalidData(format!("no timeline entry at index {index}"))
            })?;
        Ok(self.apply_selection(Some(date), SelectionCause::DataPointClick))
    }

    /// Resolves a pixel through `x_scale` and selects that date.
    ///
    /// Returns `Ok(None)` when the pixel falls outside the plotted range.
    pub fn click_data_point_at(
        &mut self,
        x_scale: &CategoryDateScale,
        x: f64,
    ) -> TimelineResult<Option<SelectionChange>> {
        match x_scale.index_at_pixel(x)? {
            Some(index) => self.click_data_point(index).map(Some),
            None => Ok(None),
        }
    }

    /// Selects `date` after normalizing it. The date need not be on the
    /// timeline; views then report unknown values.
    pub fn select_date(&mut self, date: &str) -> SelectionChange {
        self.apply_selection(Some(CanonicalDate::normalize(date)), SelectionCause::Api)
    }

    pub fn clear_selection(&mut self) -> SelectionChange {
        self.apply_selection(None, SelectionCause::Api)
    }

    /// Prediction for the selected date, or `None` when nothing is selected.
    pub fn resolve_prediction(&self, model_id: &str) -> TimelineResult<Option<PredictionLookup>> {
        self.selection
            .selected_date()
            .map(|date| self.resolve_prediction_at(date.as_str(), model_id))
            .transpose()
    }

    /// Prediction for an explicit date under the current coin.
    pub fn resolve_prediction_at(
        &self,
        date: &str,
        model_id: &str,
    ) -> TimelineResult<PredictionLookup> {
        let date = CanonicalDate::normalize(date);
        self.predictions
            .resolve(Some(self.ticket.coin.as_str()), date.as_str(), model_id)
    }

    /// Every dependent view for the current selection.
    #[must_use]
    pub fn selection_views(&self) -> Option<SelectionViews> {
        SelectionViews::derive(&self.selection_context())
    }

    fn apply_selection(
        &mut self,
        date: Option<CanonicalDate>,
        cause: SelectionCause,
    ) -> SelectionChange {
        let change = match date {
            Some(date) => self.selection.select(date, cause),
            None => self.selection.clear(cause),
        };
        self.emit_event(TimelineEvent::SelectionChanged(change.clone()));
        change
    }
}
