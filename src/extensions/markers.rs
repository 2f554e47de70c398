use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EventAnnotation, ScaleMapping, Timeline};
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_HIT_RADIUS_PX: f64 = 10.0;
pub const DEFAULT_MARKER_HEADROOM_RATIO: f64 = 1.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerPlacementConfig {
    /// Markers sit at `max(price) * headroom_ratio` so they clear the price line.
    pub headroom_ratio: f64,
    /// Pointer distance below which a marker counts as hit.
    pub hit_radius_px: f64,
}

impl Default for MarkerPlacementConfig {
    fn default() -> Self {
        Self {
            headroom_ratio: DEFAULT_MARKER_HEADROOM_RATIO,
            hit_radius_px: DEFAULT_HIT_RADIUS_PX,
        }
    }
}

impl MarkerPlacementConfig {
    pub(crate) fn validate(self) -> TimelineResult<Self> {
        for (value, name) in [
            (self.headroom_ratio, "headroom_ratio"),
            (self.hit_radius_px, "hit_radius_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "marker config `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Screen-space projection of one event annotation.
///
/// Derived on every draw or hit-test pass and never stored, since the
/// coordinates are only valid for the scales they were computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    pub event: EventAnnotation,
    /// Position of the annotated date on the timeline.
    pub timeline_index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Indices into a marker slice, in timeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerHits {
    indices: SmallVec<[usize; 4]>,
}

impl MarkerHits {
    /// Marker used for single-target actions (tooltip, click).
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Vertical value shared by every marker of a timeline, `None` when the
/// series is empty or the headroom overflows.
#[must_use]
pub fn marker_value(timeline: &Timeline, config: MarkerPlacementConfig) -> Option<f64> {
    timeline
        .max_price()
        .map(|max_price| max_price * config.headroom_ratio)
        .filter(|value| value.is_finite())
}

/// Projects every annotation of `timeline` through the supplied scales.
///
/// Output follows timeline order, and source order within a date.
pub fn place_event_markers(
    timeline: &Timeline,
    scales: &impl ScaleMapping,
    config: MarkerPlacementConfig,
) -> TimelineResult<Vec<EventMarker>> {
    let config = config.validate()?;
    let Some(value) = marker_value(timeline, config) else {
        return Ok(Vec::new());
    };
    if timeline.event_count() == 0 {
        return Ok(Vec::new());
    }

    let y = scales.y_for_value(value)?;
    let mut markers = Vec::with_capacity(timeline.event_count());
    for (timeline_index, entry) in timeline.entries().iter().enumerate() {
        if entry.events.is_empty() {
            continue;
        }
        let x = scales.x_for_date(&entry.date)?;
        for event in &entry.events {
            markers.push(EventMarker {
                event: event.clone(),
                timeline_index,
                value,
                x,
                y,
            });
        }
    }
    Ok(markers)
}

/// Returns every marker strictly closer than `radius_px` to the pointer.
#[must_use]
pub fn hit_test_markers(markers: &[EventMarker], x: f64, y: f64, radius_px: f64) -> MarkerHits {
    if !x.is_finite() || !y.is_finite() {
        return MarkerHits::default();
    }
    MarkerHits {
        indices: markers
            .iter()
            .enumerate()
            .filter(|(_, marker)| (x - marker.x).hypot(y - marker.y) < radius_px)
            .map(|(index, _)| index)
            .collect(),
    }
}
