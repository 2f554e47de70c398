use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CanonicalDate, Viewport};
use crate::error::{TimelineError, TimelineResult};

/// Coordinate mapping supplied by the render collaborator.
///
/// Both functions must stay stable for the duration of one draw or
/// hit-test pass.
pub trait ScaleMapping {
    fn x_for_date(&self, date: &CanonicalDate) -> TimelineResult<f64>;
    fn y_for_value(&self, value: f64) -> TimelineResult<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> TimelineResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(TimelineError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a domain value onto `[0, extent_px]`.
    pub fn domain_to_pixel(self, value: f64, extent_px: f64) -> TimelineResult<f64> {
        if !value.is_finite() {
            return Err(TimelineError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * extent_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, extent_px: f64) -> TimelineResult<f64> {
        if !pixel.is_finite() {
            return Err(TimelineError::InvalidData("pixel must be finite".to_owned()));
        }
        if !extent_px.is_finite() || extent_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "pixel extent must be finite and > 0".to_owned(),
            ));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / extent_px;
        Ok(self.domain_start + normalized * span)
    }
}

/// Category x axis: one slot per timeline date, visible window in index units.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDateScale {
    slots: IndexMap<CanonicalDate, usize>,
    len: usize,
    visible_start: f64,
    visible_end: f64,
    viewport: Viewport,
}

impl CategoryDateScale {
    pub fn new<'a>(
        dates: impl IntoIterator<Item = &'a CanonicalDate>,
        viewport: Viewport,
    ) -> TimelineResult<Self> {
        validate_viewport(viewport)?;

        let mut slots = IndexMap::new();
        let mut len = 0;
        for (index, date) in dates.into_iter().enumerate() {
            // Repeated dates keep their first slot.
            slots.entry(date.clone()).or_insert(index);
            len = index + 1;
        }
        if len == 0 {
            return Err(TimelineError::InvalidData(
                "category scale requires at least one date".to_owned(),
            ));
        }

        Ok(Self {
            slots,
            len,
            visible_start: 0.0,
            visible_end: (len - 1) as f64,
            viewport,
        })
    }

    /// Restricts the visible window, e.g. after pan or zoom.
    pub fn with_visible_range(mut self, start: f64, end: f64) -> TimelineResult<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(TimelineError::InvalidData(
                "visible index range must be finite and ordered".to_owned(),
            ));
        }
        self.visible_start = start;
        self.visible_end = end;
        Ok(self)
    }

    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn x_for_index(&self, index: f64) -> TimelineResult<f64> {
        let width = f64::from(self.viewport.width);
        if self.visible_start == self.visible_end {
            return Ok(width * 0.5);
        }
        LinearScale::new(self.visible_start, self.visible_end)?.domain_to_pixel(index, width)
    }

    /// Nearest category slot under a pixel x, `None` outside the data.
    pub fn index_at_pixel(&self, x: f64) -> TimelineResult<Option<usize>> {
        let width = f64::from(self.viewport.width);
        let logical = if self.visible_start == self.visible_end {
            self.visible_start
        } else {
            LinearScale::new(self.visible_start, self.visible_end)?.pixel_to_domain(x, width)?
        };
        let rounded = logical.round();
        if rounded < 0.0 || rounded >= self.len as f64 {
            return Ok(None);
        }
        Ok(Some(rounded as usize))
    }
}

/// Linear y axis over a value domain, pixel origin at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearValueScale {
    scale: LinearScale,
    viewport: Viewport,
}

impl LinearValueScale {
    pub fn new(value_min: f64, value_max: f64, viewport: Viewport) -> TimelineResult<Self> {
        validate_viewport(viewport)?;
        Ok(Self {
            scale: LinearScale::new(value_min, value_max)?,
            viewport,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.scale.domain()
    }

    pub fn pixel_for_value(self, value: f64) -> TimelineResult<f64> {
        let height = f64::from(self.viewport.height);
        Ok(height - self.scale.domain_to_pixel(value, height)?)
    }
}

/// Headless `ScaleMapping` built from the two axes above.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScales {
    pub x: CategoryDateScale,
    pub y: LinearValueScale,
}

impl ChartScales {
    #[must_use]
    pub fn new(x: CategoryDateScale, y: LinearValueScale) -> Self {
        Self { x, y }
    }
}

impl ScaleMapping for ChartScales {
    fn x_for_date(&self, date: &CanonicalDate) -> TimelineResult<f64> {
        let slot = self.x.slots.get(date).copied().ok_or_else(|| {
            TimelineError::InvalidData(format!("date `{date}` is not on the category axis"))
        })?;
        self.x.x_for_index(slot as f64)
    }

    fn y_for_value(&self, value: f64) -> TimelineResult<f64> {
        self.y.pixel_for_value(value)
    }
}

fn validate_viewport(viewport: Viewport) -> TimelineResult<()> {
    if !viewport.is_valid() {
        return Err(TimelineError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}
