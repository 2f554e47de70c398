mod frame;
mod null_surface;

pub use frame::ChartFrame;
pub use null_surface::{NullChartHandle, NullSurface, SurfaceEvent};

use tracing::debug;

use crate::error::TimelineResult;

/// Contract implemented by the chart widget that draws the timeline.
///
/// The engine never reaches into a handle; it only asks for a new one and
/// hands old ones back for teardown.
pub trait ChartSurface {
    type Handle;

    fn build(&mut self, frame: &ChartFrame) -> TimelineResult<Self::Handle>;
    fn teardown(&mut self, handle: Self::Handle);
}

/// Owns at most one live chart handle.
#[derive(Debug)]
pub struct ChartResource<H> {
    handle: Option<H>,
    builds: u64,
}

impl<H> Default for ChartResource<H> {
    fn default() -> Self {
        Self {
            handle: None,
            builds: 0,
        }
    }
}

impl<H> ChartResource<H> {
    /// Tears the current handle down, then builds a fresh one from `frame`.
    pub fn rebuild<S>(&mut self, surface: &mut S, frame: &ChartFrame) -> TimelineResult<&H>
    where
        S: ChartSurface<Handle = H>,
    {
        frame.validate()?;
        self.release(surface);
        let handle = surface.build(frame)?;
        self.builds += 1;
        debug!(
            coin = %frame.coin,
            generation = frame.generation,
            dates = frame.labels.len(),
            "rebuilt chart"
        );
        Ok(self.handle.insert(handle))
    }

    /// Tears the current handle down without building a new one.
    pub fn release<S>(&mut self, surface: &mut S)
    where
        S: ChartSurface<Handle = H>,
    {
        if let Some(previous) = self.handle.take() {
            surface.teardown(previous);
        }
    }

    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn build_count(&self) -> u64 {
        self.builds
    }
}
