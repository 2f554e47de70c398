use crate::error::TimelineResult;
use crate::render::{ChartFrame, ChartSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullChartHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Built(NullChartHandle),
    TornDown(NullChartHandle),
}

/// No-op surface used by tests and headless engine usage.
///
/// It still validates frames and records the build/teardown sequence so
/// tests can check that a handle is always released before the next one.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub events: Vec<SurfaceEvent>,
    pub last_frame: Option<ChartFrame>,
    next_id: u64,
    live: usize,
}

impl NullSurface {
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.live
    }
}

impl ChartSurface for NullSurface {
    type Handle = NullChartHandle;

    fn build(&mut self, frame: &ChartFrame) -> TimelineResult<Self::Handle> {
        frame.validate()?;
        self.next_id += 1;
        let handle = NullChartHandle(self.next_id);
        self.live += 1;
        self.events.push(SurfaceEvent::Built(handle));
        self.last_frame = Some(frame.clone());
        Ok(handle)
    }

    fn teardown(&mut self, handle: Self::Handle) {
        self.live = self.live.saturating_sub(1);
        self.events.push(SurfaceEvent::TornDown(handle));
    }
}
