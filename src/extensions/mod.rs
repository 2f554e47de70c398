//! Overlay markers and the views that hang off the selection.

pub mod consumers;
pub mod markers;
pub mod views;

pub use consumers::{SelectionConsumer, SelectionContext, TimelineEvent};
pub use markers::{
    DEFAULT_HIT_RADIUS_PX, DEFAULT_MARKER_HEADROOM_RATIO, EventMarker, MarkerHits,
    MarkerPlacementConfig, hit_test_markers, marker_value, place_event_markers,
};
pub use views::{
    DailyStatsView, EventDetailView, PredictionPanelView, PredictionRow, SelectionViews,
    TweetStat, WordCloudView,
};
