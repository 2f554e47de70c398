pub mod date;
pub mod prediction;
pub mod scale;
pub mod timeline;
pub mod types;

pub use date::CanonicalDate;
pub use prediction::{
    CORRECT_GLYPH, INCORRECT_GLYPH, PredictionClass, PredictionRecord, correctness_from_glyph,
};
pub use scale::{CategoryDateScale, ChartScales, LinearScale, LinearValueScale, ScaleMapping};
pub use timeline::{MergeReport, Timeline, TimelineEntry};
pub use types::{EventAnnotation, PricePoint, TweetCountMap, Viewport, WordCloudEntry};
