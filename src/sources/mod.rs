//! Parsers turning already-fetched payloads into typed series.
//!
//! Only the price parser can fail; the optional sources degrade to empty
//! results and log a diagnostic instead.

pub mod events;
pub mod prediction_log;
pub mod price;
pub mod tweet_counts;
pub mod word_cloud;

pub use events::parse_events;
pub use prediction_log::{LogEntry, LogLookup, LogOutcome, PredictionLog, SECTION_DIVIDER, parse_line};
pub use price::parse_price_series;
pub use tweet_counts::parse_tweet_counts;
pub use word_cloud::parse_word_cloud;
