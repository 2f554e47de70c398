use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

/// Payload kinds consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Price,
    TweetCounts,
    Events,
    WordCloud,
    PredictionLog,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::TweetCounts => "tweet-counts",
            Self::Events => "events",
            Self::WordCloud => "word-cloud",
            Self::PredictionLog => "prediction-log",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum TimelineError {
    #[error("{kind} source unavailable: {reason}")]
    SourceUnavailable { kind: SourceKind, reason: String },

    #[error("{kind} payload malformed: {reason}")]
    ParseFailure { kind: SourceKind, reason: String },

    #[error("no usable price rows for `{coin}`")]
    NoData { coin: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown prediction model `{0}`")]
    UnknownModel(String),
}
