use serde::{Deserialize, Serialize};

use crate::error::SourceKind;

/// Tags a fetch with the coin and generation it was issued for.
///
/// The generation increases on every coin switch; a delivery whose ticket
/// does not match the engine's current one is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub coin: String,
    pub generation: u64,
}

/// Which payload a delivery carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceRef {
    Price,
    TweetCounts,
    Events,
    WordCloud,
    PredictionLog(String),
}

impl SourceRef {
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Price => SourceKind::Price,
            Self::TweetCounts => SourceKind::TweetCounts,
            Self::Events => SourceKind::Events,
            Self::WordCloud => SourceKind::WordCloud,
            Self::PredictionLog(_) => SourceKind::PredictionLog,
        }
    }

    /// Sources that feed the merged timeline.
    #[must_use]
    pub fn feeds_timeline(&self) -> bool {
        matches!(self, Self::Price | Self::TweetCounts | Self::Events)
    }
}

/// One fetch the host should perform for the current ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRequest {
    pub source: SourceRef,
    pub path: String,
}

/// Everything needed to load one coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRequest {
    pub ticket: RequestTicket,
    pub requests: Vec<SourceRequest>,
}

/// What happened to a delivered payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    Applied,
    /// Issued for an abandoned coin or generation; discarded.
    Stale,
}
