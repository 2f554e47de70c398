use serde::Deserialize;
use serde_json::Value;
use tracing::{trace, warn};

use crate::core::WordCloudEntry;
use crate::error::SourceKind;

use super::tweet_counts::json_kind;

#[derive(Debug, Deserialize)]
struct RawWord {
    #[serde(alias = "word")]
    text: String,
    #[serde(alias = "weight")]
    value: f64,
}

/// Parses `[{text|word, value|weight}]` for the word-cloud widget.
///
/// Values are not interpreted beyond dropping non-finite weights.
#[must_use]
pub fn parse_word_cloud(payload: Option<&str>) -> Vec<WordCloudEntry> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    let items = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!(
                source = %SourceKind::WordCloud,
                found = json_kind(&other),
                "expected an array of words, ignoring payload"
            );
            return Vec::new();
        }
        Err(err) => {
            warn!(source = %SourceKind::WordCloud, error = %err, "malformed word-cloud payload");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawWord>(item) {
            Ok(raw) if raw.value.is_finite() => Some(WordCloudEntry {
                text: raw.text,
                weight: raw.value,
            }),
            Ok(_) => None,
            Err(err) => {
                trace!(error = %err, "skipping malformed word-cloud entry");
                None
            }
        })
        .collect()
}
