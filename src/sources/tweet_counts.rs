use serde_json::Value;
use tracing::{trace, warn};

use crate::core::{CanonicalDate, TweetCountMap};
use crate::error::SourceKind;

/// Parses a flat `{"YYYY-MM-DD": count}` object.
///
/// Never fails: an absent or malformed payload yields an empty map, which
/// callers read as "feature unavailable". Individual entries that are not
/// non-negative integers are skipped.
#[must_use]
pub fn parse_tweet_counts(payload: Option<&str>) -> TweetCountMap {
    let Some(payload) = payload else {
        return TweetCountMap::new();
    };

    let object = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            warn!(
                source = %SourceKind::TweetCounts,
                found = json_kind(&other),
                "expected a date-keyed object, treating tweet counts as unavailable"
            );
            return TweetCountMap::new();
        }
        Err(err) => {
            warn!(
                source = %SourceKind::TweetCounts,
                error = %err,
                "malformed payload, treating tweet counts as unavailable"
            );
            return TweetCountMap::new();
        }
    };

    let mut counts = TweetCountMap::new();
    for (key, value) in object {
        match count_value(&value) {
            Some(count) => {
                counts.insert(CanonicalDate::normalize(&key), count);
            }
            None => trace!(date = %key, "skipping non-integer tweet count"),
        }
    }
    counts
}

fn count_value(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    // Some exporters write counts as `12.0`.
    value
        .as_f64()
        .filter(|count| count.is_finite() && *count >= 0.0 && count.fract() == 0.0)
        .map(|count| count as u64)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
