use serde::Deserialize;
use serde_json::Value;
use tracing::{trace, warn};

use crate::core::{CanonicalDate, EventAnnotation};
use crate::error::SourceKind;

use super::tweet_counts::json_kind;

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Parses an array of `{date, event, content?, link?}` records.
///
/// An absent source is an empty list. Records without a date or an event
/// label are skipped; the rest keep source order. Empty `content`/`link`
/// strings count as missing.
#[must_use]
pub fn parse_events(payload: Option<&str>) -> Vec<EventAnnotation> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    let items = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!(
                source = %SourceKind::Events,
                found = json_kind(&other),
                "expected an array of events, ignoring payload"
            );
            return Vec::new();
        }
        Err(err) => {
            warn!(source = %SourceKind::Events, error = %err, "malformed event payload");
            return Vec::new();
        }
    };

    let mut events = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawEvent>(item) {
            Ok(raw) => raw,
            Err(err) => {
                trace!(index, error = %err, "skipping malformed event record");
                continue;
            }
        };
        match annotation(raw) {
            Some(event) => events.push(event),
            None => trace!(index, "skipping event record without date or label"),
        }
    }
    events
}

fn annotation(raw: RawEvent) -> Option<EventAnnotation> {
    let date = non_empty(raw.date)?;
    let label = non_empty(raw.event)?;
    Some(EventAnnotation {
        date: CanonicalDate::normalize(&date),
        label,
        detail: non_empty(raw.content),
        link: non_empty(raw.link),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
