pub mod selection;

use serde::{Deserialize, Serialize};

use crate::core::CanonicalDate;
use crate::extensions::{EventMarker, MarkerHits, hit_test_markers};

pub use selection::{SelectionCause, SelectionChange, SelectionMachine, SelectionState};

/// Cursor the render collaborator should show over the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

/// Tooltip layout tuning. Geometry is in pixels relative to the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub offset_x_px: f64,
    pub offset_y_px: f64,
    pub width_px: f64,
    pub base_height_px: f64,
    pub line_height_px: f64,
    /// Label lines wrap after this many characters.
    pub wrap_chars: usize,
    /// Shown when an event label is blank.
    pub fallback_label: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x_px: 12.0,
            offset_y_px: -30.0,
            width_px: 180.0,
            base_height_px: 40.0,
            line_height_px: 14.0,
            wrap_chars: 26,
            fallback_label: "Notable event".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub date: CanonicalDate,
    /// Date first, then the wrapped label.
    pub lines: Vec<String>,
    pub left_px: f64,
    pub top_px: f64,
    pub width_px: f64,
    pub height_px: f64,
}

/// Outcome of one pointer event over the marker overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerResponse {
    pub hits: MarkerHits,
    pub tooltip: Option<Tooltip>,
    pub cursor: CursorHint,
    /// Date the selection machine should move to.
    pub selection_request: Option<CanonicalDate>,
}

#[must_use]
pub fn build_tooltip(
    marker: &EventMarker,
    pointer_x: f64,
    pointer_y: f64,
    config: &TooltipConfig,
) -> Tooltip {
    let label = if marker.event.label.trim().is_empty() {
        config.fallback_label.as_str()
    } else {
        marker.event.label.as_str()
    };

    let mut lines = vec![marker.event.date.to_string()];
    lines.extend(wrap_text(label, config.wrap_chars));

    Tooltip {
        date: marker.event.date.clone(),
        left_px: pointer_x + config.offset_x_px,
        top_px: pointer_y + config.offset_y_px,
        width_px: config.width_px,
        height_px: config.base_height_px + config.line_height_px * (lines.len() - 1) as f64,
        lines,
    }
}

/// Hover handling: tooltip for the first hit marker and a pointer cursor.
#[must_use]
pub fn marker_pointer_move(
    markers: &[EventMarker],
    x: f64,
    y: f64,
    radius_px: f64,
    tooltip: &TooltipConfig,
) -> PointerResponse {
    let hits = hit_test_markers(markers, x, y, radius_px);
    let Some(first) = hits.first() else {
        return PointerResponse::default();
    };
    PointerResponse {
        tooltip: Some(build_tooltip(&markers[first], x, y, tooltip)),
        cursor: CursorHint::Pointer,
        selection_request: None,
        hits,
    }
}

/// Click handling: requests selection of the first hit marker's date.
#[must_use]
pub fn marker_pointer_click(
    markers: &[EventMarker],
    x: f64,
    y: f64,
    radius_px: f64,
) -> PointerResponse {
    let hits = hit_test_markers(markers, x, y, radius_px);
    let Some(first) = hits.first() else {
        return PointerResponse::default();
    };
    PointerResponse {
        tooltip: None,
        cursor: CursorHint::Pointer,
        selection_request: Some(markers[first].event.date.clone()),
        hits,
    }
}

/// Pointer state kept between events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    inside: bool,
    cursor_x: f64,
    cursor_y: f64,
    cursor_hint: CursorHint,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn cursor_hint(self) -> CursorHint {
        self.cursor_hint
    }

    #[must_use]
    pub fn pointer_inside(self) -> bool {
        self.inside
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, hint: CursorHint) {
        self.inside = true;
        self.cursor_x = x;
        self.cursor_y = y;
        self.cursor_hint = hint;
    }

    pub fn on_pointer_leave(&mut self) {
        self.inside = false;
        self.cursor_hint = CursorHint::Default;
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0_usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        // Words without break opportunities (e.g. CJK runs) split by chars.
        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(max_chars).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                lines.push(chunk.iter().collect());
            } else {
                current = chunk.iter().collect();
                current_len = chunk.len();
            }
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_text;

    #[test]
    fn wrap_breaks_on_words_then_chars() {
        assert_eq!(
            wrap_text("exchange listing announced today", 16),
            vec!["exchange listing", "announced today"]
        );
        assert_eq!(wrap_text("交易所上線公告發布", 4), vec!["交易所上", "線公告發", "布"]);
    }

    #[test]
    fn short_label_stays_on_one_line() {
        assert_eq!(wrap_text("ETF", 26), vec!["ETF"]);
    }
}
