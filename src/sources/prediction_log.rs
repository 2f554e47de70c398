//! Line-oriented prediction outcome logs.
//!
//! Each outcome line carries a date token followed by three glyphs in
//! order: predicted class, actual class, correctness. Anything between the
//! tokens (arrows, labels, padding) is separator text:
//!
//! ```text
//! === DOGE ===
//! 2024-12-04 → 預測: 🟡  真實: 🟢  結果: ❌
//! ['PEPE' '2024-12-05'] → 預測: ⚪  真實: ⚪  結果: ✅
//! ```
//!
//! `=== NAME ===` dividers are not entries; they scope the lines that follow
//! to a coin. A bracketed `['COIN' 'DATE']` prefix scopes a single line.
//! Lines that only mention a date (headers, footers) are kept but lose to
//! real outcome lines on lookup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CanonicalDate, PredictionClass, PredictionRecord, correctness_from_glyph};

pub const SECTION_DIVIDER: &str = "===";

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';
const DATE_LEN: usize = 10;
const PREDICTED_LABEL: &str = "預測";
const ACTUAL_LABEL: &str = "真實";
const VERDICT_LABEL: &str = "結果";

/// Parsed form of one dated log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutcome {
    Parsed(PredictionRecord),
    /// The line has a date but not the full glyph pattern; kept verbatim.
    Unparsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Coin the line is scoped to, `None` outside any section.
    pub scope: Option<String>,
    pub date: CanonicalDate,
    /// The date opens the line, after the optional bracketed coin prefix.
    #[serde(default)]
    pub leading: bool,
    pub outcome: LogOutcome,
}

/// Result of looking a date up in one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLookup<'a> {
    Parsed(&'a PredictionRecord),
    Unparsed(&'a str),
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionLog {
    model_id: String,
    entries: Vec<LogEntry>,
    ignored_lines: usize,
}

impl PredictionLog {
    /// Parses a whole log. Never fails; lines without a date are counted
    /// in `ignored_lines` and otherwise skipped.
    #[must_use]
    pub fn parse(model_id: &str, text: &str) -> Self {
        let mut section: Option<String> = None;
        let mut entries = Vec::new();
        let mut ignored_lines = 0_usize;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix(SECTION_DIVIDER) {
                let name = rest.trim().trim_matches('=').trim();
                section = (!name.is_empty()).then(|| name.to_owned());
                continue;
            }

            match parse_line(model_id, line) {
                Some(mut entry) => {
                    if entry.scope.is_none() {
                        entry.scope.clone_from(&section);
                    }
                    if let LogOutcome::Unparsed(raw) = &entry.outcome {
                        trace!(model = model_id, line_no, raw = %raw, "unparsed prediction line");
                    }
                    entries.push(entry);
                }
                None => {
                    trace!(model = model_id, line_no, "ignoring undated log line");
                    ignored_lines += 1;
                }
            }
        }

        debug!(
            model = model_id,
            entries = entries.len(),
            ignored_lines,
            "parsed prediction log"
        );

        Self {
            model_id: model_id.to_owned(),
            entries,
            ignored_lines,
        }
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn ignored_lines(&self) -> usize {
        self.ignored_lines
    }

    fn entries_on<'a>(&'a self, date: &CanonicalDate) -> impl Iterator<Item = &'a LogEntry> {
        self.entries.iter().filter(move |entry| entry.date == *date)
    }

    /// Finds the best line for `date`.
    ///
    /// With a coin, lines scoped to that coin win over unscoped lines; lines
    /// scoped to other coins never match. Without a coin, scope is ignored.
    /// Within a tier a parsed record beats a malformed line, and a line
    /// opening with the date beats one that only mentions it; ties go to
    /// the earliest line.
    #[must_use]
    pub fn lookup(&self, coin: Option<&str>, date: &str) -> LogLookup<'_> {
        let date = CanonicalDate::normalize(date);
        let found = match coin {
            None => best_entry(self.entries_on(&date)),
            Some(coin) => best_entry(self.entries_on(&date).filter(|entry| {
                entry
                    .scope
                    .as_deref()
                    .is_some_and(|scope| scope.eq_ignore_ascii_case(coin))
            }))
            .or_else(|| best_entry(self.entries_on(&date).filter(|entry| entry.scope.is_none()))),
        };

        match found.map(|entry| &entry.outcome) {
            Some(LogOutcome::Parsed(record)) => LogLookup::Parsed(record),
            Some(LogOutcome::Unparsed(raw)) => LogLookup::Unparsed(raw),
            None => LogLookup::Absent,
        }
    }
}

fn best_entry<'a>(entries: impl Iterator<Item = &'a LogEntry>) -> Option<&'a LogEntry> {
    // `min_by_key` keeps the first of equal keys.
    entries.min_by_key(|entry| match (&entry.outcome, entry.leading) {
        (LogOutcome::Parsed(_), _) => 0_u8,
        (LogOutcome::Unparsed(_), true) => 1,
        (LogOutcome::Unparsed(_), false) => 2,
    })
}

/// Parses a single non-divider line, `None` when it carries no date.
///
/// The first `YYYY-MM-DD` run anywhere in the line is the date. When the
/// `預測` / `真實` / `結果` labels follow it, each glyph is read right after
/// its label; otherwise the first three glyphs after the date are used.
#[must_use]
pub fn parse_line(model_id: &str, line: &str) -> Option<LogEntry> {
    let line = line.trim();
    let (date_at, date_end) = find_date(line)?;
    let date = CanonicalDate::normalize(&line[date_at..date_end]);

    let head = prefix_tokens(&line[..date_at]);
    let bracketed = line.starts_with('[');
    let scope = bracketed.then(|| head.first().map(|token| (*token).to_owned())).flatten();
    let leading = head.len() <= usize::from(bracketed);

    let rest = &line[date_end..];
    let slots = labeled_slots(rest).unwrap_or_else(|| {
        let mut glyphs = glyph_runs(rest);
        [glyphs.next(), glyphs.next(), glyphs.next()]
    });

    let outcome = match slots {
        [Some(predicted), Some(actual), Some(verdict)] => match correctness_from_glyph(verdict) {
            Some(correct) => LogOutcome::Parsed(PredictionRecord {
                model_id: model_id.to_owned(),
                date: date.clone(),
                predicted: PredictionClass::from_glyph(predicted),
                actual: PredictionClass::from_glyph(actual),
                correct,
            }),
            None => LogOutcome::Unparsed(line.to_owned()),
        },
        _ => LogOutcome::Unparsed(line.to_owned()),
    };

    Some(LogEntry {
        scope,
        date,
        leading,
        outcome,
    })
}

/// Byte range of the first valid `YYYY-MM-DD` not embedded in a longer
/// digit run.
fn find_date(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    (0..bytes.len().saturating_sub(DATE_LEN - 1))
        .filter(|&at| at == 0 || !bytes[at - 1].is_ascii_digit())
        .filter(|&at| bytes.get(at + DATE_LEN).is_none_or(|b| !b.is_ascii_digit()))
        .find(|&at| {
            let window = &bytes[at..at + DATE_LEN];
            window.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            }) && std::str::from_utf8(window)
                .is_ok_and(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok())
        })
        .map(|at| (at, at + DATE_LEN))
}

fn prefix_tokens(prefix: &str) -> Vec<&str> {
    prefix
        .split(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '\'' | '"' | '(' | ')' | ','))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Glyphs anchored to their labels, `None` unless all three labels appear
/// in order.
fn labeled_slots(rest: &str) -> Option<[Option<&str>; 3]> {
    let predicted_at = rest.find(PREDICTED_LABEL)?;
    let after_predicted = predicted_at + PREDICTED_LABEL.len();
    let actual_at = after_predicted + rest[after_predicted..].find(ACTUAL_LABEL)?;
    let after_actual = actual_at + ACTUAL_LABEL.len();
    let verdict_at = after_actual + rest[after_actual..].find(VERDICT_LABEL)?;
    let after_verdict = verdict_at + VERDICT_LABEL.len();

    Some([
        glyph_runs(&rest[after_predicted..actual_at]).next(),
        glyph_runs(&rest[after_actual..verdict_at]).next(),
        glyph_runs(&rest[after_verdict..]).next(),
    ])
}

/// Splits `text` into glyph clusters, skipping separator text.
///
/// A cluster is one glyph character plus any trailing presentation
/// selectors and zero-width-joined continuations.
fn glyph_runs(text: &str) -> impl Iterator<Item = &str> {
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        let start = loop {
            let (at, c) = chars.next()?;
            if is_glyph_char(c) && c != ZERO_WIDTH_JOINER && c != EMOJI_PRESENTATION_SELECTOR {
                break at;
            }
        };
        let mut end = text.len();
        let mut joined = false;
        while let Some(&(at, c)) = chars.peek() {
            let continues = c == EMOJI_PRESENTATION_SELECTOR
                || c == ZERO_WIDTH_JOINER
                || (joined && is_glyph_char(c));
            if !continues {
                end = at;
                break;
            }
            joined = c == ZERO_WIDTH_JOINER;
            chars.next();
        }
        Some(&text[start..end])
    })
}

fn is_glyph_char(c: char) -> bool {
    if c == ZERO_WIDTH_JOINER || c == EMOJI_PRESENTATION_SELECTOR {
        return true;
    }
    !c.is_ascii() && !c.is_alphanumeric() && !is_separator_char(c)
}

/// Punctuation and arrows that only ever appear as separator text.
fn is_separator_char(c: char) -> bool {
    matches!(
        u32::from(c),
        0x00A0..=0x00BF
            | 0x2000..=0x206F
            | 0x2190..=0x21FF
            | 0x27F0..=0x27FF
            | 0x2900..=0x297F
            | 0x3000..=0x303F
            | 0xFF00..=0xFF65
    )
}
