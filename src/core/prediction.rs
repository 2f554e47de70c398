use serde::{Deserialize, Serialize};

use crate::core::CanonicalDate;

const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';

pub const CORRECT_GLYPH: &str = "✅";
pub const INCORRECT_GLYPH: &str = "❌";

/// Ordinal move class emitted by the prediction models.
///
/// `Unrecognized` carries any glyph outside the five known ones so a newer
/// log format surfaces instead of being silently mapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionClass {
    BigUp,
    SmallUp,
    Flat,
    SmallDown,
    BigDown,
    Unrecognized(String),
}

impl PredictionClass {
    pub const GLYPH_TABLE: [(&'static str, PredictionClass); 5] = [
        ("🟢", PredictionClass::BigUp),
        ("🟡", PredictionClass::SmallUp),
        ("⚪", PredictionClass::Flat),
        ("🟠", PredictionClass::SmallDown),
        ("🔴", PredictionClass::BigDown),
    ];

    #[must_use]
    pub fn from_glyph(glyph: &str) -> Self {
        let glyph = strip_presentation_selector(glyph);
        Self::GLYPH_TABLE
            .iter()
            .find(|(known, _)| *known == glyph)
            .map_or_else(
                || Self::Unrecognized(glyph.to_owned()),
                |(_, class)| class.clone(),
            )
    }

    #[must_use]
    pub fn glyph(&self) -> &str {
        match self {
            Self::BigUp => "🟢",
            Self::SmallUp => "🟡",
            Self::Flat => "⚪",
            Self::SmallDown => "🟠",
            Self::BigDown => "🔴",
            Self::Unrecognized(glyph) => glyph,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BigUp => "big up",
            Self::SmallUp => "small up",
            Self::Flat => "flat",
            Self::SmallDown => "small down",
            Self::BigDown => "big down",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Maps the correctness glyph pair, `None` for anything else.
#[must_use]
pub fn correctness_from_glyph(glyph: &str) -> Option<bool> {
    match strip_presentation_selector(glyph) {
        CORRECT_GLYPH => Some(true),
        INCORRECT_GLYPH => Some(false),
        _ => None,
    }
}

pub(crate) fn strip_presentation_selector(glyph: &str) -> &str {
    glyph.trim_end_matches(EMOJI_PRESENTATION_SELECTOR)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub model_id: String,
    pub date: CanonicalDate,
    pub predicted: PredictionClass,
    pub actual: PredictionClass,
    pub correct: bool,
}

#[cfg(test)]
mod tests {
    use super::{PredictionClass, correctness_from_glyph};

    #[test]
    fn glyph_table_is_total_over_known_glyphs() {
        for (glyph, class) in PredictionClass::GLYPH_TABLE {
            assert_eq!(PredictionClass::from_glyph(glyph), class);
            assert_eq!(class.glyph(), glyph);
        }
    }

    #[test]
    fn variation_selector_is_ignored() {
        assert_eq!(PredictionClass::from_glyph("⚪\u{FE0F}"), PredictionClass::Flat);
        assert_eq!(correctness_from_glyph("✅\u{FE0F}"), Some(true));
    }

    #[test]
    fn unknown_glyph_is_kept() {
        assert_eq!(
            PredictionClass::from_glyph("🟣"),
            PredictionClass::Unrecognized("🟣".to_owned())
        );
    }
}
