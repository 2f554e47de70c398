use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{SourceKind, TimelineError, TimelineResult};
use crate::extensions::MarkerPlacementConfig;
use crate::interaction::TooltipConfig;

pub const COIN_PLACEHOLDER: &str = "{coin}";

/// A prediction model whose outcome log is shown in the prediction panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub id: String,
    pub display_name: String,
    pub log_path: String,
}

impl ModelSpec {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        log_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            log_path: log_path.into(),
        }
    }
}

/// Path templates for each source, relative to the host's data root.
///
/// `{coin}` is replaced with the active coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLayout {
    pub price: String,
    pub tweet_counts: String,
    pub events: String,
    pub word_cloud: String,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            price: "{coin}_price.csv".to_owned(),
            tweet_counts: "{coin}_daily_stats.json".to_owned(),
            events: "event/{coin}_events.json".to_owned(),
            word_cloud: "sample_wordcloud.json".to_owned(),
        }
    }
}

impl SourceLayout {
    /// Resolved path for a per-coin source. Prediction logs live on `ModelSpec`.
    #[must_use]
    pub fn path(&self, kind: SourceKind, coin: &str) -> Option<String> {
        let template = match kind {
            SourceKind::Price => &self.price,
            SourceKind::TweetCounts => &self.tweet_counts,
            SourceKind::Events => &self.events,
            SourceKind::WordCloud => &self.word_cloud,
            SourceKind::PredictionLog => return None,
        };
        Some(template.replace(COIN_PLACEHOLDER, coin))
    }

    fn validate(&self) -> TimelineResult<()> {
        for (template, name) in [
            (&self.price, "price"),
            (&self.tweet_counts, "tweet_counts"),
            (&self.events, "events"),
        ] {
            if !template.contains(COIN_PLACEHOLDER) {
                return Err(TimelineError::InvalidData(format!(
                    "source template `{name}` must contain `{COIN_PLACEHOLDER}`"
                )));
            }
        }
        if self.word_cloud.trim().is_empty() {
            return Err(TimelineError::InvalidData(
                "source template `word_cloud` must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep their setup in a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    #[serde(default = "default_initial_coin")]
    pub initial_coin: String,
    #[serde(default)]
    pub markers: MarkerPlacementConfig,
    #[serde(default)]
    pub tooltip: TooltipConfig,
    #[serde(default = "default_models")]
    pub models: Vec<ModelSpec>,
    #[serde(default)]
    pub sources: SourceLayout,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            initial_coin: default_initial_coin(),
            markers: MarkerPlacementConfig::default(),
            tooltip: TooltipConfig::default(),
            models: default_models(),
            sources: SourceLayout::default(),
        }
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(initial_coin: impl Into<String>) -> Self {
        Self {
            initial_coin: initial_coin.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hit_radius_px(mut self, radius_px: f64) -> Self {
        self.markers.hit_radius_px = radius_px;
        self
    }

    #[must_use]
    pub fn with_marker_headroom_ratio(mut self, ratio: f64) -> Self {
        self.markers.headroom_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_models(mut self, models: Vec<ModelSpec>) -> Self {
        self.models = models;
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: SourceLayout) -> Self {
        self.sources = sources;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.initial_coin.trim().is_empty() {
            return Err(TimelineError::InvalidData(
                "initial coin must not be empty".to_owned(),
            ));
        }
        self.markers.validate()?;
        validate_tooltip(&self.tooltip)?;
        self.sources.validate()?;

        let mut seen = HashSet::new();
        for model in &self.models {
            if model.id.trim().is_empty() {
                return Err(TimelineError::InvalidData(
                    "model id must not be empty".to_owned(),
                ));
            }
            if !seen.insert(model.id.as_str()) {
                return Err(TimelineError::InvalidData(format!(
                    "model `{}` is configured twice",
                    model.id
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse engine config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }
}

fn validate_tooltip(tooltip: &TooltipConfig) -> TimelineResult<()> {
    for (value, name) in [
        (tooltip.width_px, "width_px"),
        (tooltip.base_height_px, "base_height_px"),
        (tooltip.line_height_px, "line_height_px"),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "tooltip `{name}` must be finite and > 0"
            )));
        }
    }
    if !tooltip.offset_x_px.is_finite() || !tooltip.offset_y_px.is_finite() {
        return Err(TimelineError::InvalidData(
            "tooltip offsets must be finite".to_owned(),
        ));
    }
    if tooltip.wrap_chars == 0 {
        return Err(TimelineError::InvalidData(
            "tooltip `wrap_chars` must be > 0".to_owned(),
        ));
    }
    Ok(())
}

fn default_initial_coin() -> String {
    "PEPE".to_owned()
}

fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec::new("rf", "Random forest (RF)", "rf_result.txt"),
        ModelSpec::new("logreg", "Logistic regression (LogReg)", "logreg_result.txt"),
    ]
}
