use serde::{Deserialize, Serialize};

use crate::core::{CanonicalDate, EventAnnotation, MergeReport, PricePoint, Timeline, TweetCountMap, WordCloudEntry};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::SelectionConsumer;
use crate::interaction::{InteractionState, SelectionMachine, SelectionState};
use crate::render::{ChartResource, ChartSurface};

use super::{PredictionResolver, RequestTicket, TimelineEngineConfig};

/// Where the current coin's timeline stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimelineStatus {
    /// The mandatory price source has not resolved yet.
    AwaitingPrice,
    Ready,
    /// No timeline can be built; shown to the user as a blocking notice.
    Blocked(TimelineError),
}

/// Payloads applied for the current ticket.
///
/// `None` on an optional source means it has not resolved yet; the merge
/// treats that the same as an unavailable source.
#[derive(Debug, Clone, Default)]
pub(super) struct LoadedSources {
    pub(super) prices: Option<Vec<PricePoint>>,
    pub(super) tweets: Option<TweetCountMap>,
    pub(super) events: Option<Vec<EventAnnotation>>,
    pub(super) word_cloud: Vec<WordCloudEntry>,
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the request context, the merged timeline and the
/// selection. Consumers only ever see read-only snapshots of those.
pub struct TimelineEngine<S: ChartSurface> {
    pub(super) surface: S,
    pub(super) chart: ChartResource<S::Handle>,
    pub(super) config: TimelineEngineConfig,
    pub(super) ticket: RequestTicket,
    pub(super) sources: LoadedSources,
    pub(super) timeline: Option<Timeline>,
    pub(super) merge_report: Option<MergeReport>,
    pub(super) status: TimelineStatus,
    pub(super) selection: SelectionMachine,
    pub(super) interaction: InteractionState,
    pub(super) predictions: PredictionResolver,
    pub(super) consumers: Vec<Box<dyn SelectionConsumer>>,
}

impl<S: ChartSurface> TimelineEngine<S> {
    /// Creates an engine for `config.initial_coin` at generation 0.
    ///
    /// Call `current_request` to learn what to fetch first.
    pub fn new(surface: S, config: TimelineEngineConfig) -> TimelineResult<Self> {
        config.validate()?;
        let predictions = PredictionResolver::new(config.models.iter().map(|model| model.id.clone()));
        Ok(Self {
            surface,
            chart: ChartResource::default(),
            ticket: RequestTicket {
                coin: config.initial_coin.clone(),
                generation: 0,
            },
            config,
            sources: LoadedSources::default(),
            timeline: None,
            merge_report: None,
            status: TimelineStatus::AwaitingPrice,
            selection: SelectionMachine::default(),
            interaction: InteractionState::default(),
            predictions,
            consumers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn coin(&self) -> &str {
        &self.ticket.coin
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    #[must_use]
    pub fn ticket(&self) -> &RequestTicket {
        &self.ticket
    }

    #[must_use]
    pub fn status(&self) -> &TimelineStatus {
        &self.status
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    #[must_use]
    pub fn merge_report(&self) -> Option<MergeReport> {
        self.merge_report
    }

    /// `true` once a non-empty tweet map has arrived for the current coin.
    #[must_use]
    pub fn tweets_available(&self) -> bool {
        self.sources
            .tweets
            .as_ref()
            .is_some_and(|tweets| !tweets.is_empty())
    }

    #[must_use]
    pub fn word_cloud(&self) -> &[WordCloudEntry] {
        &self.sources.word_cloud
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn selected_date(&self) -> Option<&CanonicalDate> {
        self.selection.selected_date()
    }

    #[must_use]
    pub fn predictions(&self) -> &PredictionResolver {
        &self.predictions
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn chart_handle(&self) -> Option<&S::Handle> {
        self.chart.handle()
    }

    #[must_use]
    pub fn chart_build_count(&self) -> u64 {
        self.chart.build_count()
    }

    /// Releases the chart handle and returns the surface.
    #[must_use]
    pub fn into_surface(mut self) -> S {
        self.chart.release(&mut self.surface);
        self.surface
    }
}
