use tracing::{debug, info, warn};

use crate::core::Timeline;
use crate::error::{SourceKind, TimelineError, TimelineResult};
use crate::extensions::{TimelineEvent, marker_value};
use crate::interaction::SelectionCause;
use crate::render::{ChartFrame, ChartSurface};
use crate::sources::{parse_events, parse_price_series, parse_tweet_counts, parse_word_cloud};

use super::{
    CoinRequest, Delivery, LoadedSources, RequestTicket, SourceRef, SourceRequest, TimelineEngine,
    TimelineStatus,
};

impl<S: ChartSurface> TimelineEngine<S> {
    /// Fetches the host should run for the current ticket.
    #[must_use]
    pub fn current_request(&self) -> CoinRequest {
        let coin = self.ticket.coin.as_str();
        let layout = &self.config.sources;
        let mut requests = Vec::with_capacity(4 + self.config.models.len());
        for (source, kind) in [
            (SourceRef::Price, SourceKind::Price),
            (SourceRef::TweetCounts, SourceKind::TweetCounts),
            (SourceRef::Events, SourceKind::Events),
            (SourceRef::WordCloud, SourceKind::WordCloud),
        ] {
            if let Some(path) = layout.path(kind, coin) {
                requests.push(SourceRequest { source, path });
            }
        }
        requests.extend(self.config.models.iter().map(|model| SourceRequest {
            source: SourceRef::PredictionLog(model.id.clone()),
            path: model.log_path.clone(),
        }));

        CoinRequest {
            ticket: self.ticket.clone(),
            requests,
        }
    }

    /// Starts a new generation for `coin` and drops everything derived
    /// from the previous one.
    ///
    /// The selection is cleared, the chart handle is torn down and any
    /// response still in flight for an earlier ticket becomes stale. Passing
    /// the current coin reloads it.
    pub fn switch_coin(&mut self, coin: &str) -> TimelineResult<CoinRequest> {
        let coin = coin.trim();
        if coin.is_empty() {
            return Err(TimelineError::InvalidData(
                "coin must not be empty".to_owned(),
            ));
        }

        self.ticket = RequestTicket {
            coin: coin.to_owned(),
            generation: self.ticket.generation + 1,
        };
        info!(coin, generation = self.ticket.generation, "switch coin");

        self.sources = LoadedSources::default();
        self.timeline = None;
        self.merge_report = None;
        self.status = TimelineStatus::AwaitingPrice;
        self.predictions.reset();
        self.interaction.on_pointer_leave();
        self.chart.release(&mut self.surface);

        let change = self.selection.clear(SelectionCause::CoinSwitch);
        self.emit_event(TimelineEvent::SelectionChanged(change));

        Ok(self.current_request())
    }

    /// Applies one fetched payload, or the reason its fetch failed.
    ///
    /// Payloads whose ticket is not the current one are discarded. Optional
    /// sources degrade to unknown/empty on failure; only the price source
    /// can block the timeline.
    pub fn deliver(
        &mut self,
        ticket: &RequestTicket,
        source: SourceRef,
        payload: Result<String, String>,
    ) -> TimelineResult<Delivery> {
        if *ticket != self.ticket {
            debug!(
                coin = %ticket.coin,
                generation = ticket.generation,
                current_coin = %self.ticket.coin,
                current_generation = self.ticket.generation,
                source = %source.kind(),
                "discarding stale delivery"
            );
            return Ok(Delivery::Stale);
        }

        match &source {
            SourceRef::Price => self.apply_price(payload),
            SourceRef::TweetCounts => {
                let payload = optional_payload(SourceKind::TweetCounts, payload);
                self.sources.tweets = Some(parse_tweet_counts(payload.as_deref()));
            }
            SourceRef::Events => {
                let payload = optional_payload(SourceKind::Events, payload);
                self.sources.events = Some(parse_events(payload.as_deref()));
            }
            SourceRef::WordCloud => {
                let payload = optional_payload(SourceKind::WordCloud, payload);
                self.sources.word_cloud = parse_word_cloud(payload.as_deref());
            }
            SourceRef::PredictionLog(model_id) => {
                self.predictions.load(model_id, payload.as_deref().map_err(Clone::clone))?;
            }
        }

        if source.feeds_timeline() && self.sources.prices.is_some() {
            self.assemble_timeline()?;
        }
        self.emit_event(TimelineEvent::DataRefreshed {
            source: source.kind(),
        });
        Ok(Delivery::Applied)
    }

    fn apply_price(&mut self, payload: Result<String, String>) {
        let parsed = match payload {
            Ok(text) => parse_price_series(&self.ticket.coin, &text),
            Err(reason) => Err(TimelineError::SourceUnavailable {
                kind: SourceKind::Price,
                reason,
            }),
        };
        match parsed {
            Ok(points) => self.sources.prices = Some(points),
            Err(err) => {
                warn!(coin = %self.ticket.coin, error = %err, "price source blocks the timeline");
                self.sources.prices = None;
                self.timeline = None;
                self.merge_report = None;
                self.chart.release(&mut self.surface);
                self.status = TimelineStatus::Blocked(err);
            }
        }
    }

    /// Re-merges from whatever has arrived and rebuilds the chart.
    ///
    /// A failed rebuild blocks the timeline instead of leaving it `Ready`
    /// without a chart.
    fn assemble_timeline(&mut self) -> TimelineResult<()> {
        let Some(prices) = self.sources.prices.as_deref() else {
            return Ok(());
        };
        let empty_tweets = Default::default();
        let tweets = self.sources.tweets.as_ref().unwrap_or(&empty_tweets);
        let events = self.sources.events.as_deref().unwrap_or_default();

        let (timeline, report) = Timeline::merge_with_report(prices, tweets, events);
        let frame = ChartFrame::from_timeline(
            &self.ticket.coin,
            self.ticket.generation,
            &timeline,
            self.tweets_available(),
            marker_value(&timeline, self.config.markers),
        );

        if let Err(err) = self.chart.rebuild(&mut self.surface, &frame) {
            warn!(coin = %self.ticket.coin, error = %err, "chart rebuild failed");
            self.chart.release(&mut self.surface);
            self.timeline = None;
            self.merge_report = None;
            self.status = TimelineStatus::Blocked(err.clone());
            return Err(err);
        }

        self.timeline = Some(timeline);
        self.merge_report = Some(report);
        self.status = TimelineStatus::Ready;
        Ok(())
    }
}

fn optional_payload(kind: SourceKind, payload: Result<String, String>) -> Option<String> {
    match payload {
        Ok(text) => Some(text),
        Err(reason) => {
            warn!(source = %kind, reason = %reason, "optional source unavailable");
            None
        }
    }
}
