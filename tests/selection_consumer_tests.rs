use std::cell::RefCell;
use std::rc::Rc;

use coin_timeline::api::{PredictionLookup, SourceRef, TimelineEngine, TimelineEngineConfig};
use coin_timeline::core::{CanonicalDate, CategoryDateScale, ChartScales, LinearValueScale, Viewport};
use coin_timeline::extensions::{
    DailyStatsView, SelectionConsumer, SelectionContext, TimelineEvent, TweetStat,
};
use coin_timeline::interaction::{CursorHint, SelectionCause, SelectionState};
use coin_timeline::render::NullSurface;

#[derive(Debug, Clone, PartialEq)]
struct Notification {
    event: TimelineEvent,
    selection: Option<CanonicalDate>,
    stats: Option<DailyStatsView>,
}

struct RecordingConsumer {
    id: String,
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingConsumer {
    fn new(id: impl Into<String>, seen: Rc<RefCell<Vec<Notification>>>) -> Self {
        Self { id: id.into(), seen }
    }
}

impl SelectionConsumer for RecordingConsumer {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &TimelineEvent, context: &SelectionContext<'_>) {
        self.seen.borrow_mut().push(Notification {
            event: event.clone(),
            selection: context.selection.cloned(),
            stats: DailyStatsView::derive(context),
        });
    }
}

fn loaded_engine() -> TimelineEngine<NullSurface> {
    let mut engine = TimelineEngine::new(NullSurface::default(), TimelineEngineConfig::default())
        .expect("engine init");
    let ticket = engine.ticket().clone();
    engine
        .deliver(
            &ticket,
            SourceRef::Price,
            Ok("date,price\n2021-04-13,1\n2021-04-14,2\n2021-04-15,3\n".to_owned()),
        )
        .expect("price");
    engine
        .deliver(&ticket, SourceRef::TweetCounts, Ok(r#"{"2021-04-14": 50}"#.to_owned()))
        .expect("tweets");
    engine
        .deliver(
            &ticket,
            SourceRef::Events,
            Ok(r#"[{"date": "2021-04-15", "event": "Listing", "content": "Major exchange"}]"#.to_owned()),
        )
        .expect("events");
    engine
}

fn selection_changes(seen: &[Notification]) -> Vec<(SelectionState, SelectionCause)> {
    seen.iter()
        .filter_map(|notification| match &notification.event {
            TimelineEvent::SelectionChanged(change) => Some((change.current.clone(), change.cause)),
            TimelineEvent::DataRefreshed { .. } => None,
        })
        .collect()
}

#[test]
fn every_transition_notifies_every_consumer() {
    let mut engine = loaded_engine();
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_consumer(Box::new(RecordingConsumer::new("daily-stats", first.clone())))
        .expect("register first");
    engine
        .register_consumer(Box::new(RecordingConsumer::new("prediction-panel", second.clone())))
        .expect("register second");

    engine.select_date("2021-04-14");
    engine.select_date("2021-04-14");
    engine.clear_selection();

    for seen in [&first, &second] {
        let changes = selection_changes(&seen.borrow());
        assert_eq!(
            changes,
            [
                (SelectionState::Selected("2021-04-14".into()), SelectionCause::Api),
                (SelectionState::Selected("2021-04-14".into()), SelectionCause::Api),
                (SelectionState::Unselected, SelectionCause::Api),
            ]
        );
    }
}

#[test]
fn consumers_derive_views_from_the_new_selection() {
    let mut engine = loaded_engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_consumer(Box::new(RecordingConsumer::new("daily-stats", seen.clone())))
        .expect("register");

    engine.select_date("2021/04/14");
    engine.select_date("2021-04-15");

    let seen = seen.borrow();
    let first = seen[0].stats.clone().expect("stats for 04-14");
    assert_eq!(first.date, "2021-04-14");
    assert_eq!(first.price, Some(2.0));
    assert_eq!(first.tweets, TweetStat::Count(50));

    let second = seen[1].stats.clone().expect("stats for 04-15");
    assert_eq!(second.tweets, TweetStat::Unknown);
    assert_eq!(seen[1].selection, Some("2021-04-15".into()));
}

#[test]
fn coin_switch_forces_a_clear_notification() {
    let mut engine = loaded_engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_consumer(Box::new(RecordingConsumer::new("word-cloud", seen.clone())))
        .expect("register");

    engine.select_date("2021-04-15");
    engine.switch_coin("DOGE").expect("switch");

    let changes = selection_changes(&seen.borrow());
    assert_eq!(changes.last(), Some(&(SelectionState::Unselected, SelectionCause::CoinSwitch)));
    let last = seen.borrow().last().cloned().expect("notification");
    assert_eq!(last.selection, None);
    assert_eq!(last.stats, None);
}

#[test]
fn deliveries_emit_data_refreshed() {
    let mut engine = TimelineEngine::new(NullSurface::default(), TimelineEngineConfig::default())
        .expect("engine init");
    let seen = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_consumer(Box::new(RecordingConsumer::new("events", seen.clone())))
        .expect("register");
    let ticket = engine.ticket().clone();

    engine
        .deliver(&ticket, SourceRef::Events, Ok("[]".to_owned()))
        .expect("events");

    assert_eq!(
        seen.borrow()[0].event,
        TimelineEvent::DataRefreshed {
            source: coin_timeline::error::SourceKind::Events
        }
    );
}

#[test]
fn marker_click_selects_the_event_date() {
    let mut engine = loaded_engine();
    let timeline = engine.timeline().expect("timeline");
    let viewport = Viewport::new(800, 400);
    let scales = ChartScales::new(
        CategoryDateScale::new(timeline.dates(), viewport).expect("x scale"),
        LinearValueScale::new(0.0, 4.0, viewport).expect("y scale"),
    );
    let marker = engine.event_markers(&scales).expect("markers")[0].clone();

    let hover = engine
        .pointer_move(&scales, marker.x - 4.0, marker.y + 4.0)
        .expect("hover");
    assert_eq!(hover.cursor, CursorHint::Pointer);
    assert_eq!(engine.interaction_state().cursor_hint(), CursorHint::Pointer);
    assert!(hover.tooltip.is_some());
    assert!(engine.selected_date().is_none());

    let click = engine
        .pointer_click(&scales, marker.x, marker.y)
        .expect("click");
    assert_eq!(click.selection_request, Some("2021-04-15".into()));
    assert_eq!(engine.selected_date(), Some(&"2021-04-15".into()));

    engine.pointer_leave();
    assert!(!engine.interaction_state().pointer_inside());
}

#[test]
fn data_point_clicks_select_by_category_index() {
    let mut engine = loaded_engine();
    let change = engine.click_data_point(1).expect("index 1");
    assert_eq!(change.cause, SelectionCause::DataPointClick);
    assert_eq!(change.current, SelectionState::Selected("2021-04-14".into()));
    assert!(engine.click_data_point(9).is_err());

    let x_scale = CategoryDateScale::new(
        engine.timeline().expect("timeline").dates(),
        Viewport::new(800, 400),
    )
    .expect("x scale");
    let change = engine
        .click_data_point_at(&x_scale, 790.0)
        .expect("pixel click")
        .expect("inside data");
    assert_eq!(change.previous, SelectionState::Selected("2021-04-14".into()));
    assert_eq!(engine.selected_date(), Some(&"2021-04-15".into()));
}

#[test]
fn selection_views_bundle_every_panel() {
    let mut engine = loaded_engine();
    let ticket = engine.ticket().clone();
    engine
        .deliver(&ticket, SourceRef::PredictionLog("rf".to_owned()), Ok("2021-04-15 🟡 🟢 ✅".to_owned()))
        .expect("rf log");
    engine
        .deliver(&ticket, SourceRef::PredictionLog("logreg".to_owned()), Err("missing".to_owned()))
        .expect("logreg log");
    engine
        .deliver(&ticket, SourceRef::WordCloud, Ok(r#"[{"word": "moon", "weight": 9}]"#.to_owned()))
        .expect("word cloud");

    assert!(engine.selection_views().is_none());
    assert_eq!(engine.resolve_prediction("rf").expect("rf"), None);

    engine.select_date("2021-04-15");
    let views = engine.selection_views().expect("views");

    assert_eq!(views.daily_stats.price, Some(3.0));
    assert_eq!(views.events.events.len(), 1);
    assert_eq!(views.events.events[0].detail.as_deref(), Some("Major exchange"));
    assert_eq!(views.word_cloud.words[0].text, "moon");
    assert_eq!(views.word_cloud.coin, "PEPE");
    assert_eq!(views.predictions.rows.len(), 2);
    assert!(matches!(views.predictions.rows[0].lookup, PredictionLookup::Found(_)));
    assert_eq!(
        views.predictions.rows[1].lookup,
        PredictionLookup::SourceError {
            reason: "missing".to_owned()
        }
    );
    assert!(matches!(
        engine.resolve_prediction("rf").expect("rf"),
        Some(PredictionLookup::Found(_))
    ));
}

#[test]
fn consumer_ids_must_be_unique_and_non_empty() {
    let mut engine = loaded_engine();
    let seen = Rc::new(RefCell::new(Vec::new()));

    assert!(
        engine
            .register_consumer(Box::new(RecordingConsumer::new("", seen.clone())))
            .is_err()
    );
    engine
        .register_consumer(Box::new(RecordingConsumer::new("panel", seen.clone())))
        .expect("register");
    assert!(
        engine
            .register_consumer(Box::new(RecordingConsumer::new("panel", seen.clone())))
            .is_err()
    );
    assert_eq!(engine.consumer_count(), 1);
    assert!(engine.has_consumer("panel"));
    assert!(engine.unregister_consumer("panel"));
    assert!(!engine.unregister_consumer("panel"));

    engine.select_date("2021-04-13");
    assert!(seen.borrow().is_empty());
}
