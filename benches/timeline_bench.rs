use coin_timeline::core::{
    CanonicalDate, CategoryDateScale, ChartScales, EventAnnotation, LinearValueScale, PricePoint,
    Timeline, TweetCountMap, Viewport,
};
use coin_timeline::extensions::{
    DEFAULT_HIT_RADIUS_PX, MarkerPlacementConfig, hit_test_markers, place_event_markers,
};
use coin_timeline::sources::PredictionLog;
use chrono::{Days, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn dates(count: u64) -> Vec<CanonicalDate> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start date");
    (0..count)
        .map(|offset| {
            CanonicalDate::from(
                start
                    .checked_add_days(Days::new(offset))
                    .expect("date in range"),
            )
        })
        .collect()
}

fn sources(count: u64) -> (Vec<PricePoint>, TweetCountMap, Vec<EventAnnotation>) {
    let dates = dates(count);
    let prices = dates
        .iter()
        .enumerate()
        .map(|(i, date)| PricePoint::new(date.clone(), 1.0 + (i as f64 * 0.01).sin().abs()))
        .collect();
    let tweets = dates
        .iter()
        .step_by(2)
        .enumerate()
        .map(|(i, date)| (date.clone(), i as u64))
        .collect();
    let events = dates
        .iter()
        .step_by(25)
        .map(|date| EventAnnotation::new(date.clone(), "generated event"))
        .collect();
    (prices, tweets, events)
}

fn bench_merge_3k(c: &mut Criterion) {
    let (prices, tweets, events) = sources(3_000);

    c.bench_function("timeline_merge_3k", |b| {
        b.iter(|| {
            let _ = Timeline::merge(black_box(&prices), black_box(&tweets), black_box(&events));
        })
    });
}

fn bench_marker_hit_test_3k(c: &mut Criterion) {
    let (prices, tweets, events) = sources(3_000);
    let timeline = Timeline::merge(&prices, &tweets, &events);
    let viewport = Viewport::new(1920, 1080);
    let scales = ChartScales::new(
        CategoryDateScale::new(timeline.dates(), viewport).expect("x scale"),
        LinearValueScale::new(0.0, 2.5, viewport).expect("y scale"),
    );

    c.bench_function("marker_place_and_hit_test_3k", |b| {
        b.iter(|| {
            let markers =
                place_event_markers(&timeline, &scales, MarkerPlacementConfig::default())
                    .expect("markers");
            let _ = hit_test_markers(
                &markers,
                black_box(960.0),
                black_box(120.0),
                DEFAULT_HIT_RADIUS_PX,
            );
        })
    });
}

fn bench_prediction_log_parse(c: &mut Criterion) {
    let log: String = dates(2_000)
        .iter()
        .map(|date| format!("{date} → 預測: 🟡  真實: 🟢  結果: ✅\n"))
        .collect();

    c.bench_function("prediction_log_parse_2k", |b| {
        b.iter(|| {
            let _ = PredictionLog::parse("rf", black_box(&log));
        })
    });
}

criterion_group!(
    benches,
    bench_merge_3k,
    bench_marker_hit_test_3k,
    bench_prediction_log_parse
);
criterion_main!(benches);
