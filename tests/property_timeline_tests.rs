use coin_timeline::core::{
    CanonicalDate, EventAnnotation, PricePoint, ScaleMapping, Timeline, TweetCountMap,
};
use coin_timeline::extensions::{
    DEFAULT_HIT_RADIUS_PX, MarkerPlacementConfig, hit_test_markers, place_event_markers,
};
use coin_timeline::TimelineResult;
use proptest::prelude::*;

struct IdentityScales;

impl ScaleMapping for IdentityScales {
    fn x_for_date(&self, _date: &CanonicalDate) -> TimelineResult<f64> {
        Ok(100.0)
    }

    fn y_for_value(&self, _value: f64) -> TimelineResult<f64> {
        Ok(100.0)
    }
}

fn day(offset: u32) -> String {
    let month = offset / 28 + 1;
    let day = offset % 28 + 1;
    format!("2021-{month:02}-{day:02}")
}

proptest! {
    #[test]
    fn normalize_is_idempotent(input in "\\PC{0,24}") {
        let once = CanonicalDate::normalize(&input);
        let twice = CanonicalDate::normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_is_idempotent_for_date_shapes(
        year in 1970i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        separator in prop::sample::select(vec!["-", "/", "."]),
    ) {
        let input = format!("{year}{separator}{month:02}{separator}{day:02} {hour:02}:00:00");
        let once = CanonicalDate::normalize(&input);
        prop_assert!(once.is_calendar_date() || separator == ".");
        prop_assert_eq!(CanonicalDate::normalize(once.as_str()), once);
    }

    #[test]
    fn merged_dates_come_only_from_the_price_series(
        price_days in prop::collection::vec(0u32..120, 0..40),
        tweet_days in prop::collection::vec((0u32..150, 0u64..1_000), 0..40),
        event_days in prop::collection::vec(0u32..150, 0..20),
    ) {
        let prices: Vec<PricePoint> = price_days
            .iter()
            .map(|offset| PricePoint::new(day(*offset).as_str().into(), f64::from(*offset) + 1.0))
            .collect();
        let tweets: TweetCountMap = tweet_days
            .iter()
            .map(|(offset, count)| (CanonicalDate::from(day(*offset).as_str()), *count))
            .collect();
        let events: Vec<EventAnnotation> = event_days
            .iter()
            .map(|offset| EventAnnotation::new(day(*offset).as_str().into(), "event"))
            .collect();

        let (timeline, report) = Timeline::merge_with_report(&prices, &tweets, &events);

        prop_assert_eq!(timeline.len(), prices.len());
        for (entry, point) in timeline.entries().iter().zip(&prices) {
            prop_assert_eq!(&entry.date, &point.date);
            prop_assert_eq!(entry.tweets, tweets.get(point.date.as_str()));
        }
        for event in timeline.events() {
            prop_assert!(prices.iter().any(|point| point.date == event.date));
        }
        let kept_events = events
            .iter()
            .filter(|event| prices.iter().any(|point| point.date == event.date))
            .count();
        prop_assert_eq!(timeline.event_count(), kept_events);
        prop_assert_eq!(report.discarded_events, events.len() - kept_events);
    }

    #[test]
    fn hit_test_is_monotonic_in_distance(
        angle in 0.0f64..std::f64::consts::TAU,
        distance in 0.0f64..30.0,
    ) {
        let prices = vec![PricePoint::new("2021-04-15".into(), 3.0)];
        let events = vec![EventAnnotation::new("2021-04-15".into(), "listing")];
        let timeline = Timeline::merge(&prices, &TweetCountMap::new(), &events);
        let markers = place_event_markers(&timeline, &IdentityScales, MarkerPlacementConfig::default())
            .expect("place markers");

        let x = markers[0].x + distance * angle.cos();
        let y = markers[0].y + distance * angle.sin();
        let hits = hit_test_markers(&markers, x, y, DEFAULT_HIT_RADIUS_PX);

        if distance < DEFAULT_HIT_RADIUS_PX - 1e-9 {
            prop_assert_eq!(hits.first(), Some(0));
        } else if distance > DEFAULT_HIT_RADIUS_PX + 1e-9 {
            prop_assert!(hits.is_empty());
        }
    }
}
