use coin_timeline::core::{CanonicalDate, EventAnnotation, PricePoint, Timeline, TweetCountMap};

fn prices(rows: &[(&str, f64)]) -> Vec<PricePoint> {
    rows.iter()
        .map(|(date, price)| PricePoint::new(CanonicalDate::normalize(date), *price))
        .collect()
}

fn tweets(rows: &[(&str, u64)]) -> TweetCountMap {
    rows.iter()
        .map(|(date, count)| (CanonicalDate::normalize(date), *count))
        .collect()
}

#[test]
fn three_day_scenario_joins_on_price_dates() {
    let prices = prices(&[("2021-04-13", 1.0), ("2021-04-14", 2.0), ("2021-04-15", 3.0)]);
    let tweets = tweets(&[("2021-04-14", 50)]);
    let events = vec![EventAnnotation::new("2021-04-15".into(), "Exchange listing")];

    let timeline = Timeline::merge(&prices, &tweets, &events);
    let entries = timeline.entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].date, "2021-04-13");
    assert_eq!(entries[0].tweets, None);
    assert!(entries[0].events.is_empty());

    assert_eq!(entries[1].date, "2021-04-14");
    assert_eq!(entries[1].tweets, Some(50));
    assert!(entries[1].events.is_empty());

    assert_eq!(entries[2].date, "2021-04-15");
    assert_eq!(entries[2].tweets, None);
    assert_eq!(entries[2].events.len(), 1);
    assert_eq!(entries[2].events[0].label, "Exchange listing");
}

#[test]
fn entries_outside_the_price_axis_are_discarded_and_counted() {
    let prices = prices(&[("2021-04-13", 1.0), ("2021-04-14", 2.0)]);
    let tweets = tweets(&[("2021-04-12", 5), ("2021-04-14", 8), ("2021-05-01", 9)]);
    let events = vec![
        EventAnnotation::new("2021-04-01".into(), "too early"),
        EventAnnotation::new("2021-04-13".into(), "kept"),
        EventAnnotation::new("2022-01-01".into(), "too late"),
    ];

    let (timeline, report) = Timeline::merge_with_report(&prices, &tweets, &events);

    assert_eq!(timeline.len(), 2);
    assert!(!timeline.contains("2021-04-12"));
    assert!(!timeline.contains("2021-05-01"));
    assert_eq!(timeline.event_count(), 1);
    assert_eq!(report.discarded_tweet_dates, 2);
    assert_eq!(report.discarded_events, 2);
    assert_eq!(report.repeated_price_dates, 0);
}

#[test]
fn events_on_one_date_keep_source_order() {
    let prices = prices(&[("2021-04-15", 3.0)]);
    let events = vec![
        EventAnnotation::new("2021-04-15".into(), "first"),
        EventAnnotation::new("2021-04-15 18:00:00".into(), "second").with_link("https://example.com"),
    ];

    let timeline = Timeline::merge(&prices, &TweetCountMap::new(), &events);
    let labels: Vec<&str> = timeline.events().map(|event| event.label.as_str()).collect();
    assert_eq!(labels, ["first", "second"]);
    assert_eq!(timeline.events().nth(1).and_then(|event| event.link.as_deref()), Some("https://example.com"));
}

#[test]
fn repeated_price_dates_attach_events_once() {
    let prices = prices(&[("2021-04-14", 2.0), ("2021-04-15", 3.0), ("2021-04-15", 3.2)]);
    let tweets = tweets(&[("2021-04-15", 12)]);
    let events = vec![EventAnnotation::new("2021-04-15".into(), "listing")];

    let (timeline, report) = Timeline::merge_with_report(&prices, &tweets, &events);

    assert_eq!(timeline.len(), 3);
    assert_eq!(report.repeated_price_dates, 1);
    assert_eq!(timeline.position("2021-04-15"), Some(1));
    assert_eq!(timeline.entries()[1].events.len(), 1);
    assert!(timeline.entries()[2].events.is_empty());
    assert_eq!(timeline.entries()[2].tweets, Some(12));
    assert_eq!(timeline.event_count(), 1);
}

#[test]
fn price_extremes_and_lookup_helpers() {
    let prices = prices(&[("2021-04-13", 1.5), ("2021-04-14", 0.25), ("2021-04-15", 3.0)]);
    let timeline = Timeline::merge(&prices, &TweetCountMap::new(), &[]);

    assert_eq!(timeline.max_price(), Some(3.0));
    assert_eq!(timeline.min_price(), Some(0.25));
    assert_eq!(timeline.get("2021-04-14").map(|entry| entry.price), Some(0.25));
    assert_eq!(timeline.entry_at(2).map(|entry| entry.date.as_str()), Some("2021-04-15"));
    assert!(timeline.entry_at(3).is_none());

    let empty = Timeline::merge(&[], &TweetCountMap::new(), &[]);
    assert!(empty.is_empty());
    assert_eq!(empty.max_price(), None);
}
