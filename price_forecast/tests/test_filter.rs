use chrono::NaiveDate;
use price_forecast::{filter, DateRange, PriceSeries};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily series with a few missing days
fn gappy_series() -> PriceSeries {
    let dates: Vec<NaiveDate> = date(2023, 3, 1)
        .iter_days()
        .take(20)
        .enumerate()
        .filter(|(i, _)| i % 6 != 4)
        .map(|(_, d)| d)
        .collect();
    let prices = (0..dates.len()).map(|i| 200.0 + i as f64).collect();
    PriceSeries::new(dates, prices).unwrap()
}

#[test]
fn test_filter_matches_brute_force() {
    let series = gappy_series();
    let candidates: Vec<NaiveDate> = date(2023, 2, 26).iter_days().take(28).collect();

    for &start in &candidates {
        for &end in candidates.iter().filter(|e| **e >= start) {
            let expected: Vec<_> = series
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect();

            let filtered = filter(&series, start, end);
            assert_eq!(filtered.points(), expected.as_slice(), "{}..={}", start, end);
        }
    }
}

#[test]
fn test_bounds_are_inclusive() {
    let series = PriceSeries::daily(date(2023, 1, 1), &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

    let filtered = filter(&series, date(2023, 1, 2), date(2023, 1, 4));
    assert_eq!(filtered.prices(), vec![2.0, 3.0, 4.0]);

    let single = filter(&series, date(2023, 1, 3), date(2023, 1, 3));
    assert_eq!(single.prices(), vec![3.0]);
}

#[test]
fn test_inverted_range_is_empty() {
    let series = gappy_series();
    let range = DateRange::new(date(2023, 3, 10), date(2023, 3, 5));

    assert!(range.is_inverted());
    assert!(series.within(range).is_empty());
}

#[test]
fn test_range_outside_data_is_empty() {
    let series = gappy_series();
    assert!(filter(&series, date(2022, 1, 1), date(2022, 12, 31)).is_empty());
    assert!(filter(&series, date(2024, 1, 1), date(2024, 12, 31)).is_empty());
}

#[test]
fn test_covering_range_selects_everything() {
    let series = gappy_series();
    let range = DateRange::covering(&series).unwrap();

    assert!(range.contains(date(2023, 3, 1)));
    assert_eq!(series.within(range), series);
    assert!(DateRange::covering(&PriceSeries::default()).is_none());
}
