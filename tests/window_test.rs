//! Tests for time window resolution.
//!
//! Run with: cargo test --test window_test

use chrono::{TimeZone, Utc};
use chrono::DateTime;
use sensor_charts::window::{
    self, FixedClock, SystemClock, TimeWindow, WindowMode, MAX_OFFSET_DAYS,
};

fn clock_at(epoch: i64) -> FixedClock {
    FixedClock(Utc.timestamp_opt(epoch, 0).single().expect("valid timestamp"))
}

#[test]
fn relative_window_spans_whole_days() {
    let clock = clock_at(1_548_220_420);

    for days in 1..=30 {
        let w = window::resolve(WindowMode::Relative { offset_days: days }, &clock);
        assert_eq!(w.end, 1_548_220_420);
        assert_eq!(w.span_seconds(), days * 86_400, "offset {days}");
    }
}

#[test]
fn relative_window_truncates_to_seconds() {
    let now = Utc
        .timestamp_opt(1_548_220_420, 750_000_000)
        .single()
        .expect("valid timestamp");
    let w = window::resolve(WindowMode::Relative { offset_days: 5 }, &FixedClock(now));

    assert_eq!(w, TimeWindow::new(1_548_220_420 - 5 * 86_400, 1_548_220_420));
}

#[test]
fn relative_window_end_never_goes_backwards() {
    let mode = WindowMode::Relative { offset_days: 10 };
    let first = window::resolve(mode, &SystemClock);
    let second = window::resolve(mode, &SystemClock);

    assert!(second.end >= first.end);
    // Allow one second of skew between the two reads of the clock
    assert!((second.span_seconds() - 10 * 86_400).abs() <= 1);
}

#[test]
fn fixed_window_is_returned_unchanged() {
    let literal = TimeWindow::new(1_548_210_420, 1_548_220_420);
    let w = window::resolve(WindowMode::Fixed(literal), &clock_at(0));

    assert_eq!(w, literal);
}

#[test]
fn non_positive_offset_passes_through_degenerate() {
    let clock = clock_at(1_000_000);

    let zero = window::resolve(WindowMode::Relative { offset_days: 0 }, &clock);
    assert_eq!(zero.start, zero.end);

    let negative = window::resolve(WindowMode::Relative { offset_days: -2 }, &clock);
    assert!(negative.start > negative.end);
    assert_eq!(negative.span_seconds(), -2 * 86_400);
}

#[test]
fn oversized_offset_clamps_instead_of_overflowing() {
    let clock = clock_at(1_548_220_420);

    for offset_days in [200_000_000, i64::MAX] {
        let w = window::resolve(WindowMode::Relative { offset_days }, &clock);
        assert_eq!(w.end, 1_548_220_420);
        assert_eq!(w.start, DateTime::<Utc>::MIN_UTC.timestamp(), "offset {offset_days}");
    }

    let w = window::resolve(WindowMode::Relative { offset_days: i64::MIN }, &clock);
    assert_eq!(w.start, DateTime::<Utc>::MAX_UTC.timestamp());
}

#[test]
fn offset_range_check() {
    assert!(window::is_valid_offset(1));
    assert!(window::is_valid_offset(MAX_OFFSET_DAYS));
    assert!(!window::is_valid_offset(0));
    assert!(!window::is_valid_offset(-5));
    assert!(!window::is_valid_offset(MAX_OFFSET_DAYS + 1));
    assert!(!window::is_valid_offset(200_000_000));
}
