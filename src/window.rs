//! Time windows for chart queries.
//!
//! A window is either a literal `[start, end]` pair or "N days ago through
//! now", recomputed from the clock on every call.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive query window in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    #[must_use]
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Width of the window in seconds. Negative for degenerate windows.
    #[must_use]
    pub fn span_seconds(&self) -> i64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// `offset_days` before now through now.
    Relative { offset_days: i64 },
    /// Literal pair, returned unchanged.
    Fixed(TimeWindow),
}

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Largest offset accepted from requests and configuration (100 years).
pub const MAX_OFFSET_DAYS: i64 = 36_500;

/// Whether `offset_days` is a usable relative window offset.
#[must_use]
pub fn is_valid_offset(offset_days: i64) -> bool {
    (1..=MAX_OFFSET_DAYS).contains(&offset_days)
}

/// Resolve a window mode against the clock.
///
/// Non-positive offsets produce a degenerate window (`start >= end`) which is
/// returned as-is; callers own that validation. Offsets reaching past the
/// representable date range clamp `start` to its bound.
pub fn resolve(mode: WindowMode, clock: &impl Clock) -> TimeWindow {
    match mode {
        WindowMode::Fixed(window) => window,
        WindowMode::Relative { offset_days } => {
            if offset_days <= 0 {
                tracing::warn!(offset_days, "Non-positive window offset, window is degenerate");
            }
            let now = clock.now();
            let start = Duration::try_days(offset_days)
                .and_then(|span| now.checked_sub_signed(span))
                .unwrap_or_else(|| {
                    tracing::warn!(offset_days, "Window offset out of range, clamping start");
                    if offset_days < 0 {
                        DateTime::<Utc>::MAX_UTC
                    } else {
                        DateTime::<Utc>::MIN_UTC
                    }
                });
            TimeWindow {
                start: start.timestamp(),
                end: now.timestamp(),
            }
        }
    }
}
