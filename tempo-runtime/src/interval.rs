//! Time-into-interval: recurring alignment to wall-clock boundaries.
//!
//! A [`TimeIntoInterval`] fires every `period` units, optionally shifted by
//! `offset`, anchored to the clock grid rather than to "now". A 5-minute
//! period triggers at :00, :05, :10 and so on; adding a 1-minute offset moves
//! that to :01, :06, :11. Each advance is computed from the previous trigger
//! value, so polling late never accumulates drift.

use std::str::FromStr;
use std::sync::Arc;

use crate::civil::{epoch_from_parts, CivilTime};
use crate::clock::{Clock, SystemClock};
use crate::error::IntervalError;
use crate::sleep::sleep_unbounded_ms;

/// Upper bound on the interval period.
pub const MAX_INTERVAL_DAYS: i64 = 28;

/// Unit of an interval period and offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Seconds,
    Minutes,
    Hours,
}

impl IntervalUnit {
    /// Normalizes `value` of this unit to milliseconds.
    pub fn to_millis(&self, value: u32) -> i64 {
        match self {
            IntervalUnit::Seconds => value as i64 * 1000,
            IntervalUnit::Minutes => value as i64 * 60_000,
            IntervalUnit::Hours => value as i64 * 3_600_000,
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seconds" | "second" | "s" | "sec" => Ok(IntervalUnit::Seconds),
            "minutes" | "minute" | "m" | "min" => Ok(IntervalUnit::Minutes),
            "hours" | "hour" | "h" | "hr" => Ok(IntervalUnit::Hours),
            _ => Err(format!("unknown interval unit: {s}")),
        }
    }
}

/// Recurring wall-clock-aligned trigger.
///
/// `interval_elapsed` is the non-blocking check, `interval_sleep` the
/// blocking form. Instances are single-owner; drive one from one loop.
pub struct TimeIntoInterval {
    unit: IntervalUnit,
    period_ms: i64,
    offset_ms: i64,
    next_event_ms: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TimeIntoInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeIntoInterval")
            .field("unit", &self.unit)
            .field("period_ms", &self.period_ms)
            .field("offset_ms", &self.offset_ms)
            .field("next_event_ms", &self.next_event_ms)
            .finish_non_exhaustive()
    }
}

impl TimeIntoInterval {
    /// Builds an aligner on the system clock.
    pub fn new(unit: IntervalUnit, period: u32, offset: u32) -> Result<Self, IntervalError> {
        Self::with_clock(unit, period, offset, Arc::new(SystemClock))
    }

    /// Builds an aligner on an explicit clock.
    ///
    /// Fails when the period is zero, spans [`MAX_INTERVAL_DAYS`] or more,
    /// or does not exceed the offset.
    pub fn with_clock(
        unit: IntervalUnit,
        period: u32,
        offset: u32,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, IntervalError> {
        if period == 0 {
            return Err(IntervalError::ZeroPeriod);
        }
        let period_ms = unit.to_millis(period);
        if period_ms >= MAX_INTERVAL_DAYS * 24 * 60 * 60 * 1000 {
            return Err(IntervalError::PeriodTooLong);
        }
        if offset >= period {
            return Err(IntervalError::OffsetNotBelowPeriod);
        }
        let mut aligner = TimeIntoInterval {
            unit,
            period_ms,
            offset_ms: unit.to_millis(offset),
            next_event_ms: 0,
            clock,
        };
        aligner.next_event_ms = aligner.next_event_after(aligner.clock.now_epoch_ms(), 0);
        Ok(aligner)
    }

    /// Epoch milliseconds of the upcoming trigger.
    pub fn next_trigger_ms(&self) -> i64 {
        self.next_event_ms
    }

    // Grid anchor: current civil time truncated to the boundary one unit up
    // (seconds align to the minute, minutes to the hour, hours to midnight).
    fn anchor_ms(&self, now_ms: i64) -> i64 {
        let t = CivilTime::from_epoch(now_ms.div_euclid(1000));
        let (y, mo, d) = (t.year as i64, t.month as i64, t.day as i64);
        let secs = match self.unit {
            IntervalUnit::Seconds => epoch_from_parts(y, mo, d, t.hour as i64, t.minute as i64, 0),
            IntervalUnit::Minutes => epoch_from_parts(y, mo, d, t.hour as i64, 0, 0),
            IntervalUnit::Hours => epoch_from_parts(y, mo, d, 0, 0, 0),
        };
        secs * 1000
    }

    // Next trigger strictly derived from the previous one; re-anchors from
    // civil time only when the grid was missed by more than a full period
    // (or when there is no previous trigger yet).
    fn next_event_after(&self, now_ms: i64, last_event_ms: i64) -> i64 {
        if last_event_ms > 0 {
            let next = last_event_ms + self.period_ms;
            if next >= now_ms {
                return next;
            }
        }
        let mut next = self.anchor_ms(now_ms) + self.period_ms + self.offset_ms;
        while next < now_ms {
            next += self.period_ms;
        }
        next
    }

    /// Non-blocking check: true when the next boundary has been reached, in
    /// which case the trigger advances by exactly one period.
    pub fn interval_elapsed(&mut self) -> bool {
        let now_ms = self.clock.now_epoch_ms();
        if self.next_event_ms - now_ms > 0 {
            return false;
        }
        self.next_event_ms = self.next_event_after(now_ms, self.next_event_ms);
        true
    }

    /// Suspends until the next boundary, then advances the trigger for the
    /// following cycle.
    pub async fn interval_sleep(&mut self) {
        let now_ms = self.clock.now_epoch_ms();
        let mut delta_ms = self.next_event_ms - now_ms;
        if delta_ms <= 0 {
            // Trigger already passed: re-derive it first so we never sleep a
            // zero or negative duration.
            self.next_event_ms = self.next_event_after(now_ms, self.next_event_ms);
            delta_ms = self.next_event_ms - now_ms;
        }
        sleep_unbounded_ms(delta_ms).await;
        self.next_event_ms = self.next_event_after(self.clock.now_epoch_ms(), self.next_event_ms);
    }
}
