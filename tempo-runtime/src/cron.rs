//! Cron-style next-trigger-time calculation on calendar fields.
//!
//! A [`CronSpec`] holds sparse per-field constraints. Compiling it validates
//! every field eagerly and yields a [`CronSchedule`], a stateless value that
//! maps "now" to the number of seconds until the next matching instant.

use crate::civil::{epoch_from_parts, CivilTime};
use crate::error::SpecError;

/// Constraint on a single calendar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CronField {
    /// Matches any value.
    Any,
    /// Matches one value.
    Single(u32),
    /// Matches an ordered set of values.
    Set(Vec<u32>),
}

impl CronField {
    /// Builds a set constraint from any iterator of values.
    pub fn set<I: IntoIterator<Item = u32>>(values: I) -> Self {
        CronField::Set(values.into_iter().collect())
    }

    fn is_constrained(&self) -> bool {
        !matches!(self, CronField::Any)
    }

    fn values(&self) -> &[u32] {
        match self {
            CronField::Any => &[],
            CronField::Single(v) => std::slice::from_ref(v),
            CronField::Set(vs) => vs,
        }
    }

    /// Offset from `current` to the next matching value: positive for a
    /// future value, negative when the match wraps into the next unit.
    fn offset_from(&self, current: i64) -> i64 {
        match self {
            CronField::Any => 0,
            CronField::Single(v) => *v as i64 - current,
            CronField::Set(vs) => vs
                .iter()
                .map(|&v| v as i64)
                .filter(|&v| v >= current)
                .min()
                .unwrap_or(vs[0] as i64)
                - current,
        }
    }
}

impl From<u32> for CronField {
    fn from(v: u32) -> Self {
        CronField::Single(v)
    }
}

/// Sparse per-field trigger constraints.
///
/// Defaults to 03:00:00 every day: seconds and minutes pinned to zero, hours
/// to three, everything else unconstrained. Weekday is 0..=6 counted from
/// Monday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSpec {
    pub secs: CronField,
    pub mins: CronField,
    pub hours: CronField,
    pub mday: CronField,
    pub month: CronField,
    pub wday: CronField,
}

impl Default for CronSpec {
    fn default() -> Self {
        CronSpec {
            secs: CronField::Single(0),
            mins: CronField::Single(0),
            hours: CronField::Single(3),
            mday: CronField::Any,
            month: CronField::Any,
            wday: CronField::Any,
        }
    }
}

// Inclusive legal range per field, in evaluation order.
const FIELD_RANGES: [(&str, u32, u32); 6] = [
    ("secs", 0, 59),
    ("mins", 0, 59),
    ("hours", 0, 23),
    ("mday", 1, 31),
    ("month", 1, 12),
    ("wday", 0, 6),
];

// Months with fewer than 31 days.
fn max_mday_of(month: u32) -> u32 {
    match month {
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl CronSpec {
    /// Validates the spec and produces a stateless, reusable schedule.
    pub fn compile(&self) -> Result<CronSchedule, SpecError> {
        if !self.secs.is_constrained() {
            return Err(SpecError::UnconstrainedSeconds);
        }

        let mut fields = [
            self.secs.clone(),
            self.mins.clone(),
            self.hours.clone(),
            self.mday.clone(),
            self.month.clone(),
            self.wday.clone(),
        ];
        for (field, (name, min, max)) in fields.iter_mut().zip(FIELD_RANGES) {
            if let CronField::Set(vs) = field {
                vs.sort_unstable();
                vs.dedup();
                if vs.is_empty() {
                    return Err(SpecError::EmptySet { field: name });
                }
            }
            for &value in field.values() {
                if value < min || value > max {
                    return Err(SpecError::OutOfRange {
                        field: name,
                        value,
                        min,
                        max,
                    });
                }
            }
        }
        let [secs, mins, hours, mday, month, wday] = fields;

        if let CronField::Set(vs) = &secs {
            if vs.windows(2).any(|w| w[1] - w[0] < 10) {
                return Err(SpecError::SecondsTooDense);
            }
        }

        if mday.is_constrained() && month.is_constrained() {
            let max_day = mday.values().iter().copied().max().unwrap_or(1);
            for &mo in month.values() {
                if max_day > max_mday_of(mo) {
                    return Err(SpecError::DayCountConflict {
                        month: mo,
                        day: max_day,
                    });
                }
            }
        }

        if mday.is_constrained()
            && wday.is_constrained()
            && mday.values().iter().any(|&d| d > 22)
        {
            return Err(SpecError::MonthDayWeekdayConflict);
        }

        Ok(CronSchedule {
            secs,
            mins,
            hours,
            mday,
            month,
            wday,
        })
    }
}

/// A validated cron spec. Holds no mutable state; [`seconds_until`] is a pure
/// function of the supplied instant and may be called from any number of
/// loops.
///
/// [`seconds_until`]: CronSchedule::seconds_until
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    secs: CronField,
    mins: CronField,
    hours: CronField,
    mday: CronField,
    month: CronField,
    wday: CronField,
}

impl CronSchedule {
    /// Seconds from `now_epoch_secs` to the next matching instant.
    ///
    /// "Next" means strictly after `now`: an instant that matches exactly
    /// resolves to the following occurrence, so the result is always
    /// positive and a caller looping on it cannot spin on a zero wait.
    pub fn seconds_until(&self, now_epoch_secs: i64) -> i64 {
        let offset = self.offset_at(now_epoch_secs);
        if offset > 0 {
            return offset;
        }
        self.offset_at(now_epoch_secs + 1).max(0) + 1
    }

    // Works forward from `tnow` one field at a time, least significant
    // first, re-deriving the calendar breakdown after each advance. A
    // negative per-field offset means the match wraps into the next larger
    // unit.
    fn offset_at(&self, tnow: i64) -> i64 {
        let mut tev = tnow;
        let t = CivilTime::from_epoch(tev);
        let init_month = t.month as i64;

        let toff = self.secs.offset_from(t.second as i64);
        tev += if toff >= 0 { toff } else { 60 + toff };

        let t = CivilTime::from_epoch(tev);
        let toff = self.mins.offset_from(t.minute as i64);
        tev += 60 * if toff >= 0 { toff } else { 60 + toff };

        let t = CivilTime::from_epoch(tev);
        let toff = self.hours.offset_from(t.hour as i64);
        tev += 3600 * if toff >= 0 { toff } else { 24 + toff };

        let t = CivilTime::from_epoch(tev);
        let mut year = t.year as i64;
        let mut month = t.month as i64;
        let mut mday = t.day as i64;
        let (hour, minute, second) = (t.hour as i64, t.minute as i64, t.second as i64);

        let toff = self.month.offset_from(month);
        month += toff;
        if month != init_month {
            mday = 1;
        }
        if toff < 0 {
            year += 1;
        }
        tev = epoch_from_parts(year, month, mday, hour, minute, second);
        let t = CivilTime::from_epoch(tev);
        year = t.year as i64;
        month = t.month as i64;
        mday = t.day as i64;
        let weekday = t.weekday as i64;

        if self.mday.is_constrained() {
            if month == init_month {
                // Month untouched so far: the day offset is relative and may
                // itself force a rollover into the next valid month.
                let toff = self.mday.offset_from(mday);
                mday += toff;
                if toff < 0 {
                    let toff = self.month.offset_from(month + 1);
                    month += toff + 1;
                    if toff < 0 {
                        year += 1;
                    }
                }
            } else {
                // Month already rolled over: the day is absolute.
                mday = self.mday.offset_from(0);
            }
        }

        if self.wday.is_constrained() {
            if month == init_month {
                let toff = self.wday.offset_from(weekday);
                mday += toff.rem_euclid(7);
                tev = epoch_from_parts(year, month, mday, hour, minute, second);
                let cur_month = month;
                month = CivilTime::from_epoch(tev).month as i64;
                if month != cur_month {
                    // Weekday advance crossed into a new month: find the
                    // next valid month and resolve the weekday from its 1st.
                    let toff = self.month.offset_from(month);
                    month += toff;
                    if toff < 0 {
                        year += 1;
                    }
                    tev = epoch_from_parts(year, month, 1, hour, minute, second);
                    let t = CivilTime::from_epoch(tev);
                    year = t.year as i64;
                    month = t.month as i64;
                    mday = t.day as i64;
                    let toff = self.wday.offset_from(t.weekday as i64);
                    mday += toff.rem_euclid(7);
                }
            } else {
                if !self.mday.is_constrained() {
                    mday = 1;
                }
                tev = epoch_from_parts(year, month, mday, hour, minute, second);
                let wd = CivilTime::from_epoch(tev).weekday as i64;
                mday += (self.wday.offset_from(0) - wd).rem_euclid(7);
            }
        }

        epoch_from_parts(year, month, mday, hour, minute, second) - tnow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn quarter_hour() -> CronSchedule {
        CronSpec {
            secs: CronField::Single(0),
            mins: CronField::set([0, 15, 30, 45]),
            hours: CronField::Any,
            ..Default::default()
        }
        .compile()
        .unwrap()
    }

    impl CronSchedule {
        // Direct per-field match check, used to brute-force minimality.
        fn matches(&self, secs: i64) -> bool {
            let t = CivilTime::from_epoch(secs);
            let field_ok = |f: &CronField, v: u32| match f {
                CronField::Any => true,
                CronField::Single(x) => *x == v,
                CronField::Set(xs) => xs.contains(&v),
            };
            field_ok(&self.secs, t.second)
                && field_ok(&self.mins, t.minute)
                && field_ok(&self.hours, t.hour)
                && field_ok(&self.mday, t.day)
                && field_ok(&self.month, t.month)
                && field_ok(&self.wday, t.weekday)
        }
    }

    #[test]
    fn quarter_hour_lands_on_boundaries() {
        let schedule = quarter_hour();
        let base = Utc.with_ymd_and_hms(2025, 6, 11, 10, 0, 0).unwrap().timestamp();
        for delta in [0, 1, 59, 60, 899, 900, 901, 1713, 2699, 3599] {
            let now = base + delta;
            let offset = schedule.seconds_until(now);
            assert!(offset > 0, "offset must be strictly positive at {now}");
            assert_eq!((now + offset) % 900, 0, "not a quarter-hour at {now}");
            assert!(offset <= 900, "overshot the next boundary at {now}");
        }
    }

    #[test]
    fn exact_match_resolves_to_following_occurrence() {
        let schedule = quarter_hour();
        let boundary = Utc.with_ymd_and_hms(2025, 6, 11, 10, 15, 0).unwrap().timestamp();
        assert_eq!(schedule.seconds_until(boundary), 900);
    }

    #[test]
    fn next_match_is_minimal() {
        let schedule = quarter_hour();
        let now = Utc.with_ymd_and_hms(2025, 6, 11, 10, 7, 13).unwrap().timestamp();
        let offset = schedule.seconds_until(now);
        for t in now + 1..now + offset {
            assert!(!schedule.matches(t), "earlier match at {t}");
        }
        assert!(schedule.matches(now + offset));
    }

    #[test]
    fn daily_default_triggers_at_three() {
        let schedule = CronSpec::default().compile().unwrap();
        let two_am = Utc.with_ymd_and_hms(2025, 6, 1, 2, 0, 0).unwrap().timestamp();
        assert_eq!(schedule.seconds_until(two_am), 3600);
        let three_am = two_am + 3600;
        assert_eq!(schedule.seconds_until(three_am), 86_400);
        let four_am = three_am + 3600;
        assert_eq!(schedule.seconds_until(four_am), 23 * 3600);
    }

    #[test]
    fn month_day_rolls_into_next_month() {
        let schedule = CronSpec {
            secs: CronField::Single(0),
            mins: CronField::Single(0),
            hours: CronField::Single(0),
            mday: CronField::Single(1),
            ..Default::default()
        }
        .compile()
        .unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap().timestamp();
        let expect = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(now + schedule.seconds_until(now), expect);
    }

    #[test]
    fn month_day_rolls_across_year_end() {
        let schedule = CronSpec {
            secs: CronField::Single(0),
            mins: CronField::Single(0),
            hours: CronField::Single(0),
            mday: CronField::Single(1),
            ..Default::default()
        }
        .compile()
        .unwrap();
        let now = Utc.with_ymd_and_hms(2025, 12, 15, 0, 0, 0).unwrap().timestamp();
        let expect = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(now + schedule.seconds_until(now), expect);
    }

    #[test]
    fn weekday_finds_next_monday_morning() {
        let schedule = CronSpec {
            secs: CronField::Single(0),
            mins: CronField::Single(0),
            hours: CronField::Single(9),
            wday: CronField::Single(0),
            ..Default::default()
        }
        .compile()
        .unwrap();
        // Wednesday.
        let now = Utc.with_ymd_and_hms(2025, 6, 11, 10, 0, 0).unwrap().timestamp();
        let expect = Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap().timestamp();
        assert_eq!(now + schedule.seconds_until(now), expect);
    }

    #[test]
    fn constrained_month_is_honored() {
        let schedule = CronSpec {
            secs: CronField::Single(0),
            mins: CronField::Single(0),
            hours: CronField::Single(0),
            month: CronField::Single(2),
            ..Default::default()
        }
        .compile()
        .unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap().timestamp();
        let next = now + schedule.seconds_until(now);
        assert_eq!(CivilTime::from_epoch(next).month, 2);
        assert_eq!(CivilTime::from_epoch(next).year, 2026);
    }

    #[test]
    fn dense_seconds_set_is_rejected() {
        let spec = CronSpec {
            secs: CronField::set([0, 5]),
            ..Default::default()
        };
        assert_eq!(spec.compile().unwrap_err(), SpecError::SecondsTooDense);

        let spec = CronSpec {
            secs: CronField::set([0, 10]),
            ..Default::default()
        };
        assert!(spec.compile().is_ok());
    }

    #[test]
    fn unconstrained_seconds_are_rejected() {
        let spec = CronSpec {
            secs: CronField::Any,
            ..Default::default()
        };
        assert_eq!(spec.compile().unwrap_err(), SpecError::UnconstrainedSeconds);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let spec = CronSpec {
            month: CronField::Single(13),
            ..Default::default()
        };
        assert_eq!(
            spec.compile().unwrap_err(),
            SpecError::OutOfRange {
                field: "month",
                value: 13,
                min: 1,
                max: 12
            }
        );

        let spec = CronSpec {
            secs: CronField::Single(60),
            ..Default::default()
        };
        assert!(matches!(
            spec.compile().unwrap_err(),
            SpecError::OutOfRange { field: "secs", .. }
        ));
    }

    #[test]
    fn day_count_conflicts_are_rejected() {
        let spec = CronSpec {
            mday: CronField::Single(31),
            month: CronField::set([1, 4]),
            ..Default::default()
        };
        assert_eq!(
            spec.compile().unwrap_err(),
            SpecError::DayCountConflict { month: 4, day: 31 }
        );

        let spec = CronSpec {
            mday: CronField::Single(31),
            month: CronField::set([1, 3]),
            ..Default::default()
        };
        assert!(spec.compile().is_ok());
    }

    #[test]
    fn month_day_weekday_conflicts_are_rejected() {
        let spec = CronSpec {
            mday: CronField::Single(25),
            wday: CronField::Single(0),
            ..Default::default()
        };
        assert_eq!(
            spec.compile().unwrap_err(),
            SpecError::MonthDayWeekdayConflict
        );

        let spec = CronSpec {
            mday: CronField::Single(22),
            wday: CronField::Single(0),
            ..Default::default()
        };
        assert!(spec.compile().is_ok());
    }

    #[test]
    fn unsorted_set_input_is_normalized() {
        let schedule = CronSpec {
            secs: CronField::Single(0),
            mins: CronField::set([45, 0, 30, 15, 15]),
            hours: CronField::Any,
            ..Default::default()
        }
        .compile()
        .unwrap();
        assert_eq!(schedule, quarter_hour());
    }
}
