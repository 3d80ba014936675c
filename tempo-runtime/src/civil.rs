//! Civil (calendar/clock) time and declarative timezone rules.
//!
//! A timezone here is not a tz-database entry: it is a standard offset from
//! UTC plus an annual daylight-saving window and adjustment, all supplied as
//! plain configuration values. Conversions are pure functions over epoch
//! seconds and never fail.

use serde::Deserialize;
use std::fmt;

const SECS_PER_DAY: i64 = 86_400;

/// Standard offset from UTC as a signed hour/minute pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TimeOffset {
    #[serde(default)]
    pub hour: i32,
    #[serde(default)]
    pub minute: i32,
}

impl TimeOffset {
    pub fn new(hour: i32, minute: i32) -> Self {
        TimeOffset { hour, minute }
    }

    /// Offset in seconds.
    pub fn offset_seconds(&self) -> i64 {
        self.minute as i64 * 60 + self.hour as i64 * 3600
    }
}

/// Seasonal clock shift applied while daylight saving is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DstAdjust {
    #[serde(default)]
    pub hour: i32,
    #[serde(default)]
    pub minute: i32,
}

impl DstAdjust {
    pub fn new(hour: i32, minute: i32) -> Self {
        DstAdjust { hour, minute }
    }

    /// Adjustment in seconds.
    pub fn adjust_seconds(&self) -> i64 {
        self.minute as i64 * 60 + self.hour as i64 * 3600
    }
}

/// One annual daylight-saving transition point, compared field by field
/// (month, then day, then hour, then minute).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DstSchedule {
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
}

impl DstSchedule {
    pub fn new(month: u32, day: u32, hour: u32, minute: u32) -> Self {
        DstSchedule {
            month,
            day,
            hour,
            minute,
        }
    }

    fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.month, self.day, self.hour, self.minute)
    }
}

/// Declarative timezone rule: standard offset, daylight-saving window, and
/// daylight-saving adjustment. Built once at configuration time and shared
/// read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TimezoneInfo {
    #[serde(default)]
    pub offset: TimeOffset,
    #[serde(default)]
    pub dst_start: DstSchedule,
    #[serde(default)]
    pub dst_end: DstSchedule,
    #[serde(default)]
    pub dst_adjust: DstAdjust,
}

impl TimezoneInfo {
    pub fn new(
        offset: TimeOffset,
        dst_start: DstSchedule,
        dst_end: DstSchedule,
        dst_adjust: DstAdjust,
    ) -> Self {
        TimezoneInfo {
            offset,
            dst_start,
            dst_end,
            dst_adjust,
        }
    }

    /// Short "GMT", "GMT+4", "GMT-0530" style tag derived from the standard
    /// offset, for log prefixes.
    pub fn label(&self) -> String {
        let mut tz = String::from("GMT");
        if self.offset.hour > 0 {
            tz.push('+');
        }
        if self.offset.minute == 0 && self.offset.hour != 0 {
            tz.push_str(&self.offset.hour.to_string());
        }
        if self.offset.minute != 0 {
            tz.push_str(&format!("{:02}{:02}", self.offset.hour, self.offset.minute.abs()));
        }
        tz
    }
}

/// Calendar/clock breakdown of an instant.
///
/// `weekday` is 0..=6 counted from Monday; `year_day` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub weekday: u32,
    pub year_day: u32,
}

impl CivilTime {
    /// Decomposes epoch seconds into UTC civil fields.
    pub fn from_epoch(secs: i64) -> CivilTime {
        let days = secs.div_euclid(SECS_PER_DAY);
        let rem = secs.rem_euclid(SECS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        // 1970-01-01 was a Thursday; weekday 0 is Monday.
        let weekday = (days + 3).rem_euclid(7);
        let year_day = days - days_from_civil(year, 1, 1) + 1;
        CivilTime {
            year: year as i32,
            month: month as u32,
            day: day as u32,
            hour: (rem / 3600) as u32,
            minute: (rem % 3600 / 60) as u32,
            second: (rem % 60) as u32,
            weekday: weekday as u32,
            year_day: year_day as u32,
        }
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    if year % 400 == 0 {
        return true;
    }
    if year % 100 == 0 {
        return false;
    }
    year % 4 == 0
}

/// Day count of a month (1..=12), honoring leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let feb = 28 + is_leap_year(year) as u32;
    //  Jan  Feb  Mar  Apr  May  Jun  Jul  Aug  Sep  Oct  Nov  Dec
    [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31][month as usize - 1]
}

// Days since 1970-01-01 from a civil date. Hinnant's days_from_civil.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

// Inverse of `days_from_civil`. Hinnant's civil_from_days.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { y + 1 } else { y }, month, day)
}

/// Epoch seconds from civil parts.
///
/// Out-of-range month, day, or time-of-day values fold over into the
/// neighboring unit (month 13 is January of the next year, day 32 of January
/// is February 1st), which the cron engine relies on when it advances one
/// field past its limit.
pub fn epoch_from_parts(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> i64 {
    let months = month - 1;
    let year = year + months.div_euclid(12);
    let month = months.rem_euclid(12) + 1;
    let days = days_from_civil(year, month, 1) + (day - 1);
    days * SECS_PER_DAY + hour * 3600 + minute * 60 + second
}

/// Converts a UTC instant to local civil time under a declarative timezone
/// rule.
///
/// Daylight saving is considered active when the instant's UTC
/// (month, day, hour, minute) tuple is at or past `dst_start` and strictly
/// before `dst_end`; a zero-width window (start equal to end) disables it
/// entirely. The adjustment and the standard offset are applied to the
/// minute/hour fields, then excess or deficit folds through hours, days,
/// months, and years, with weekday and day-of-year tracking every rollover.
pub fn to_local(utc_secs: i64, tz: &TimezoneInfo) -> CivilTime {
    let utc = CivilTime::from_epoch(utc_secs);
    let mut year = utc.year;
    let mut month = utc.month as i64;
    let mut day = utc.day as i64;
    let mut hour = utc.hour as i64;
    let mut minute = utc.minute as i64;
    let mut weekday = utc.weekday as i64;
    let mut year_day = utc.year_day as i64;

    let here = (utc.month, utc.day, utc.hour, utc.minute);
    if here >= tz.dst_start.as_tuple() && here < tz.dst_end.as_tuple() {
        minute += tz.dst_adjust.minute as i64;
        hour += tz.dst_adjust.hour as i64;
    }
    minute += tz.offset.minute as i64;
    hour += tz.offset.hour as i64;

    hour += minute.div_euclid(60);
    minute = minute.rem_euclid(60);

    while hour >= 24 {
        hour -= 24;
        day += 1;
        if day > days_in_month(year, month as u32) as i64 {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        weekday = (weekday + 1) % 7;
        year_day = if month == 1 && day == 1 { 1 } else { year_day + 1 };
    }
    while hour < 0 {
        hour += 24;
        day -= 1;
        if day < 1 {
            month -= 1;
            if month < 1 {
                month = 12;
                year -= 1;
            }
            day = days_in_month(year, month as u32) as i64;
        }
        weekday = (weekday + 6) % 7;
        year_day = if month == 12 && day == 31 {
            365 + is_leap_year(year) as i64
        } else {
            year_day - 1
        };
    }

    CivilTime {
        year,
        month: month as u32,
        day: day as u32,
        hour: hour as u32,
        minute: minute as u32,
        second: utc.second,
        weekday: weekday as u32,
        year_day: year_day as u32,
    }
}
