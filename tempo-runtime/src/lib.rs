//! Tempo Runtime - core calendar scheduling and civil-time engine
//!
//! This crate provides the runtime infrastructure for calendar-aligned
//! scheduling: a cron-style next-trigger calculator, a wall-clock-aligned
//! interval primitive, segmented sleeping, and a declarative timezone
//! converter.

mod civil;
mod clock;
mod config;
mod cron;
mod error;
mod interval;
mod scheduler;
mod sleep;

// Re-export public API
pub use civil::{
    days_in_month, epoch_from_parts, is_leap_year, to_local, CivilTime, DstAdjust, DstSchedule,
    TimeOffset, TimezoneInfo,
};
pub use clock::{Clock, SystemClock};
pub use config::{load_toml_config, load_yaml_config, resolve_config_value};
pub use cron::{CronField, CronSchedule, CronSpec};
pub use error::{BoxError, IntervalError, ScheduleError, SpecError};
pub use interval::{IntervalUnit, TimeIntoInterval, MAX_INTERVAL_DAYS};
pub use scheduler::{
    Action, BoxFuture, Schedule, ScheduleBuilder, Scheduler, SchedulerBuilder, SchedulerHandle,
    POST_TRIGGER_GUARD_MS, PRE_TRIGGER_LEAD_SECS,
};
pub use sleep::{
    sleep_unbounded_ms, sleep_unbounded_secs, MAX_SLEEP_CHUNK_MS, MAX_SLEEP_CHUNK_SECS,
};
