//! # Tempo - Calendar-Aware Scheduling for Tokio
//!
//! This library drives recurring work from wall-clock time: cron-style
//! calendar triggers, wall-clock-aligned intervals, and local civil time
//! derived from a declarative timezone rule, all without a tz database.
//!
//! ## Features
//!
//! - **Cron triggers**: sparse per-field constraints (seconds, minutes,
//!   hours, month-day, month, weekday), validated eagerly at registration
//! - **Aligned intervals**: fire every N seconds/minutes/hours on the clock
//!   grid (12:00, 12:05, 12:10, ...), optionally offset, immune to poll
//!   jitter
//! - **Three action shapes**: synchronous callback, fire-and-forget async
//!   task, or broadcast wakeup over `tokio::sync::Notify`
//! - **Config support**: enable or disable schedules with placeholders like
//!   `${app.poll.enabled:true}` read from TOML/YAML config files
//! - **Declarative timezones**: standard offset plus a daylight-saving
//!   window and adjustment, supplied as plain configuration values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tempo::{Action, CronField, CronSpec, Schedule, SchedulerBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Every 15 minutes, on the quarter-hour.
//!     let quarter_hours = CronSpec {
//!         secs: CronField::Single(0),
//!         mins: CronField::set([0, 15, 30, 45]),
//!         hours: CronField::Any,
//!         ..Default::default()
//!     };
//!
//!     let scheduler = SchedulerBuilder::new()
//!         .schedule(
//!             Schedule::builder(
//!                 "report",
//!                 quarter_hours,
//!                 Action::task(|| async {
//!                     println!("quarter-hour report");
//!                 }),
//!             )
//!             .build(),
//!         )
//!         .build();
//!
//!     let handle = scheduler.start().await?;
//!     tokio::signal::ctrl_c().await?;
//!     handle.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Aligned intervals
//!
//! ```rust,no_run
//! use tempo::{IntervalUnit, TimeIntoInterval};
//!
//! # async fn demo() -> Result<(), tempo::IntervalError> {
//! // Every 5 minutes at one minute past: 12:01, 12:06, 12:11, ...
//! let mut poll = TimeIntoInterval::new(IntervalUnit::Minutes, 5, 1)?;
//! loop {
//!     poll.interval_sleep().await;
//!     println!("sample sensors");
//! }
//! # }
//! ```
//!
//! ## Configuration
//!
//! Create `config/application.toml`:
//!
//! ```toml
//! [app.poll]
//! enabled = true
//!
//! [timezone]
//! offset = { hour = -4 }
//! dst_start = { month = 3, day = 9, hour = 2 }
//! dst_end = { month = 11, day = 2, hour = 2 }
//! dst_adjust = { hour = 1 }
//! ```
//!
//! You can also use environment variables with `APP_` prefix:
//!
//! ```bash
//! export APP_POLL_ENABLED=false
//! ```

// Re-export core types
pub use tempo_runtime::{
    days_in_month, epoch_from_parts, is_leap_year, load_toml_config, load_yaml_config,
    resolve_config_value, sleep_unbounded_ms, sleep_unbounded_secs, to_local, Action, BoxError,
    BoxFuture, CivilTime, Clock, CronField, CronSchedule, CronSpec, DstAdjust, DstSchedule, IntervalError,
    IntervalUnit, Schedule, ScheduleBuilder, ScheduleError, Scheduler, SchedulerBuilder,
    SchedulerHandle, SpecError, SystemClock, TimeIntoInterval, TimeOffset, TimezoneInfo,
};

// Make the runtime crate itself available
pub use tempo_runtime;
