use thiserror::Error;

/// Boxed error type used at action-dispatch boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Validation failure raised when compiling a cron spec.
///
/// Raised eagerly at registration, never mid-loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The seconds field must always be constrained, otherwise a schedule
    /// could match every second of a minute.
    #[error("seconds must be constrained, not a wildcard")]
    UnconstrainedSeconds,

    #[error("{field} set must not be empty")]
    EmptySet { field: &'static str },

    #[error("{field} value {value} out of range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Adjacent members of a seconds set must be at least 10 apart.
    #[error("seconds values must be at least 10 apart")]
    SecondsTooDense,

    /// A constrained month-day does not exist in a constrained month.
    #[error("day {day} never occurs in month {month}")]
    DayCountConflict { month: u32, day: u32 },

    #[error("month-day must be 22 or less when weekday is also constrained")]
    MonthDayWeekdayConflict,
}

/// Validation failure raised when constructing a time-into-interval.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval period must be greater than zero")]
    ZeroPeriod,

    #[error("interval period must be shorter than 28 days")]
    PeriodTooLong,

    #[error("interval offset must be less than the interval period")]
    OffsetNotBelowPeriod,
}

/// Failure surfaced by the scheduler, either at registration or when a
/// synchronously dispatched action reports an error.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron spec for schedule '{name}': {source}")]
    InvalidSpec {
        name: String,
        #[source]
        source: SpecError,
    },

    #[error("config resolution failed: {0}")]
    Config(#[from] config::ConfigError),

    #[error("schedule '{name}' action failed: {source}")]
    ActionFailed {
        name: String,
        #[source]
        source: BoxError,
    },
}
