use super::schedule::Schedule;
use super::scheduler::Scheduler;
use crate::clock::{Clock, SystemClock};
use crate::config::{load_toml_config, load_yaml_config};
use config::Config;
use std::sync::Arc;
use tracing::info;

/// Builder for the scheduler
pub struct SchedulerBuilder {
    pub(crate) config: Arc<Config>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) schedules: Vec<Schedule>,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerBuilder {
    /// Create a new scheduler builder with default config (empty)
    pub fn new() -> Self {
        Self {
            config: Arc::new(Config::default()),
            clock: Arc::new(SystemClock),
            schedules: Vec::new(),
        }
    }

    /// Create with TOML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early during setup.
    pub fn with_toml(path: &str) -> Self {
        let config = load_toml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load TOML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with YAML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early during setup.
    pub fn with_yaml(path: &str) -> Self {
        let config = load_yaml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load YAML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with custom config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
            schedules: Vec::new(),
        }
    }

    /// Replace the wall-clock source (tests inject a fake clock here).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a schedule.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tempo_runtime::{Action, CronField, CronSpec, Schedule, SchedulerBuilder};
    ///
    /// let every_quarter_hour = CronSpec {
    ///     secs: CronField::Single(0),
    ///     mins: CronField::set([0, 15, 30, 45]),
    ///     hours: CronField::Any,
    ///     ..Default::default()
    /// };
    ///
    /// let scheduler = SchedulerBuilder::new()
    ///     .schedule(
    ///         Schedule::builder(
    ///             "report",
    ///             every_quarter_hour,
    ///             Action::callback(|| {
    ///                 println!("tick");
    ///                 Ok(())
    ///             }),
    ///         )
    ///         .build(),
    ///     )
    ///     .build();
    /// ```
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedules.push(schedule);
        self
    }

    /// Build the scheduler (does not start it yet)
    pub fn build(self) -> Scheduler {
        info!(schedules = self.schedules.len(), "Building scheduler");

        Scheduler {
            config: self.config,
            clock: self.clock,
            schedules: self.schedules,
        }
    }
}
