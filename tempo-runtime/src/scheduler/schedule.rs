use super::action::Action;
use crate::cron::CronSpec;

/// A registered schedule: a name, the trigger constraints, the action to
/// dispatch, an optional repeat budget, and an enable switch that may be a
/// config placeholder.
#[derive(Clone)]
pub struct Schedule {
    pub name: String,
    pub spec: CronSpec,
    pub action: Action,
    pub times: Option<u32>,
    pub enabled: String,
}

impl Schedule {
    /// Create a new builder for Schedule
    pub fn builder(name: impl Into<String>, spec: CronSpec, action: Action) -> ScheduleBuilder {
        ScheduleBuilder {
            name: name.into(),
            spec,
            action,
            times: None,
            enabled: "true".to_string(),
        }
    }
}

/// Builder for Schedule
pub struct ScheduleBuilder {
    name: String,
    spec: CronSpec,
    action: Action,
    times: Option<u32>,
    enabled: String,
}

impl ScheduleBuilder {
    /// Fire at most `times` triggers; the default is to run forever.
    pub fn times(mut self, times: u32) -> Self {
        self.times = Some(times);
        self
    }

    /// Literal "true"/"false" or a `${key:default}` config placeholder.
    pub fn enabled(mut self, enabled: impl Into<String>) -> Self {
        self.enabled = enabled.into();
        self
    }

    pub fn build(self) -> Schedule {
        Schedule {
            name: self.name,
            spec: self.spec,
            action: self.action,
            times: self.times,
            enabled: self.enabled,
        }
    }
}
