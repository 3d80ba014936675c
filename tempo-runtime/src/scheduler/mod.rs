mod action;
mod builder;
mod handle;
mod schedule;
mod scheduler;

pub use action::{Action, BoxFuture};
pub use builder::SchedulerBuilder;
pub use handle::SchedulerHandle;
pub use schedule::{Schedule, ScheduleBuilder};
pub use scheduler::{Scheduler, POST_TRIGGER_GUARD_MS, PRE_TRIGGER_LEAD_SECS};
