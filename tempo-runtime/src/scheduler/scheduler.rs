use super::action::Action;
use super::handle::SchedulerHandle;
use super::schedule::Schedule;
use crate::civil::{epoch_from_parts, CivilTime};
use crate::clock::Clock;
use crate::config::resolve_config_value;
use crate::cron::CronSchedule;
use crate::error::ScheduleError;
use crate::sleep::sleep_unbounded_secs;
use config::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// How early the initial long sleep wakes up, so chunked sleeping cannot
/// carry the task past the first trigger.
pub const PRE_TRIGGER_LEAD_SECS: i64 = 2;

/// Pause after a dispatch before recomputing, so the next offset cannot
/// resolve within the same second and fire twice.
pub const POST_TRIGGER_GUARD_MS: u64 = 1200;

/// Configured scheduler ready to start
/// This struct holds all configuration and schedules but hasn't started yet
pub struct Scheduler {
    pub(crate) config: Arc<Config>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) schedules: Vec<Schedule>,
}

impl Scheduler {
    /// Start the scheduler with all registered schedules
    ///
    /// Every cron spec is compiled up front: an invalid spec aborts the start
    /// with the specific validation reason before any schedule runs. Each
    /// enabled schedule then runs as its own tokio task. Returns a
    /// [`SchedulerHandle`] that can be used to shutdown the scheduler.
    pub async fn start(self) -> Result<SchedulerHandle, ScheduleError> {
        info!(schedules = self.schedules.len(), "Starting scheduler");

        let mut handles = Vec::new();
        for schedule in self.schedules {
            let enabled = resolve_config_value(&schedule.enabled, &self.config)?;
            if enabled.eq_ignore_ascii_case("false") {
                info!(schedule = %schedule.name, "disabled");
                continue;
            }

            let compiled = schedule.spec.compile().map_err(|source| {
                ScheduleError::InvalidSpec {
                    name: schedule.name.clone(),
                    source,
                }
            })?;

            info!(schedule = %schedule.name, "registered");
            let clock = self.clock.clone();
            let name = schedule.name.clone();
            handles.push(tokio::spawn(async move {
                if let Err(e) =
                    run_schedule(&name, clock, compiled, schedule.action, schedule.times).await
                {
                    error!(schedule = %name, error = %e, "schedule terminated");
                }
            }));
        }

        Ok(SchedulerHandle { handles })
    }
}

// One schedule's life: anchor at last midnight, walk the cron function
// forward to the first future trigger, sleep up to just before it, then
// loop recompute / sleep / dispatch until the repeat budget runs out.
// Recomputing from the current instant each turn re-synchronizes after any
// drift, because the compiled schedule is stateless.
async fn run_schedule(
    name: &str,
    clock: Arc<dyn Clock>,
    schedule: CronSchedule,
    action: Action,
    mut times: Option<u32>,
) -> Result<(), ScheduleError> {
    let now = clock.now_epoch_secs();
    let today = CivilTime::from_epoch(now);
    let mut next = epoch_from_parts(today.year as i64, today.month as i64, today.day as i64, 0, 0, 0);
    while next < now {
        // The schedule never returns a zero offset, but a stalled walk here
        // would spin forever, so clamp anyway.
        next += schedule.seconds_until(next).max(1);
    }
    sleep_unbounded_secs(next - now - PRE_TRIGGER_LEAD_SECS).await;

    while times.map_or(true, |t| t > 0) {
        let wait = schedule.seconds_until(clock.now_epoch_secs());
        sleep_unbounded_secs(wait).await;
        debug!(schedule = %name, "trigger");
        if let Err(source) = action.dispatch() {
            return Err(ScheduleError::ActionFailed {
                name: name.to_string(),
                source,
            });
        }
        if let Some(t) = times.as_mut() {
            *t -= 1;
        }
        tokio::time::sleep(Duration::from_millis(POST_TRIGGER_GUARD_MS)).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FakeClock;
    use crate::cron::{CronField, CronSpec};
    use crate::error::SpecError;
    use crate::scheduler::SchedulerBuilder;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn every_minute() -> CronSpec {
        CronSpec {
            secs: CronField::Single(0),
            mins: CronField::Any,
            hours: CronField::Any,
            ..Default::default()
        }
    }

    // 2025-01-01 00:00:05 UTC.
    const FIVE_PAST_MIDNIGHT_MS: i64 = 1_735_689_605_000;

    #[tokio::test]
    async fn invalid_spec_aborts_start() {
        let spec = CronSpec {
            secs: CronField::set([0, 5]),
            ..Default::default()
        };
        let result = SchedulerBuilder::new()
            .schedule(Schedule::builder("dense", spec, Action::callback(|| Ok(()))).build())
            .build()
            .start()
            .await;
        match result {
            Err(ScheduleError::InvalidSpec { name, source }) => {
                assert_eq!(name, "dense");
                assert_eq!(source, SpecError::SecondsTooDense);
            }
            _ => panic!("expected InvalidSpec"),
        }
    }

    #[tokio::test]
    async fn disabled_schedules_are_skipped() {
        let config = config::Config::builder()
            .set_override("app.poll.enabled", "false")
            .unwrap()
            .build()
            .unwrap();
        let handle = SchedulerBuilder::with_config(config)
            .schedule(
                Schedule::builder("poll", every_minute(), Action::callback(|| Ok(())))
                    .enabled("${app.poll.enabled:true}")
                    .build(),
            )
            .build()
            .start()
            .await
            .unwrap();
        assert!(handle.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn finite_schedule_fires_the_requested_number_of_times() {
        static FIRED: AtomicU32 = AtomicU32::new(0);
        let clock = Arc::new(FakeClock::at_ms(FIVE_PAST_MIDNIGHT_MS));
        let handle = SchedulerBuilder::new()
            .clock(clock)
            .schedule(
                Schedule::builder(
                    "count",
                    every_minute(),
                    Action::callback(|| {
                        FIRED.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }),
                )
                .times(3)
                .build(),
            )
            .build()
            .start()
            .await
            .unwrap();
        assert_eq!(handle.len(), 1);
        handle.join().await;
        assert_eq!(FIRED.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_action_terminates_an_infinite_schedule() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        let clock = Arc::new(FakeClock::at_ms(FIVE_PAST_MIDNIGHT_MS));
        let handle = SchedulerBuilder::new()
            .clock(clock)
            .schedule(
                Schedule::builder(
                    "flaky",
                    every_minute(),
                    Action::callback(|| {
                        CALLS.fetch_add(1, Ordering::SeqCst);
                        Err("sensor bus wedged".into())
                    }),
                )
                .build(),
            )
            .build()
            .start()
            .await
            .unwrap();
        // Without the failure this schedule would never finish; join returns
        // because the first dispatch error ends the loop.
        handle.join().await;
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn signal_action_wakes_waiters() {
        let notify = Arc::new(tokio::sync::Notify::new());
        let waiter = notify.clone();
        let observed = tokio::spawn(async move { waiter.notified().await });
        // Let the waiter register before the schedule fires.
        tokio::task::yield_now().await;

        let clock = Arc::new(FakeClock::at_ms(FIVE_PAST_MIDNIGHT_MS));
        let handle = SchedulerBuilder::new()
            .clock(clock)
            .schedule(
                Schedule::builder("wake", every_minute(), Action::signal(notify))
                    .times(1)
                    .build(),
            )
            .build()
            .start()
            .await
            .unwrap();
        handle.join().await;
        observed.await.unwrap();
    }
}
