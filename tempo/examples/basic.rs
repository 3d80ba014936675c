use std::sync::atomic::{AtomicU32, Ordering};
use tempo::{Action, CronField, CronSpec, Schedule, SchedulerBuilder};

static COUNTER: AtomicU32 = AtomicU32::new(0);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();

    // Every minute, at second zero.
    let every_minute = CronSpec {
        secs: CronField::Single(0),
        mins: CronField::Any,
        hours: CronField::Any,
        ..Default::default()
    };

    // Every 4 minutes of every hour.
    let every_four_minutes = CronSpec {
        secs: CronField::Single(0),
        mins: CronField::set((0u32..60).step_by(4)),
        hours: CronField::Any,
        ..Default::default()
    };

    let scheduler = SchedulerBuilder::new()
        .schedule(
            Schedule::builder(
                "heartbeat",
                every_minute,
                Action::callback(|| {
                    let count = COUNTER.fetch_add(1, Ordering::SeqCst) + 1;
                    println!("[HEARTBEAT] Execution #{count} (every minute)");
                    Ok(())
                }),
            )
            .build(),
        )
        .schedule(
            Schedule::builder(
                "background",
                every_four_minutes,
                Action::task(|| async {
                    println!("[BACKGROUND] Fire-and-forget task (every 4 minutes)");
                }),
            )
            .build(),
        )
        .build();

    let handle = scheduler.start().await?;
    println!("Both schedules running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    handle.shutdown();
    Ok(())
}
