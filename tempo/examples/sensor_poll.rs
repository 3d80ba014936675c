//! The firmware scenario on the host: sample a (simulated) environmental
//! sensor every 10 seconds aligned to the clock grid, print a quarter-hour
//! summary from a cron schedule, and log timestamps in local civil time
//! derived from a declarative timezone rule.

use config::{Config, File, FileFormat};
use tempo::{
    to_local, Action, Clock, CronField, CronSpec, IntervalUnit, Schedule, SchedulerBuilder,
    SystemClock, TimeIntoInterval, TimezoneInfo,
};

const APPLICATION_TOML: &str = r#"
[app.summary]
enabled = true

[timezone]
offset = { hour = -4 }
dst_start = { month = 3, day = 9, hour = 2 }
dst_end = { month = 11, day = 2, hour = 2 }
dst_adjust = { hour = 1 }
"#;

// Pretend measurements, wobbling around plausible room values.
fn read_sensor(sample: u32) -> (f64, f64) {
    let temperature = 21.0 + (sample % 7) as f64 * 0.1;
    let humidity = 48.0 + (sample % 5) as f64 * 0.5;
    (temperature, humidity)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();

    let config = Config::builder()
        .add_source(File::from_str(APPLICATION_TOML, FileFormat::Toml))
        .build()?;
    let tz: TimezoneInfo = config.get("timezone")?;
    println!("Timezone: {}", tz.label());

    let quarter_hours = CronSpec {
        secs: CronField::Single(0),
        mins: CronField::set([0, 15, 30, 45]),
        hours: CronField::Any,
        ..Default::default()
    };
    let scheduler = SchedulerBuilder::with_config(config)
        .schedule(
            Schedule::builder(
                "summary",
                quarter_hours,
                Action::callback(|| {
                    println!("[SUMMARY] quarter-hour mark");
                    Ok(())
                }),
            )
            .enabled("${app.summary.enabled:true}")
            .build(),
        )
        .build();
    let handle = scheduler.start().await?;

    // Poll the sensor every 10 seconds, aligned to :00, :10, :20, ...
    let clock = SystemClock;
    let mut poll = TimeIntoInterval::new(IntervalUnit::Seconds, 10, 0)?;
    for sample in 0..6 {
        poll.interval_sleep().await;
        let (temperature, humidity) = read_sensor(sample);
        let local = to_local(clock.now_epoch_secs(), &tz);
        println!("{local} Temperature: {temperature:.2} C | Humidity: {humidity:.2} %");
    }

    handle.shutdown();
    Ok(())
}
