//! Segmented sleep: unbounded-duration suspension built from bounded chunks.
//!
//! The host sleep is only trusted up to a ceiling, so long waits are split
//! into fixed-size segments. Each segment is a yield point, which also bounds
//! how long a cancellation can go unnoticed.

use std::time::Duration;

/// Chunk ceiling for the seconds-denominated sleep used by the scheduler.
pub const MAX_SLEEP_CHUNK_SECS: i64 = 1000;

/// Chunk ceiling for the milliseconds-denominated sleep used by the interval
/// aligner.
pub const MAX_SLEEP_CHUNK_MS: i64 = 100;

/// Sleeps for `secs` seconds in segments of at most
/// [`MAX_SLEEP_CHUNK_SECS`]. Returns immediately for non-positive input.
pub async fn sleep_unbounded_secs(secs: i64) {
    let mut remaining = secs;
    while remaining > 0 {
        let chunk = remaining.min(MAX_SLEEP_CHUNK_SECS);
        tokio::time::sleep(Duration::from_secs(chunk as u64)).await;
        remaining -= chunk;
    }
}

/// Sleeps for `ms` milliseconds in segments of at most
/// [`MAX_SLEEP_CHUNK_MS`]. Returns immediately for non-positive input.
pub async fn sleep_unbounded_ms(ms: i64) {
    let mut remaining = ms;
    while remaining > 0 {
        let chunk = remaining.min(MAX_SLEEP_CHUNK_MS);
        tokio::time::sleep(Duration::from_millis(chunk as u64)).await;
        remaining -= chunk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn seconds_sleep_totals_exactly() {
        let start = Instant::now();
        sleep_unbounded_secs(2500).await;
        assert_eq!(start.elapsed(), Duration::from_secs(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn millis_sleep_totals_exactly() {
        let start = Instant::now();
        sleep_unbounded_ms(250).await;
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn non_positive_durations_return_immediately() {
        let start = Instant::now();
        sleep_unbounded_secs(0).await;
        sleep_unbounded_secs(-5).await;
        sleep_unbounded_ms(-100).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
