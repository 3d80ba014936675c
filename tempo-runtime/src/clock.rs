use std::time::{SystemTime, UNIX_EPOCH};

/// Read-only wall-clock capability.
///
/// The scheduler and the interval aligner take a `Clock` as a constructor
/// dependency instead of reading a global, so tests can drive them with a
/// fake clock.
pub trait Clock: Send + Sync {
    /// Current UTC wall-clock time as milliseconds since the Unix epoch.
    fn now_epoch_ms(&self) -> i64;

    /// Current UTC wall-clock time as whole seconds since the Unix epoch.
    fn now_epoch_secs(&self) -> i64 {
        self.now_epoch_ms().div_euclid(1000)
    }
}

/// The process-wide system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Manually driven clock for deterministic tests.
    pub(crate) struct FakeClock(AtomicI64);

    impl FakeClock {
        pub(crate) fn at_ms(ms: i64) -> Self {
            FakeClock(AtomicI64::new(ms))
        }

        pub(crate) fn set_ms(&self, ms: i64) {
            self.0.store(ms, Ordering::SeqCst);
        }

        pub(crate) fn advance_ms(&self, ms: i64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for FakeClock {
        fn now_epoch_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }
}
