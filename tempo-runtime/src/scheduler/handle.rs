/// Handle for a running scheduler
/// Used to control and shutdown the scheduler
pub struct SchedulerHandle {
    pub(crate) handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Number of schedules still registered with the runtime.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Shutdown the scheduler by aborting every schedule task. Each task is
    /// cancelled at its next suspension point, at worst one sleep chunk away.
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
    }

    /// Wait for every schedule to run to completion. Only returns when all
    /// schedules carry a finite repeat budget or terminate on an action
    /// failure.
    pub async fn join(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
