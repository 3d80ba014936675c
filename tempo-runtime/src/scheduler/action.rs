use crate::error::BoxError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Notify;

/// Boxed unit of asynchronous work produced per trigger.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// What a schedule does when it fires.
///
/// The variant is chosen by the caller at registration time and dispatched
/// with a plain match, so the scheduler never inspects runtime types:
///
/// - `Callback` runs synchronously on the scheduler's task; an `Err` return
///   terminates that schedule.
/// - `Task` is launched as an independent tokio task and not awaited.
/// - `Signal` wakes every task currently waiting on the notifier.
#[derive(Clone)]
pub enum Action {
    Callback(Arc<dyn Fn() -> Result<(), BoxError> + Send + Sync>),
    Task(Arc<dyn Fn() -> BoxFuture + Send + Sync>),
    Signal(Arc<Notify>),
}

impl Action {
    /// Synchronous callback action.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Action::Callback(Arc::new(f))
    }

    /// Fire-and-forget async task action.
    pub fn task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Action::Task(Arc::new(move || Box::pin(f()) as BoxFuture))
    }

    /// Broadcast-wakeup action.
    pub fn signal(notify: Arc<Notify>) -> Self {
        Action::Signal(notify)
    }

    pub(crate) fn dispatch(&self) -> Result<(), BoxError> {
        match self {
            Action::Callback(f) => f(),
            Action::Task(f) => {
                tokio::spawn(f());
                Ok(())
            }
            Action::Signal(notify) => {
                notify.notify_waiters();
                Ok(())
            }
        }
    }
}
