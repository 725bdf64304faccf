//! Periodic tick source
//!
//! A [`TickerHandle`] owns a spawned interval task. The task is aborted
//! exactly once, either by [`TickerHandle::cancel`] or when the handle is
//! dropped, so a ticker can never outlive its owner.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Owned handle to a running tick source
#[derive(Debug)]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl TickerHandle {
    /// Spawn a task calling `on_tick` once per `period`
    ///
    /// The first call happens one full period after spawning. The task ends
    /// on its own when `on_tick` returns `false`.
    pub fn spawn<F>(runtime: &Handle, period: Duration, generation: u64, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        debug!(
            generation,
            period_ms = period.as_millis(),
            "Starting tick source"
        );

        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !on_tick() {
                    trace!(generation, "Tick source finished");
                    break;
                }
            }
        });

        Self {
            task: Some(task),
            generation,
        }
    }

    /// Generation this ticker was started for
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the task has neither been cancelled nor finished
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Abort the task
    ///
    /// Returns `true` on the first call only.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                debug!(generation = self.generation, "Stopped tick source");
                true
            },
            None => false,
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
