//! Bounded-concurrency task queue with a drain barrier
//!
//! This module handles:
//! - Spawning crawl tasks, including tasks added by running tasks
//! - Global concurrency limiting via a semaphore
//! - Tracking pending plus in-flight work so phases can be separated
//! - Isolating and logging task failures

use crate::HarvestError;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};

/// Completion counters for the tasks a scheduler has run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub completed: usize,
    pub failed: usize,
}

struct Shared {
    /// Global semaphore for limiting concurrent tasks
    permits: Arc<Semaphore>,

    /// Tasks added but not yet finished, queued or running
    outstanding: watch::Sender<usize>,

    completed: AtomicUsize,
    failed: AtomicUsize,
}

/// Decrements the outstanding count when a task ends, panics included
struct OutstandingGuard(Arc<Shared>);

impl Drop for OutstandingGuard {
    fn drop(&mut self) {
        self.0.outstanding.send_modify(|count| *count -= 1);
    }
}

/// Scheduler runs crawl tasks on the tokio runtime
///
/// Cloning a scheduler yields another handle to the same queue, which is how
/// a running task adds follow-up work. At most `concurrency` tasks run at
/// once; the rest wait for a permit.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
    concurrency: usize,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// A concurrency of zero is treated as one.
    pub fn new(concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        let (outstanding, _) = watch::channel(0);

        Self {
            shared: Arc::new(Shared {
                permits: Arc::new(Semaphore::new(concurrency)),
                outstanding,
                completed: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
            }),
            concurrency,
        }
    }

    /// Adds a task to the queue
    ///
    /// The task is counted as outstanding before this call returns, so a task
    /// that adds follow-up work keeps the queue from draining until that work
    /// finishes too. A failing task is logged and counted; it never affects
    /// other tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn add<F, Fut>(&self, label: impl Into<String>, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), HarvestError>> + Send + 'static,
    {
        let label = label.into();
        self.shared.outstanding.send_modify(|count| *count += 1);
        let guard = OutstandingGuard(Arc::clone(&self.shared));
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            let _guard = guard;
            let Ok(_permit) = shared.permits.clone().acquire_owned().await else {
                return;
            };

            match task().await {
                Ok(()) => {
                    shared.completed.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!("Task finished: {}", label);
                }
                Err(e) => {
                    shared.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Task failed: {}: {}", label, e);
                }
            }
        });
    }

    /// Waits until no task is queued or running
    ///
    /// Returns immediately when the queue is already idle.
    pub async fn drain(&self) {
        let mut idle = self.shared.outstanding.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait
        let _ = idle.wait_for(|count| *count == 0).await;
    }

    /// Number of tasks queued or running right now
    pub fn outstanding(&self) -> usize {
        *self.shared.outstanding.borrow()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            completed: self.shared.completed.load(Ordering::Relaxed),
            failed: self.shared.failed.load(Ordering::Relaxed),
        }
    }
}
