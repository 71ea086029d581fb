//! Types for the scheduler module.

use serde::{Deserialize, Serialize};

use crate::job::ConversionJob;

/// Callback run on the control context once a job has finished.
pub type CompletionCallback = Box<dyn FnOnce(ConversionJob) + Send + 'static>;

/// Snapshot of the worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    /// Jobs currently running on a worker.
    pub active_jobs: usize,
    /// Jobs waiting for a worker slot.
    pub queued_jobs: usize,
    /// Pool size.
    pub max_concurrent: usize,
    /// Jobs that finished with `Success` since startup.
    pub total_succeeded: u64,
    /// Jobs that finished with any other result since startup.
    pub total_failed: u64,
}

impl SchedulerStatus {
    /// True when nothing is queued or running.
    pub fn is_idle(&self) -> bool {
        self.active_jobs == 0 && self.queued_jobs == 0
    }

    pub fn total_finished(&self) -> u64 {
        self.total_succeeded + self.total_failed
    }
}
