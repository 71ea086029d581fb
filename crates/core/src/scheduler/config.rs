//! Configuration for the scheduler module.

use serde::{Deserialize, Serialize};

/// Configuration for the job scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum jobs running at the same time. `1` makes the pool serial.
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,

    /// Completion notifications buffered before workers wait on the
    /// control context.
    #[serde(default = "default_notification_buffer")]
    pub notification_buffer: usize,
}

fn default_max_concurrent_jobs() -> usize {
    4
}

fn default_notification_buffer() -> usize {
    64
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: default_max_concurrent_jobs(),
            notification_buffer: default_notification_buffer(),
        }
    }
}

impl SchedulerConfig {
    /// Sets the maximum number of concurrent jobs.
    pub fn with_max_concurrent_jobs(mut self, max: usize) -> Self {
        self.max_concurrent_jobs = max;
        self
    }

    /// Sets the completion channel capacity.
    pub fn with_notification_buffer(mut self, size: usize) -> Self {
        self.notification_buffer = size;
        self
    }

    /// Serial pool: one job at a time.
    pub fn serial() -> Self {
        Self::default().with_max_concurrent_jobs(1)
    }
}
