//! Worker pool implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Semaphore};

use crate::engine::PlistEngine;
use crate::job::{ConversionJob, JobId};

use super::config::SchedulerConfig;
use super::control::{Completion, ControlContext};
use super::types::SchedulerStatus;

/// Error type for scheduler construction.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// No tokio runtime to spawn workers on.
    #[error("Scheduler must be created inside a tokio runtime")]
    NoRuntime,

    /// Configuration cannot produce a working pool.
    #[error("Invalid scheduler configuration: {0}")]
    InvalidConfig(String),
}

/// Tracks statistics for the worker pool.
#[derive(Default)]
struct PoolStats {
    active: AtomicU64,
    queued: AtomicU64,
    total_succeeded: AtomicU64,
    total_failed: AtomicU64,
}

impl PoolStats {
    fn to_status(&self, max_concurrent: usize) -> SchedulerStatus {
        SchedulerStatus {
            active_jobs: self.active.load(Ordering::Relaxed) as usize,
            queued_jobs: self.queued.load(Ordering::Relaxed) as usize,
            max_concurrent,
            total_succeeded: self.total_succeeded.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
        }
    }
}

/// Shared pool that runs conversion jobs and reports them to a
/// [`ControlContext`].
///
/// Cloning is cheap and every clone feeds the same pool and control context.
/// The control context closes once all clones are dropped and the last
/// in-flight job has reported.
pub struct JobScheduler<E: PlistEngine> {
    config: SchedulerConfig,
    engine: Arc<E>,
    runtime: Handle,
    semaphore: Arc<Semaphore>,
    stats: Arc<PoolStats>,
    completions: mpsc::Sender<Completion>,
}

impl<E: PlistEngine> Clone for JobScheduler<E> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            engine: Arc::clone(&self.engine),
            runtime: self.runtime.clone(),
            semaphore: Arc::clone(&self.semaphore),
            stats: Arc::clone(&self.stats),
            completions: self.completions.clone(),
        }
    }
}

impl<E: PlistEngine + 'static> JobScheduler<E> {
    /// Creates a scheduler bound to the current tokio runtime, together with
    /// the control context its completions are delivered to.
    pub fn new(config: SchedulerConfig, engine: E) -> Result<(Self, ControlContext), SchedulerError> {
        if config.max_concurrent_jobs == 0 {
            return Err(SchedulerError::InvalidConfig(
                "max_concurrent_jobs must be at least 1".to_string(),
            ));
        }
        if config.notification_buffer == 0 {
            return Err(SchedulerError::InvalidConfig(
                "notification_buffer must be at least 1".to_string(),
            ));
        }
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let (tx, rx) = mpsc::channel(config.notification_buffer);
        let scheduler = Self {
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_jobs)),
            config,
            engine: Arc::new(engine),
            runtime,
            stats: Arc::new(PoolStats::default()),
            completions: tx,
        };

        tracing::debug!(
            engine = scheduler.engine.name(),
            max_concurrent_jobs = scheduler.config.max_concurrent_jobs,
            "scheduler started"
        );
        Ok((scheduler, ControlContext::new(rx)))
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the current pool status.
    pub fn status(&self) -> SchedulerStatus {
        self.stats.to_status(self.config.max_concurrent_jobs)
    }

    /// Queues `job` and returns its id without waiting.
    ///
    /// `on_complete` receives the finished job on the control context, once.
    /// Works from inside or outside the runtime.
    pub fn submit<F>(&self, job: ConversionJob, on_complete: F) -> JobId
    where
        F: FnOnce(ConversionJob) + Send + 'static,
    {
        let job_id = job.id();
        let engine = Arc::clone(&self.engine);
        let semaphore = Arc::clone(&self.semaphore);
        let stats = Arc::clone(&self.stats);
        let completions = self.completions.clone();

        tracing::debug!(
            job_id = %job_id,
            input = %job.input_path().display(),
            output = %job.output_path().display(),
            format = %job.format(),
            "job submitted"
        );
        stats.queued.fetch_add(1, Ordering::Relaxed);

        self.runtime.spawn(async move {
            let permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    stats.queued.fetch_sub(1, Ordering::Relaxed);
                    tracing::error!(job_id = %job_id, "worker pool closed, job dropped");
                    return;
                }
            };
            stats.queued.fetch_sub(1, Ordering::Relaxed);
            stats.active.fetch_add(1, Ordering::Relaxed);

            let finished = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let mut job = job;
                job.run(engine.as_ref());
                job
            })
            .await;

            stats.active.fetch_sub(1, Ordering::Relaxed);
            let job = match finished {
                Ok(job) => job,
                Err(e) => {
                    stats.total_failed.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(job_id = %job_id, "Worker failed before reporting: {}", e);
                    return;
                }
            };

            if job.result().is_success() {
                stats.total_succeeded.fetch_add(1, Ordering::Relaxed);
            } else {
                stats.total_failed.fetch_add(1, Ordering::Relaxed);
            }

            let completion = Completion {
                job,
                callback: Box::new(on_complete),
            };
            if completions.send(completion).await.is_err() {
                tracing::error!(job_id = %job_id, "Control context is gone, completion not delivered");
            }
        });

        job_id
    }
}
