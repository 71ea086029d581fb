//! Control context: the single place completion callbacks run.

use tokio::sync::mpsc;

use super::types::CompletionCallback;
use crate::job::{ConversionJob, JobId};

/// A finished job travelling from a worker to the control context.
pub(super) struct Completion {
    pub(super) job: ConversionJob,
    pub(super) callback: CompletionCallback,
}

/// Receiving end of the scheduler's completion channel.
///
/// Callbacks only ever run inside [`ControlContext::dispatch_next`],
/// [`ControlContext::try_dispatch`] or [`ControlContext::run`], on whatever
/// task owns the context.
pub struct ControlContext {
    rx: mpsc::Receiver<Completion>,
}

impl ControlContext {
    pub(super) fn new(rx: mpsc::Receiver<Completion>) -> Self {
        Self { rx }
    }

    /// Waits for the next finished job and runs its callback.
    ///
    /// Returns `None` once every scheduler handle has been dropped and all
    /// in-flight jobs have reported.
    pub async fn dispatch_next(&mut self) -> Option<JobId> {
        let completion = self.rx.recv().await?;
        Some(deliver(completion))
    }

    /// Runs the callback of an already finished job, if there is one.
    pub fn try_dispatch(&mut self) -> Option<JobId> {
        self.rx.try_recv().ok().map(deliver)
    }

    /// Dispatches until the channel closes. Returns how many callbacks ran.
    pub async fn run(&mut self) -> usize {
        let mut delivered = 0;
        while self.dispatch_next().await.is_some() {
            delivered += 1;
        }
        tracing::debug!(delivered, "control context drained");
        delivered
    }
}

fn deliver(completion: Completion) -> JobId {
    let Completion { job, callback } = completion;
    let id = job.id();
    tracing::trace!(job_id = %id, result = %job.result(), "dispatching completion");
    callback(job);
    id
}
