//! Types for the job module.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::PlistError;

/// Unique identifier of a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of a job. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Built, not yet started.
    Created,
    /// Pipeline is executing on a worker.
    Running,
    /// Finished with a terminal result.
    Completed(PlistError),
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}
