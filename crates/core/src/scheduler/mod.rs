//! Job scheduler: a shared worker pool with completion delivery on a control
//! context.
//!
//! Jobs are spawned on the tokio runtime, wait for a pool slot, then run their
//! synchronous pipeline on the blocking thread pool. Each finished job is sent
//! back over a channel and its callback runs wherever the [`ControlContext`]
//! is being driven, never on a worker.
//!
//! # Example
//!
//! ```ignore
//! use plistconv_core::scheduler::{JobScheduler, SchedulerConfig};
//! use plistconv_core::{ConversionJob, ConvertOptions, Format, NativeEngine};
//!
//! let (scheduler, mut control) = JobScheduler::new(SchedulerConfig::default(), NativeEngine::new())?;
//!
//! let job = ConversionJob::new("in.plist", "out.json", Format::Json, ConvertOptions::empty());
//! scheduler.submit(job, |job| println!("{}", job.result()));
//!
//! drop(scheduler);
//! control.run().await;
//! ```

mod config;
mod control;
mod pool;
mod types;

pub use config::SchedulerConfig;
pub use control::ControlContext;
pub use pool::{JobScheduler, SchedulerError};
pub use types::{CompletionCallback, SchedulerStatus};
