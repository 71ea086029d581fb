//! Conversion jobs.
//!
//! A [`ConversionJob`] converts one input file into one output file. Running
//! it drives a [`crate::engine::PlistEngine`] through
//! read → parse → (sort) → encode → write, stopping at the first failure, and
//! records the terminal [`crate::PlistError`] exactly once.
//!
//! # Example
//!
//! ```ignore
//! use plistconv_core::{ConversionJob, ConvertOptions, Format, NativeEngine};
//!
//! let mut job = ConversionJob::new(
//!     "Info.plist",
//!     "Info.json",
//!     Format::Json,
//!     ConvertOptions::SORT | ConvertOptions::COMPACT,
//! );
//! let result = job.run(&NativeEngine::new());
//! println!("{}", result);
//! ```

mod conversion;
mod types;

pub use conversion::ConversionJob;
pub use types::{JobId, JobState};
