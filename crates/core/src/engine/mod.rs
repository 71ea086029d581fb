//! Plist engine capability.
//!
//! The conversion pipeline only talks to a [`PlistEngine`]: parse a buffer,
//! optionally sort, encode to one of four formats, toggle debug tracing.
//! Failures come back as raw status codes from [`codes`], which the pipeline
//! maps onto [`crate::PlistError`].
//!
//! [`NativeEngine`] is the bundled implementation.

pub mod codes;
mod native;
mod traits;

pub use codes::RawCode;
pub use native::{NativeDocument, NativeEngine};
pub use traits::{EngineResult, PlistEngine};
