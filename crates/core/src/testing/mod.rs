//! Testing utilities and mock implementations.
//!
//! [`MockEngine`] stands in for a real plist engine so the conversion
//! pipeline and the scheduler can be exercised without real documents.
//!
//! # Example
//!
//! ```rust,ignore
//! use plistconv_core::testing::{MockEngine, MockOutcome};
//! use plistconv_core::engine::codes;
//!
//! let engine = MockEngine::new();
//! engine.set_parse_outcome(MockOutcome::Fail(codes::PARSE));
//!
//! let observer = engine.clone();
//! // hand `engine` to a JobScheduler, assert on `observer.calls()`
//! ```

mod mock_engine;

pub use mock_engine::{EngineCall, MockDocument, MockEngine, MockOutcome};
