//! Trait definitions for the plist engine.

use super::codes::RawCode;

/// Result of an engine call.
///
/// `Err` carries a non-success status code. `Ok(None)` is a call that
/// reported success but produced nothing; the pipeline classifies that case
/// itself.
pub type EngineResult<T> = Result<Option<T>, RawCode>;

/// The parse/encode capability a conversion job drives.
///
/// Documents and encoded buffers are owned values; dropping them releases
/// whatever the engine allocated.
pub trait PlistEngine: Send + Sync {
    /// Decoded in-memory document.
    type Document: Send;

    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Parses a complete input buffer in any format the engine recognises.
    fn parse(&self, data: &[u8]) -> EngineResult<Self::Document>;

    /// Sorts every dictionary of the document by key, in place.
    fn sort(&self, document: &mut Self::Document);

    fn encode_binary(&self, document: &Self::Document) -> EngineResult<Vec<u8>>;

    fn encode_xml(&self, document: &Self::Document) -> EngineResult<Vec<u8>>;

    /// Encodes to JSON; `pretty` adds indentation and line breaks.
    fn encode_json(&self, document: &Self::Document, pretty: bool) -> EngineResult<Vec<u8>>;

    /// Encodes to OpenStep; `pretty` adds indentation and line breaks.
    fn encode_openstep(&self, document: &Self::Document, pretty: bool) -> EngineResult<Vec<u8>>;

    /// Toggles the engine's debug tracing.
    ///
    /// The flag is process-wide. Jobs running concurrently observe each
    /// other's toggles; callers accept that race rather than serialising on it.
    fn set_debug(&self, enabled: bool);
}
