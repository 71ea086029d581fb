//! Mock plist engine for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::engine::{EngineResult, PlistEngine, RawCode};
use crate::format::Format;

/// Document produced by [`MockEngine`]: the raw input plus a sort marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDocument {
    pub payload: Vec<u8>,
    pub sorted: bool,
}

/// A call observed by [`MockEngine`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetDebug(bool),
    Parse { bytes: usize },
    Sort,
    Encode { format: Format, pretty: Option<bool> },
}

/// Scripted outcome of a parse or encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockOutcome {
    /// Produce a value.
    #[default]
    Succeed,
    /// Report success without producing anything.
    Empty,
    /// Fail with this status code.
    Fail(RawCode),
    /// Panic inside the engine.
    Panic,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<EngineCall>,
    parse_outcome: MockOutcome,
    encode_outcome: MockOutcome,
    delay: Duration,
}

/// Mock implementation of the PlistEngine trait.
///
/// Provides controllable behavior for testing:
/// - Record every engine call for assertions
/// - Script parse/encode failures, empty results and panics
/// - Slow down parsing to observe worker concurrency
///
/// Clones share state, so a test can keep one clone while the scheduler owns
/// another.
///
/// Encoded output is `"<format>|<pretty>|<sorted>|"` followed by the input
/// bytes, which lets tests see exactly what the pipeline asked for.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_parse_outcome(&self, outcome: MockOutcome) {
        self.state().parse_outcome = outcome;
    }

    pub fn set_encode_outcome(&self, outcome: MockOutcome) {
        self.state().encode_outcome = outcome;
    }

    /// Makes every parse call block its worker for `delay`.
    pub fn set_parse_delay(&self, delay: Duration) {
        self.state().delay = delay;
    }

    /// All calls observed so far.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state().calls.clone()
    }

    pub fn parse_count(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Parse { .. }))
            .count()
    }

    /// Highest number of parse calls that were running at the same time.
    pub fn max_concurrent_parses(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: EngineCall) {
        self.state().calls.push(call);
    }

    fn encode(&self, document: &MockDocument, format: Format, pretty: Option<bool>) -> EngineResult<Vec<u8>> {
        self.record(EngineCall::Encode { format, pretty });
        let outcome = self.state().encode_outcome;
        match outcome {
            MockOutcome::Succeed => {
                let pretty = match pretty {
                    Some(true) => "pretty",
                    Some(false) => "compact",
                    None => "-",
                };
                let sorted = if document.sorted { "sorted" } else { "unsorted" };
                let mut out = format!("{}|{}|{}|", format.describe(), pretty, sorted).into_bytes();
                out.extend_from_slice(&document.payload);
                Ok(Some(out))
            }
            MockOutcome::Empty => Ok(None),
            MockOutcome::Fail(code) => Err(code),
            MockOutcome::Panic => panic!("mock engine encode panic"),
        }
    }
}

/// Decrements the in-flight counter even when a parse panics.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PlistEngine for MockEngine {
    type Document = MockDocument;

    fn name(&self) -> &str {
        "mock"
    }

    fn parse(&self, data: &[u8]) -> EngineResult<MockDocument> {
        self.record(EngineCall::Parse { bytes: data.len() });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (outcome, delay) = {
            let state = self.state();
            (state.parse_outcome, state.delay)
        };
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        match outcome {
            MockOutcome::Succeed => Ok(Some(MockDocument {
                payload: data.to_vec(),
                sorted: false,
            })),
            MockOutcome::Empty => Ok(None),
            MockOutcome::Fail(code) => Err(code),
            MockOutcome::Panic => panic!("mock engine parse panic"),
        }
    }

    fn sort(&self, document: &mut MockDocument) {
        self.record(EngineCall::Sort);
        document.sorted = true;
    }

    fn encode_binary(&self, document: &MockDocument) -> EngineResult<Vec<u8>> {
        self.encode(document, Format::Binary, None)
    }

    fn encode_xml(&self, document: &MockDocument) -> EngineResult<Vec<u8>> {
        self.encode(document, Format::Xml, None)
    }

    fn encode_json(&self, document: &MockDocument, pretty: bool) -> EngineResult<Vec<u8>> {
        self.encode(document, Format::Json, Some(pretty))
    }

    fn encode_openstep(&self, document: &MockDocument, pretty: bool) -> EngineResult<Vec<u8>> {
        self.encode(document, Format::OpenStep, Some(pretty))
    }

    fn set_debug(&self, enabled: bool) {
        self.record(EngineCall::SetDebug(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::codes;

    #[test]
    fn test_records_calls_in_order() {
        let engine = MockEngine::new();
        engine.set_debug(true);
        let mut doc = engine.parse(b"abc").unwrap().unwrap();
        engine.sort(&mut doc);
        let out = engine.encode_json(&doc, false).unwrap().unwrap();

        assert_eq!(out, b"JSON|compact|sorted|abc".to_vec());
        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::SetDebug(true),
                EngineCall::Parse { bytes: 3 },
                EngineCall::Sort,
                EngineCall::Encode {
                    format: Format::Json,
                    pretty: Some(false)
                },
            ]
        );
    }

    #[test]
    fn test_scripted_outcomes() {
        let engine = MockEngine::new();
        engine.set_parse_outcome(MockOutcome::Fail(codes::PARSE));
        assert_eq!(engine.parse(b"x"), Err(codes::PARSE));

        engine.set_parse_outcome(MockOutcome::Empty);
        assert_eq!(engine.parse(b"x"), Ok(None));

        let doc = MockDocument {
            payload: vec![],
            sorted: false,
        };
        engine.set_encode_outcome(MockOutcome::Fail(codes::FORMAT));
        assert_eq!(engine.encode_xml(&doc), Err(codes::FORMAT));
        assert_eq!(engine.parse_count(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let engine = MockEngine::new();
        let observer = engine.clone();
        engine.parse(b"1").unwrap();
        assert_eq!(observer.parse_count(), 1);
        assert_eq!(observer.max_concurrent_parses(), 1);
    }
}
