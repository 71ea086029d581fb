//! Native plist engine.
//!
//! Binary and XML documents go through the `plist` crate, JSON through
//! `serde_json`, and OpenStep through the reader/writer in [`openstep`].
//! Every format decodes into the same [`plist::Value`] tree.

mod events;
mod json;
mod openstep;

use plist::stream::{BinaryReader, XmlReader};
use plist::Value;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};

use super::codes::{self, RawCode};
use super::traits::{EngineResult, PlistEngine};
use crate::format::Format;

/// Process-wide debug switch shared by every `NativeEngine`.
static DEBUG_TRACE: AtomicBool = AtomicBool::new(false);

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Deepest array/dictionary nesting any reader accepts.
const MAX_DEPTH: usize = 512;

/// Decoded document produced by [`NativeEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct NativeDocument(Value);

impl NativeDocument {
    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for NativeDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Engine backed by the `plist` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Whether debug tracing is currently on, process-wide.
    pub fn debug_enabled() -> bool {
        DEBUG_TRACE.load(Ordering::Relaxed)
    }

    /// Guesses the serialization of an input buffer from its leading bytes.
    ///
    /// A leading `{` is reported as JSON; [`PlistEngine::parse`] falls back to
    /// OpenStep when the JSON reader rejects it.
    pub fn detect_format(data: &[u8]) -> Option<Format> {
        if data.is_empty() {
            return None;
        }
        if data.starts_with(b"bplist") {
            return Some(Format::Binary);
        }
        let text = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        let start = text
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(text.len());
        let text = &text[start..];
        if text.starts_with(b"<?xml") || text.starts_with(b"<plist") || text.starts_with(b"<!DOCTYPE")
        {
            return Some(Format::Xml);
        }
        match text.first() {
            Some(b'{') | Some(b'[') => Some(Format::Json),
            _ => Some(Format::OpenStep),
        }
    }

    fn finish(&self, what: &str, result: Result<Vec<u8>, RawCode>) -> EngineResult<Vec<u8>> {
        match result {
            Ok(bytes) => {
                if Self::debug_enabled() {
                    tracing::trace!(format = what, bytes = bytes.len(), "encoded plist");
                }
                Ok(Some(bytes))
            }
            Err(code) => {
                if Self::debug_enabled() {
                    tracing::trace!(format = what, code, "plist encoding failed");
                }
                Err(code)
            }
        }
    }
}

impl PlistEngine for NativeEngine {
    type Document = NativeDocument;

    fn name(&self) -> &str {
        "native"
    }

    fn parse(&self, data: &[u8]) -> EngineResult<NativeDocument> {
        let Some(format) = Self::detect_format(data) else {
            return Err(codes::INVALID_ARG);
        };
        if Self::debug_enabled() {
            tracing::trace!(detected = %format, bytes = data.len(), "parsing plist");
        }

        let parsed = match format {
            Format::Binary => events::build(BinaryReader::new(Cursor::new(data))),
            Format::Xml => events::build(XmlReader::new(data)),
            Format::Json => json::parse(data).or_else(|code| {
                if first_significant_byte(data) == Some(b'{') {
                    openstep::parse(data)
                } else {
                    Err(code)
                }
            }),
            Format::OpenStep => openstep::parse(data),
        };

        match parsed {
            Ok(value) => Ok(Some(NativeDocument(value))),
            Err(code) => {
                if Self::debug_enabled() {
                    tracing::trace!(detected = %format, code, "plist parsing failed");
                }
                Err(code)
            }
        }
    }

    fn sort(&self, document: &mut NativeDocument) {
        sort_value(&mut document.0);
    }

    fn encode_binary(&self, document: &NativeDocument) -> EngineResult<Vec<u8>> {
        let mut buf = Vec::new();
        let result = document
            .0
            .to_writer_binary(&mut buf)
            .map(|_| buf)
            .map_err(|_| codes::FORMAT);
        self.finish("binary", result)
    }

    fn encode_xml(&self, document: &NativeDocument) -> EngineResult<Vec<u8>> {
        let mut buf = Vec::new();
        let result = document
            .0
            .to_writer_xml(&mut buf)
            .map(|_| buf)
            .map_err(|_| codes::FORMAT);
        self.finish("xml", result)
    }

    fn encode_json(&self, document: &NativeDocument, pretty: bool) -> EngineResult<Vec<u8>> {
        self.finish("json", json::encode(&document.0, pretty))
    }

    fn encode_openstep(&self, document: &NativeDocument, pretty: bool) -> EngineResult<Vec<u8>> {
        self.finish("openstep", openstep::encode(&document.0, pretty))
    }

    fn set_debug(&self, enabled: bool) {
        DEBUG_TRACE.store(enabled, Ordering::Relaxed);
    }
}

fn first_significant_byte(data: &[u8]) -> Option<u8> {
    let text = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    text.iter().copied().find(|b| !b.is_ascii_whitespace())
}

fn sort_value(value: &mut Value) {
    match value {
        Value::Dictionary(dict) => {
            dict.sort_keys();
            dict.values_mut().for_each(sort_value);
        }
        Value::Array(items) => items.iter_mut().for_each(sort_value),
        _ => {}
    }
}
