//! Builds a `plist::Value` from the `plist` crate's event stream.
//!
//! The tree is assembled on an explicit stack so nesting depth is checked
//! before it can exhaust the thread's stack.

use plist::stream::{Event, OwnedEvent};
use plist::{Dictionary, Value};

use super::MAX_DEPTH;
use crate::engine::codes::{self, RawCode};

enum Frame {
    Array(Vec<Value>),
    Dictionary(Dictionary, Option<String>),
}

pub(super) fn build<I>(events: I) -> Result<Value, RawCode>
where
    I: IntoIterator<Item = Result<OwnedEvent, plist::Error>>,
{
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = None;

    for event in events {
        let event = event.map_err(|e| {
            tracing::trace!("plist event stream rejected: {}", e);
            codes::PARSE
        })?;
        let value = match event {
            Event::StartArray(_) => {
                open(&mut stack, Frame::Array(Vec::new()))?;
                continue;
            }
            Event::StartDictionary(_) => {
                open(&mut stack, Frame::Dictionary(Dictionary::new(), None))?;
                continue;
            }
            Event::EndCollection => match stack.pop() {
                Some(Frame::Array(items)) => Value::Array(items),
                Some(Frame::Dictionary(dict, None)) => Value::Dictionary(dict),
                _ => return Err(codes::PARSE),
            },
            Event::Boolean(b) => Value::Boolean(b),
            Event::Data(bytes) => Value::Data(bytes.into_owned()),
            Event::Date(date) => Value::Date(date),
            Event::Integer(i) => Value::Integer(i),
            Event::Real(f) => Value::Real(f),
            Event::String(s) => Value::String(s.into_owned()),
            Event::Uid(uid) => Value::Uid(uid),
            _ => return Err(codes::PARSE),
        };

        match stack.last_mut() {
            None if root.is_none() => root = Some(value),
            None => return Err(codes::PARSE),
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Dictionary(dict, pending)) => match pending.take() {
                Some(key) => {
                    dict.insert(key, value);
                }
                None => match value {
                    Value::String(key) => *pending = Some(key),
                    _ => return Err(codes::PARSE),
                },
            },
        }
    }

    if !stack.is_empty() {
        return Err(codes::PARSE);
    }
    root.ok_or(codes::PARSE)
}

fn open(stack: &mut Vec<Frame>, frame: Frame) -> Result<(), RawCode> {
    if stack.len() >= MAX_DEPTH {
        tracing::trace!(limit = MAX_DEPTH, "plist nesting too deep");
        return Err(codes::PARSE);
    }
    stack.push(frame);
    Ok(())
}
