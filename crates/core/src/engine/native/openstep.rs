//! OpenStep (old-style ASCII) plist reader and writer.
//!
//! Grammar accepted by the reader:
//!
//! ```text
//! value  := dict | array | data | string
//! dict   := '{' (string '=' value ';')* '}'
//! array  := '(' (value (',' value)* ','?)? ')'
//! data   := '<' hex digits and whitespace '>'
//! string := quoted | unquoted
//! ```
//!
//! `//` and `/* */` comments are skipped wherever whitespace is allowed.
//! Unquoted tokens that read as numbers become integers or reals.

use plist::{Dictionary, Value};
use std::fmt::Write as _;

use super::MAX_DEPTH;
use crate::engine::codes::{self, RawCode};

pub(super) fn parse(data: &[u8]) -> Result<Value, RawCode> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let text = std::str::from_utf8(data).map_err(|_| codes::PARSE)?;

    let mut reader = Reader {
        src: text,
        pos: 0,
        depth: 0,
    };
    reader.skip_trivia()?;
    let value = reader.value()?;
    reader.skip_trivia()?;
    if reader.pos != text.len() {
        tracing::trace!(offset = reader.pos, "trailing content after openstep value");
        return Err(codes::PARSE);
    }
    Ok(value)
}

/// Encodes `value` as OpenStep. Pretty output is indented by two spaces and
/// ends with a newline.
pub(super) fn encode(value: &Value, pretty: bool) -> Result<Vec<u8>, RawCode> {
    let mut out = String::new();
    write_value(&mut out, value, pretty, 0)?;
    if pretty {
        out.push('\n');
    }
    Ok(out.into_bytes())
}

fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '+' | '/' | ':' | '.' | '-')
}

fn looks_numeric(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit())
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

fn numeric_value(token: &str) -> Option<Value> {
    if !looks_numeric(token) {
        return None;
    }
    if let Ok(i) = token.parse::<i64>() {
        return Some(Value::Integer(i.into()));
    }
    if let Ok(u) = token.parse::<u64>() {
        return Some(Value::Integer(u.into()));
    }
    token.parse::<f64>().ok().map(Value::Real)
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, want: char) -> Result<(), RawCode> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            other => {
                tracing::trace!(offset = self.pos, expected = %want, found = ?other, "unexpected openstep token");
                Err(codes::PARSE)
            }
        }
    }

    fn skip_trivia(&mut self) -> Result<(), RawCode> {
        loop {
            let rest = &self.src[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                let end = trimmed[2..].find("*/").ok_or(codes::PARSE)?;
                self.pos += end + 4;
            } else {
                return Ok(());
            }
        }
    }

    fn value(&mut self) -> Result<Value, RawCode> {
        match self.peek() {
            Some('{') => self.nested(Self::dictionary),
            Some('(') => self.nested(Self::array),
            Some('<') => self.data(),
            Some('"') | Some('\'') => self.quoted().map(Value::String),
            Some(c) if is_unquoted_char(c) => {
                let token = self.unquoted();
                Ok(numeric_value(token).unwrap_or_else(|| Value::String(token.to_string())))
            }
            _ => Err(codes::PARSE),
        }
    }

    fn nested(&mut self, read: fn(&mut Self) -> Result<Value, RawCode>) -> Result<Value, RawCode> {
        if self.depth >= MAX_DEPTH {
            tracing::trace!(offset = self.pos, limit = MAX_DEPTH, "openstep nesting too deep");
            return Err(codes::PARSE);
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn key(&mut self) -> Result<String, RawCode> {
        match self.peek() {
            Some('"') | Some('\'') => self.quoted(),
            Some(c) if is_unquoted_char(c) => Ok(self.unquoted().to_string()),
            _ => Err(codes::PARSE),
        }
    }

    fn dictionary(&mut self) -> Result<Value, RawCode> {
        self.expect('{')?;
        let mut dict = Dictionary::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Dictionary(dict));
            }
            let key = self.key()?;
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let item = self.value()?;
            self.skip_trivia()?;
            self.expect(';')?;
            dict.insert(key, item);
        }
    }

    fn array(&mut self) -> Result<Value, RawCode> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(')') {
                self.bump();
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') => {}
                _ => return Err(codes::PARSE),
            }
        }
    }

    fn data(&mut self) -> Result<Value, RawCode> {
        self.expect('<')?;
        let mut bytes = Vec::new();
        let mut high: Option<u8> = None;
        loop {
            let c = self.bump().ok_or(codes::PARSE)?;
            if c == '>' {
                break;
            }
            if c.is_ascii_whitespace() {
                continue;
            }
            let nibble = c.to_digit(16).ok_or(codes::PARSE)? as u8;
            match high.take() {
                Some(h) => bytes.push(h << 4 | nibble),
                None => high = Some(nibble),
            }
        }
        if high.is_some() {
            return Err(codes::PARSE);
        }
        Ok(Value::Data(bytes))
    }

    fn unquoted(&mut self) -> &str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_unquoted_char(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn quoted(&mut self) -> Result<String, RawCode> {
        let delim = self.bump().ok_or(codes::PARSE)?;
        let mut out = String::new();
        loop {
            match self.bump().ok_or(codes::PARSE)? {
                c if c == delim => return Ok(out),
                '\\' => out.push(self.escape()?),
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char, RawCode> {
        let c = self.bump().ok_or(codes::PARSE)?;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            'a' => '\u{7}',
            'u' | 'U' => {
                let end = self.pos + 4;
                let hex = self.src.get(self.pos..end).ok_or(codes::PARSE)?;
                if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(codes::PARSE);
                }
                let code = u32::from_str_radix(hex, 16).map_err(|_| codes::PARSE)?;
                self.pos = end;
                char::from_u32(code).ok_or(codes::PARSE)?
            }
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or(codes::PARSE)?
            }
            other => other,
        };
        Ok(decoded)
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_string(out: &mut String, s: &str) {
    if !s.is_empty() && s.chars().all(is_unquoted_char) && !looks_numeric(s) {
        out.push_str(s);
        return;
    }
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\U{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_value(out: &mut String, value: &Value, pretty: bool, depth: usize) -> Result<(), RawCode> {
    match value {
        Value::Dictionary(dict) => {
            out.push('{');
            for (key, item) in dict.iter() {
                if pretty {
                    newline(out, depth + 1);
                }
                write_string(out, key);
                out.push_str(if pretty { " = " } else { "=" });
                write_value(out, item, pretty, depth + 1)?;
                out.push(';');
            }
            if pretty && !dict.is_empty() {
                newline(out, depth);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if pretty {
                    newline(out, depth + 1);
                }
                write_value(out, item, pretty, depth + 1)?;
            }
            if pretty && !items.is_empty() {
                newline(out, depth);
            }
            out.push(')');
        }
        Value::String(s) => write_string(out, s),
        Value::Integer(i) => {
            if let Some(signed) = i.as_signed() {
                let _ = write!(out, "{}", signed);
            } else if let Some(unsigned) = i.as_unsigned() {
                let _ = write!(out, "{}", unsigned);
            } else {
                return Err(codes::FORMAT);
            }
        }
        Value::Real(f) => {
            if !f.is_finite() {
                return Err(codes::FORMAT);
            }
            let _ = write!(out, "{:?}", f);
        }
        Value::Boolean(b) => out.push(if *b { '1' } else { '0' }),
        Value::Data(bytes) => {
            out.push('<');
            for b in bytes {
                let _ = write!(out, "{:02x}", b);
            }
            out.push('>');
        }
        // dates and UIDs have no OpenStep spelling
        _ => return Err(codes::FORMAT),
    }
    Ok(())
}
