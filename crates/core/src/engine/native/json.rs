//! JSON reader and writer over `plist::Value`.

use plist::{Dictionary, Value};
use serde_json::Value as Json;

use crate::engine::codes::{self, RawCode};

pub(super) fn parse(data: &[u8]) -> Result<Value, RawCode> {
    let json: Json = serde_json::from_slice(data).map_err(|e| {
        tracing::trace!("json rejected: {}", e);
        codes::PARSE
    })?;
    from_json(json)
}

/// Encodes `value` as JSON. Pretty output ends with a newline.
pub(super) fn encode(value: &Value, pretty: bool) -> Result<Vec<u8>, RawCode> {
    let json = to_json(value)?;
    let mut out = if pretty {
        serde_json::to_vec_pretty(&json)
    } else {
        serde_json::to_vec(&json)
    }
    .map_err(|_| codes::UNKNOWN)?;
    if pretty {
        out.push(b'\n');
    }
    Ok(out)
}

fn from_json(json: Json) -> Result<Value, RawCode> {
    let value = match json {
        // plists have no null
        Json::Null => return Err(codes::PARSE),
        Json::Bool(b) => Value::Boolean(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Integer(u.into())
            } else {
                Value::Real(n.as_f64().ok_or(codes::PARSE)?)
            }
        }
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::Array(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Json::Object(map) => {
            let mut dict = Dictionary::new();
            for (key, item) in map {
                dict.insert(key, from_json(item)?);
            }
            Value::Dictionary(dict)
        }
    };
    Ok(value)
}

fn to_json(value: &Value) -> Result<Json, RawCode> {
    let json = match value {
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(i) => {
            if let Some(signed) = i.as_signed() {
                Json::from(signed)
            } else if let Some(unsigned) = i.as_unsigned() {
                Json::from(unsigned)
            } else {
                return Err(codes::FORMAT);
            }
        }
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or(codes::FORMAT)?,
        Value::String(s) => Json::String(s.clone()),
        Value::Array(items) => Json::Array(
            items
                .iter()
                .map(to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Dictionary(dict) => {
            let mut map = serde_json::Map::with_capacity(dict.len());
            for (key, item) in dict.iter() {
                map.insert(key.clone(), to_json(item)?);
            }
            Json::Object(map)
        }
        // data, dates and UIDs have no JSON representation
        _ => return Err(codes::FORMAT),
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars_and_containers() {
        let value = parse(br#"{"b": true, "i": -7, "u": 18446744073709551615, "r": 1.5, "s": "x", "a": [1]}"#)
            .unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.get("b"), Some(&Value::Boolean(true)));
        assert_eq!(dict.get("i"), Some(&Value::Integer((-7i64).into())));
        assert_eq!(dict.get("u"), Some(&Value::Integer(u64::MAX.into())));
        assert_eq!(dict.get("r"), Some(&Value::Real(1.5)));
        assert_eq!(dict.get("s"), Some(&Value::String("x".to_string())));
        assert_eq!(dict.get("a"), Some(&Value::Array(vec![Value::Integer(1.into())])));
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let value = parse(br#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let keys: Vec<_> = value.as_dictionary().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_null_is_rejected() {
        assert_eq!(parse(b"null"), Err(codes::PARSE));
        assert_eq!(parse(br#"{"a": null}"#), Err(codes::PARSE));
    }

    #[test]
    fn test_compact_has_no_whitespace() {
        let value = parse(br#"{ "a" : [ 1 , 2 ], "b" : "c d" }"#).unwrap();
        let out = encode(&value, false).unwrap();
        assert_eq!(out, br#"{"a":[1,2],"b":"c d"}"#.to_vec());
    }

    #[test]
    fn test_pretty_is_indented() {
        let value = parse(br#"{"a": [1, 2]}"#).unwrap();
        let out = String::from_utf8(encode(&value, true).unwrap()).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}\n");
    }

    #[test]
    fn test_incompatible_nodes() {
        assert_eq!(encode(&Value::Data(vec![0]), true), Err(codes::FORMAT));
        assert_eq!(encode(&Value::Real(f64::NAN), false), Err(codes::FORMAT));
        assert_eq!(
            encode(&Value::Uid(plist::Uid::new(1)), false),
            Err(codes::FORMAT)
        );
    }
}
