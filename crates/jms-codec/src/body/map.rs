//! Map message bodies: one `<subtype><index:03>` entry per value.

use serde_json::Value;

use super::unexpected_body;
use crate::{Body, CodecError, ScalarCodec, Subtype, TypedValue};

/// Length of the numeric disambiguator appended to map keys.
const KEY_SUFFIX_LEN: usize = 3;

/// Key under which the `index`-th value of `subtype` is stored.
pub fn map_key(subtype: &str, index: usize) -> String {
    format!("{subtype}{index:03}")
}

pub(super) fn encode(
    scalar: &ScalarCodec,
    subtype: &str,
    index: usize,
    text: &str,
) -> Result<Body, CodecError> {
    let value = scalar.encode_named(subtype, text)?;
    Ok(Body::Value(TypedValue::Map(vec![(
        map_key(subtype, index),
        value,
    )])))
}

pub(super) fn decode(
    scalar: &ScalarCodec,
    subtype: &str,
    body: &Body,
) -> Result<Vec<Value>, CodecError> {
    let parsed = Subtype::parse(subtype)?;
    let entries = match body {
        Body::Value(TypedValue::Map(entries)) => entries,
        other => return Err(unexpected_body(subtype, "map", other)),
    };
    entries
        .iter()
        .map(|(key, value)| {
            if key_prefix(key) != Some(subtype) {
                return Err(CodecError::IncorrectJmsMapKeyPrefix {
                    expected: subtype.to_owned(),
                    key: key.clone(),
                });
            }
            scalar.decode(parsed, value).map(Value::String)
        })
        .collect()
}

fn key_prefix(key: &str) -> Option<&str> {
    let cut = key.len().checked_sub(KEY_SUFFIX_LEN)?;
    key.get(..cut)
}
