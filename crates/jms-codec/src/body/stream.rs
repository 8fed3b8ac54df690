//! Stream message bodies: an ordered list of typed values.

use serde_json::Value;

use super::unexpected_body;
use crate::{Body, CodecError, ScalarCodec, Subtype, TypedValue};

pub(super) fn encode(scalar: &ScalarCodec, subtype: &str, text: &str) -> Result<Body, CodecError> {
    let value = scalar.encode_named(subtype, text)?;
    Ok(Body::Value(TypedValue::List(vec![value])))
}

pub(super) fn decode(
    scalar: &ScalarCodec,
    subtype: &str,
    body: &Body,
) -> Result<Vec<Value>, CodecError> {
    let parsed = Subtype::parse(subtype)?;
    match body {
        Body::Value(TypedValue::List(items)) => items
            .iter()
            .map(|item| scalar.decode(parsed, item).map(Value::String))
            .collect(),
        other => Err(unexpected_body(subtype, "list", other)),
    }
}
