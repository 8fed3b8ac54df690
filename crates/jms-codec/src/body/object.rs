//! Object message bodies: an opaque serialized object in a data section.

use serde_json::Value;

use super::unexpected_body;
use crate::{Body, CodecError, ScalarCodec};

pub(super) fn encode(scalar: &ScalarCodec, label: &str, text: &str) -> Result<Body, CodecError> {
    Ok(Body::Data(scalar.parse_bytes(label, text)?))
}

pub(super) fn decode(
    scalar: &ScalarCodec,
    label: &str,
    body: &Body,
) -> Result<Vec<Value>, CodecError> {
    match body {
        Body::Data(data) => Ok(vec![Value::String(scalar.format_bytes(data))]),
        other => Err(unexpected_body(label, "data section", other)),
    }
}
