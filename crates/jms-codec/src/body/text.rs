//! Text message bodies: one UTF-8 string, emitted verbatim.

use serde_json::Value;

use super::unexpected_body;
use crate::{Body, CodecError, TypedValue};

pub(super) fn encode(text: &str) -> Body {
    Body::Value(TypedValue::String(text.to_owned()))
}

pub(super) fn decode(subtype: &str, body: &Body) -> Result<Vec<Value>, CodecError> {
    match body {
        Body::Value(TypedValue::String(text)) => Ok(vec![Value::String(text.clone())]),
        other => Err(unexpected_body(subtype, "string", other)),
    }
}
