//! JMS body shapes wrapped around the scalar codec.
//!
//! One encoder/decoder pair per [`JmsMessageType`]; dispatch is an exhaustive
//! match so a new message type cannot be silently ignored.

mod bytes;
mod map;
mod object;
mod stream;
mod text;

use serde_json::Value;

use crate::{Body, CodecError, CodecOptions, JmsMessageType, ScalarCodec};

pub use map::map_key;

/// Encodes test values into message bodies and decodes bodies back into
/// canonical JSON values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyCodec {
    pub scalar: ScalarCodec,
}

impl BodyCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self {
            scalar: ScalarCodec::new(options),
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.scalar.options
    }

    /// Builds the body of one message carrying the `index`-th test value of
    /// `subtype`.
    pub fn encode(
        &self,
        message_type: JmsMessageType,
        subtype: &str,
        index: usize,
        value: &Value,
    ) -> Result<Body, CodecError> {
        match message_type {
            JmsMessageType::Message => Ok(Body::Empty),
            JmsMessageType::Object => {
                object::encode(&self.scalar, subtype, test_text(subtype, value)?)
            }
            JmsMessageType::Map => {
                map::encode(&self.scalar, subtype, index, test_text(subtype, value)?)
            }
            JmsMessageType::Bytes => {
                bytes::encode(&self.scalar, subtype, test_text(subtype, value)?)
            }
            JmsMessageType::Stream => {
                stream::encode(&self.scalar, subtype, test_text(subtype, value)?)
            }
            JmsMessageType::Text => Ok(text::encode(test_text(subtype, value)?)),
        }
    }

    /// Decodes every value a body of `message_type` carries for `subtype`.
    pub fn decode(
        &self,
        message_type: JmsMessageType,
        subtype: &str,
        body: &Body,
    ) -> Result<Vec<Value>, CodecError> {
        match message_type {
            JmsMessageType::Message => Ok(vec![Value::Null]),
            JmsMessageType::Object => object::decode(&self.scalar, subtype, body),
            JmsMessageType::Map => map::decode(&self.scalar, subtype, body),
            JmsMessageType::Bytes => bytes::decode(&self.scalar, subtype, body),
            JmsMessageType::Stream => stream::decode(&self.scalar, subtype, body),
            JmsMessageType::Text => text::decode(subtype, body),
        }
    }
}

fn test_text<'a>(subtype: &str, value: &'a Value) -> Result<&'a str, CodecError> {
    value
        .as_str()
        .ok_or_else(|| CodecError::invalid_value(subtype, value.to_string()))
}

fn unexpected_body(subtype: &str, expected: &'static str, body: &Body) -> CodecError {
    CodecError::UnexpectedValueType {
        subtype: subtype.to_owned(),
        expected,
        found: body.kind(),
    }
}
