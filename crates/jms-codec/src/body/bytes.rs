//! Bytes message bodies: one fixed-width big-endian field per message.

use jms_interop_buffers::{Reader, Writer};
use serde_json::Value;

use super::unexpected_body;
use crate::scalar::format_boolean;
use crate::{Body, CodecError, ScalarCodec, StringPrefixCheck, Subtype};

/// Length of the big-endian count that precedes a string field.
const STRING_PREFIX_LEN: usize = 2;

pub(super) fn encode(scalar: &ScalarCodec, subtype: &str, text: &str) -> Result<Body, CodecError> {
    let parsed = Subtype::parse(subtype)?;
    let mut writer = Writer::new();
    match parsed {
        Subtype::Boolean => writer.u8(u8::from(scalar.parse_boolean(text)?)),
        Subtype::Byte => writer.u8(scalar.parse_integral(parsed, text)? as u8),
        Subtype::Short => writer.u16(scalar.parse_integral(parsed, text)? as u16),
        Subtype::Int => writer.u32(scalar.parse_integral(parsed, text)? as u32),
        Subtype::Long => writer.u64(scalar.parse_integral(parsed, text)?),
        Subtype::Float => writer.u32(scalar.parse_float32_bits(text)?),
        Subtype::Double => writer.u64(scalar.parse_float64_bits(text)?),
        Subtype::Char => writer.u16(scalar.parse_char_unit(text)?),
        Subtype::Bytes => writer.buf(&scalar.parse_bytes(parsed, text)?),
        Subtype::String => {
            let content = scalar.parse_string(text)?;
            writer
                .u16_prefixed(content.as_bytes())
                .map_err(|_| CodecError::invalid_value(subtype, text))?;
        }
    }
    Ok(Body::Data(writer.flush()))
}

pub(super) fn decode(
    scalar: &ScalarCodec,
    subtype: &str,
    body: &Body,
) -> Result<Vec<Value>, CodecError> {
    let parsed = Subtype::parse(subtype)?;
    let data = match body {
        Body::Data(data) => data.as_slice(),
        other => return Err(unexpected_body(subtype, "data section", other)),
    };
    if let Some(expected) = parsed.width() {
        if data.len() != expected {
            return Err(CodecError::IncorrectMessageBodyLength {
                subtype: subtype.to_owned(),
                expected,
                actual: data.len(),
            });
        }
    }
    let short = |err| CodecError::from_short_body(subtype, err, data.len());
    let mut reader = Reader::new(data);
    let text = match parsed {
        Subtype::Boolean => format_boolean(reader.u8().map_err(short)? != 0),
        Subtype::Byte => scalar.format_integral(i64::from(reader.i8().map_err(short)?), 8),
        Subtype::Short => scalar.format_integral(i64::from(reader.i16().map_err(short)?), 16),
        Subtype::Int => scalar.format_integral(i64::from(reader.i32().map_err(short)?), 32),
        Subtype::Long => scalar.format_integral(reader.i64().map_err(short)?, 64),
        Subtype::Float => crate::hex::format_fixed(u64::from(reader.u32().map_err(short)?), 32),
        Subtype::Double => crate::hex::format_fixed(reader.u64().map_err(short)?, 64),
        // Narrowing keeps only the second (low) byte of the unit.
        Subtype::Char => scalar.format_char_unit(reader.u16().map_err(short)?)?,
        Subtype::Bytes => scalar.format_bytes(reader.rest()),
        Subtype::String => decode_string(scalar, subtype, &mut reader, data.len())?,
    };
    Ok(vec![Value::String(text)])
}

fn decode_string(
    scalar: &ScalarCodec,
    subtype: &str,
    reader: &mut Reader<'_>,
    body_len: usize,
) -> Result<String, CodecError> {
    let declared = reader
        .u16()
        .map_err(|err| CodecError::from_short_body(subtype, err, body_len))?;
    let content = reader.rest();
    if scalar.options.string_prefix == StringPrefixCheck::Strict
        && usize::from(declared) != content.len()
    {
        return Err(CodecError::IncorrectMessageBodyLength {
            subtype: subtype.to_owned(),
            expected: STRING_PREFIX_LEN + usize::from(declared),
            actual: body_len,
        });
    }
    let text = std::str::from_utf8(content)
        .map_err(|_| CodecError::invalid_value(subtype, crate::hex::encode_hex(content)))?;
    Ok(scalar.format_string(text))
}
