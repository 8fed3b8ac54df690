//! Scalar test-value codec: canonical text <-> [`TypedValue`].

use crate::hex::{
    decode_hex, encode_hex, format_fixed, format_signed_literal, parse_signed_bits,
    parse_unsigned_bits,
};
use crate::{CodecError, CodecOptions, Notation, Subtype, TypedValue};

/// Converts between the textual test values of one subtype and typed values.
///
/// The codec holds only its options; every call is pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarCodec {
    pub options: CodecOptions,
}

impl ScalarCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Encodes a test value for a subtype given by name.
    pub fn encode_named(&self, subtype: &str, text: &str) -> Result<TypedValue, CodecError> {
        self.encode(Subtype::parse(subtype)?, text)
    }

    /// Decodes a typed value for a subtype given by name.
    pub fn decode_named(&self, subtype: &str, value: &TypedValue) -> Result<String, CodecError> {
        self.decode(Subtype::parse(subtype)?, value)
    }

    pub fn encode(&self, subtype: Subtype, text: &str) -> Result<TypedValue, CodecError> {
        Ok(match subtype {
            Subtype::Boolean => TypedValue::Boolean(self.parse_boolean(text)?),
            Subtype::Byte => TypedValue::Byte(self.parse_integral(subtype, text)? as u8 as i8),
            Subtype::Short => TypedValue::Short(self.parse_integral(subtype, text)? as u16 as i16),
            Subtype::Int => TypedValue::Int(self.parse_integral(subtype, text)? as u32 as i32),
            Subtype::Long => TypedValue::Long(self.parse_integral(subtype, text)? as i64),
            Subtype::Float => TypedValue::Float(f32::from_bits(self.parse_float32_bits(text)?)),
            Subtype::Double => TypedValue::Double(f64::from_bits(self.parse_float64_bits(text)?)),
            Subtype::Char => TypedValue::Char(self.unit_to_char(self.parse_char_unit(text)?)?),
            Subtype::String => TypedValue::String(self.parse_string(text)?),
            Subtype::Bytes => TypedValue::Binary(self.parse_bytes(subtype, text)?),
        })
    }

    pub fn decode(&self, subtype: Subtype, value: &TypedValue) -> Result<String, CodecError> {
        match (subtype, value) {
            (Subtype::Boolean, TypedValue::Boolean(b)) => Ok(format_boolean(*b)),
            (Subtype::Byte, TypedValue::Byte(v)) => Ok(self.format_integral(i64::from(*v), 8)),
            (Subtype::Short, TypedValue::Short(v)) => Ok(self.format_integral(i64::from(*v), 16)),
            (Subtype::Int, TypedValue::Int(v)) => Ok(self.format_integral(i64::from(*v), 32)),
            (Subtype::Long, TypedValue::Long(v)) => Ok(self.format_integral(*v, 64)),
            (Subtype::Float, TypedValue::Float(f)) => Ok(format_fixed(u64::from(f.to_bits()), 32)),
            (Subtype::Double, TypedValue::Double(d)) => Ok(format_fixed(d.to_bits(), 64)),
            (Subtype::Char, TypedValue::Char(c)) => {
                let unit = self.char_to_unit(*c)?;
                self.format_char_unit(unit)
            }
            (Subtype::String, TypedValue::String(s)) => Ok(self.format_string(s)),
            (Subtype::Bytes, TypedValue::Binary(b)) => Ok(self.format_bytes(b)),
            (subtype, other) => Err(mismatch(subtype, other)),
        }
    }

    // ---------------------------------------------------------------- parsing

    pub(crate) fn parse_boolean(&self, text: &str) -> Result<bool, CodecError> {
        match text {
            "True" => return Ok(true),
            "False" => return Ok(false),
            _ => {}
        }
        match parse_unsigned_bits(text, 8) {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(CodecError::invalid_value(Subtype::Boolean.name(), text)),
        }
    }

    /// Two's complement bits of an integral subtype's value.
    pub(crate) fn parse_integral(&self, subtype: Subtype, text: &str) -> Result<u64, CodecError> {
        let bits = integral_bits(subtype);
        parse_signed_bits(text, bits).ok_or_else(|| CodecError::invalid_value(subtype.name(), text))
    }

    pub(crate) fn parse_float32_bits(&self, text: &str) -> Result<u32, CodecError> {
        parse_unsigned_bits(text, 32)
            .map(|bits| bits as u32)
            .ok_or_else(|| CodecError::invalid_value(Subtype::Float.name(), text))
    }

    pub(crate) fn parse_float64_bits(&self, text: &str) -> Result<u64, CodecError> {
        parse_unsigned_bits(text, 64)
            .ok_or_else(|| CodecError::invalid_value(Subtype::Double.name(), text))
    }

    /// The 16-bit code unit a char test value names, already narrowed when
    /// char narrowing is on.
    pub(crate) fn parse_char_unit(&self, text: &str) -> Result<u16, CodecError> {
        let invalid = || CodecError::invalid_value(Subtype::Char.name(), text);
        let unit = match self.options.notation {
            Notation::Hex => parse_unsigned_bits(text, 16).ok_or_else(invalid)? as u16,
            Notation::Literal => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => u16::try_from(u32::from(c)).map_err(|_| invalid())?,
                    _ => return Err(invalid()),
                }
            }
        };
        Ok(self.narrow(unit))
    }

    pub(crate) fn parse_string(&self, text: &str) -> Result<String, CodecError> {
        match self.options.notation {
            Notation::Literal => Ok(text.to_owned()),
            Notation::Hex => decode_hex(text)
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .ok_or_else(|| CodecError::invalid_value(Subtype::String.name(), text)),
        }
    }

    /// Raw bytes of a `bytes` test value. Also used for object payloads,
    /// hence the explicit label.
    pub(crate) fn parse_bytes(
        &self,
        label: impl ToString,
        text: &str,
    ) -> Result<Vec<u8>, CodecError> {
        match self.options.notation {
            Notation::Literal => Ok(text.as_bytes().to_vec()),
            Notation::Hex => {
                decode_hex(text).ok_or_else(|| CodecError::invalid_value(label.to_string(), text))
            }
        }
    }

    // ---------------------------------------------------------------- formatting

    pub(crate) fn format_integral(&self, value: i64, bits: u32) -> String {
        match self.options.notation {
            Notation::Hex => format_fixed(value as u64, bits),
            Notation::Literal => format_signed_literal(value),
        }
    }

    pub(crate) fn format_char_unit(&self, unit: u16) -> Result<String, CodecError> {
        let unit = self.narrow(unit);
        match self.options.notation {
            Notation::Hex => Ok(format_fixed(u64::from(unit), 16)),
            // Narrowed units are Latin-1 and always valid; a full unit can be
            // a lone surrogate read from a bytes body.
            Notation::Literal => char::from_u32(u32::from(unit))
                .map(String::from)
                .ok_or(CodecError::UnrepresentableChar(u32::from(unit))),
        }
    }

    pub(crate) fn format_string(&self, text: &str) -> String {
        match self.options.notation {
            Notation::Hex => encode_hex(text.as_bytes()),
            Notation::Literal => text.to_owned(),
        }
    }

    pub(crate) fn format_bytes(&self, bytes: &[u8]) -> String {
        match self.options.notation {
            Notation::Hex => encode_hex(bytes),
            Notation::Literal => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    // ---------------------------------------------------------------- chars

    fn narrow(&self, unit: u16) -> u16 {
        if self.options.char_narrowing {
            unit & 0x00ff
        } else {
            unit
        }
    }

    pub(crate) fn unit_to_char(&self, unit: u16) -> Result<char, CodecError> {
        let unit = self.narrow(unit);
        char::from_u32(u32::from(unit)).ok_or_else(|| {
            CodecError::invalid_value(Subtype::Char.name(), format_fixed(u64::from(unit), 16))
        })
    }

    pub(crate) fn char_to_unit(&self, c: char) -> Result<u16, CodecError> {
        let code = u32::from(c);
        if self.options.char_narrowing {
            return Ok((code & 0xff) as u16);
        }
        u16::try_from(code).map_err(|_| CodecError::UnrepresentableChar(code))
    }
}

pub(crate) fn format_boolean(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_owned()
}

pub(crate) fn integral_bits(subtype: Subtype) -> u32 {
    match subtype {
        Subtype::Byte => 8,
        Subtype::Short => 16,
        Subtype::Int => 32,
        _ => 64,
    }
}

/// Error for a typed value that does not belong to `subtype`: a length error
/// when both sides have a fixed width that differs, a type error otherwise.
pub(crate) fn mismatch(subtype: Subtype, value: &TypedValue) -> CodecError {
    match (subtype.width(), value.width()) {
        (Some(expected), Some(actual)) if expected != actual => {
            CodecError::IncorrectMessageBodyLength {
                subtype: subtype.name().to_owned(),
                expected,
                actual,
            }
        }
        _ => CodecError::UnexpectedValueType {
            subtype: subtype.name().to_owned(),
            expected: expected_kind(subtype),
            found: value.kind(),
        },
    }
}

fn expected_kind(subtype: Subtype) -> &'static str {
    match subtype {
        Subtype::Bytes => "binary",
        other => other.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> ScalarCodec {
        ScalarCodec::default()
    }

    #[test]
    fn int_one_is_canonical_fixed_width() {
        let value = codec().encode(Subtype::Int, "00000001").unwrap();
        assert_eq!(value, TypedValue::Int(1));
        assert_eq!(codec().decode(Subtype::Int, &value).unwrap(), "00000001");
    }

    #[test]
    fn quiet_nan_is_bit_exact() {
        let value = codec().encode(Subtype::Float, "7fc00000").unwrap();
        match value {
            TypedValue::Float(f) => assert_eq!(f.to_bits(), 0x7fc0_0000),
            other => panic!("expected float, got {other:?}"),
        }
        assert_eq!(codec().decode(Subtype::Float, &value).unwrap(), "7fc00000");
    }

    #[test]
    fn boolean_accepts_hex_and_literals() {
        assert_eq!(codec().encode(Subtype::Boolean, "01").unwrap(), TypedValue::Boolean(true));
        assert_eq!(codec().encode(Subtype::Boolean, "False").unwrap(), TypedValue::Boolean(false));
        assert!(codec().encode(Subtype::Boolean, "02").is_err());
        assert_eq!(
            codec().decode(Subtype::Boolean, &TypedValue::Boolean(true)).unwrap(),
            "True"
        );
    }

    #[test]
    fn wrong_width_is_a_length_error() {
        let err = codec().decode(Subtype::Int, &TypedValue::Long(1)).unwrap_err();
        assert_eq!(
            err,
            CodecError::IncorrectMessageBodyLength {
                subtype: "int".into(),
                expected: 4,
                actual: 8
            }
        );
    }

    #[test]
    fn same_width_other_kind_is_a_type_error() {
        let err = codec().decode(Subtype::Int, &TypedValue::Float(1.0)).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedValueType { found: "float", .. }));
    }

    #[test]
    fn char_narrowing_keeps_low_byte() {
        let value = codec().encode(Subtype::Char, "0161").unwrap();
        assert_eq!(value, TypedValue::Char('a'));
        assert_eq!(codec().decode(Subtype::Char, &value).unwrap(), "0061");
    }

    #[test]
    fn char_full_units_when_narrowing_is_off() {
        let codec = ScalarCodec::new(CodecOptions::default().with_char_narrowing(false));
        let value = codec.encode(Subtype::Char, "20ac").unwrap();
        assert_eq!(value, TypedValue::Char('€'));
        assert_eq!(codec.decode(Subtype::Char, &value).unwrap(), "20ac");
        assert!(codec.encode(Subtype::Char, "d800").is_err());
        assert_eq!(
            codec.decode(Subtype::Char, &TypedValue::Char('😀')),
            Err(CodecError::UnrepresentableChar(0x1f600))
        );
    }

    #[test]
    fn literal_notation_matches_peer_shims() {
        let codec = ScalarCodec::new(CodecOptions::default().with_notation(Notation::Literal));
        assert_eq!(codec.encode(Subtype::Byte, "-0x80").unwrap(), TypedValue::Byte(-128));
        assert_eq!(codec.decode(Subtype::Byte, &TypedValue::Byte(-1)).unwrap(), "-0x1");
        assert_eq!(codec.decode(Subtype::Long, &TypedValue::Long(0)).unwrap(), "0x0");
        assert_eq!(codec.encode(Subtype::Char, "Z").unwrap(), TypedValue::Char('Z'));
        assert_eq!(codec.decode(Subtype::Char, &TypedValue::Char('Z')).unwrap(), "Z");
        assert_eq!(
            codec.encode(Subtype::String, "Hello").unwrap(),
            TypedValue::String("Hello".into())
        );
        assert_eq!(
            codec.decode(Subtype::Double, &TypedValue::Double(-0.0)).unwrap(),
            "8000000000000000"
        );
    }

    #[test]
    fn invalid_values_carry_subtype_and_text() {
        assert_eq!(
            codec().encode(Subtype::Short, "12345"),
            Err(CodecError::InvalidTestValue {
                subtype: "short".into(),
                value: "12345".into()
            })
        );
        assert!(codec().encode(Subtype::String, "ff").is_err());
        assert!(codec().encode(Subtype::Bytes, "abc").is_err());
        assert_eq!(
            codec().encode_named("decimal", "00"),
            Err(CodecError::UnknownSubtype("decimal".into()))
        );
    }
}
