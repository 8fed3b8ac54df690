//! Wire-level typed values and message body sections.

use serde::{Deserialize, Serialize};

/// A typed value as carried inside an AMQP message body.
///
/// Floating point values travel as their IEEE-754 bit pattern when
/// serialized, so NaN payloads and signed zero survive any JSON framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(#[serde(with = "f32_bits")] f32),
    Double(#[serde(with = "f64_bits")] f64),
    Char(char),
    String(String),
    Binary(#[serde(with = "hex_bytes")] Vec<u8>),
    Map(Vec<(String, TypedValue)>),
    List(Vec<TypedValue>),
}

impl TypedValue {
    pub fn kind(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::Byte(_) => "byte",
            TypedValue::Short(_) => "short",
            TypedValue::Int(_) => "int",
            TypedValue::Long(_) => "long",
            TypedValue::Float(_) => "float",
            TypedValue::Double(_) => "double",
            TypedValue::Char(_) => "char",
            TypedValue::String(_) => "string",
            TypedValue::Binary(_) => "binary",
            TypedValue::Map(_) => "map",
            TypedValue::List(_) => "list",
        }
    }

    /// Fixed JMS byte width of scalar values; `None` for variable-length and
    /// compound values.
    pub fn width(&self) -> Option<usize> {
        match self {
            TypedValue::Boolean(_) | TypedValue::Byte(_) => Some(1),
            TypedValue::Short(_) | TypedValue::Char(_) => Some(2),
            TypedValue::Int(_) | TypedValue::Float(_) => Some(4),
            TypedValue::Long(_) | TypedValue::Double(_) => Some(8),
            TypedValue::Null
            | TypedValue::String(_)
            | TypedValue::Binary(_)
            | TypedValue::Map(_)
            | TypedValue::List(_) => None,
        }
    }

    /// Bit-exact equality, treating floats by their bit patterns.
    pub fn bits_eq(&self, other: &TypedValue) -> bool {
        match (self, other) {
            (TypedValue::Float(a), TypedValue::Float(b)) => a.to_bits() == b.to_bits(),
            (TypedValue::Double(a), TypedValue::Double(b)) => a.to_bits() == b.to_bits(),
            (TypedValue::Map(a), TypedValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.bits_eq(vb))
            }
            (TypedValue::List(a), TypedValue::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(va, vb)| va.bits_eq(vb))
            }
            _ => self == other,
        }
    }
}

/// The body section of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "content", rename_all = "lowercase")]
pub enum Body {
    /// No body section.
    Empty,
    /// An AMQP value section.
    Value(TypedValue),
    /// An AMQP data section.
    Data(#[serde(with = "hex_bytes")] Vec<u8>),
}

impl Body {
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty body",
            Body::Value(_) => "value section",
            Body::Data(_) => "data section",
        }
    }

    pub fn bits_eq(&self, other: &Body) -> bool {
        match (self, other) {
            (Body::Value(a), Body::Value(b)) => a.bits_eq(b),
            _ => self == other,
        }
    }
}

mod f32_bits {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:08x}", value.to_bits()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        let text = String::deserialize(deserializer)?;
        u32::from_str_radix(&text, 16)
            .map(f32::from_bits)
            .map_err(D::Error::custom)
    }
}

mod f64_bits {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:016x}", value.to_bits()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let text = String::deserialize(deserializer)?;
        u64::from_str_radix(&text, 16)
            .map(f64::from_bits)
            .map_err(D::Error::custom)
    }
}

mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::hex::encode_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        crate::hex::decode_hex(&text).ok_or_else(|| D::Error::custom("invalid hex binary"))
    }
}
