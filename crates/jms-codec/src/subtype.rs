//! JMS message subtypes under test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// A named primitive carried inside map, bytes and stream message bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    Boolean,
    Byte,
    Bytes,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    String,
}

impl Subtype {
    pub const ALL: [Subtype; 10] = [
        Subtype::Boolean,
        Subtype::Byte,
        Subtype::Bytes,
        Subtype::Char,
        Subtype::Double,
        Subtype::Float,
        Subtype::Int,
        Subtype::Long,
        Subtype::Short,
        Subtype::String,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subtype::Boolean => "boolean",
            Subtype::Byte => "byte",
            Subtype::Bytes => "bytes",
            Subtype::Char => "char",
            Subtype::Double => "double",
            Subtype::Float => "float",
            Subtype::Int => "int",
            Subtype::Long => "long",
            Subtype::Short => "short",
            Subtype::String => "string",
        }
    }

    /// Fixed byte width of the subtype in a bytes-message body, `None` for
    /// the variable-length `bytes` and `string`.
    pub fn width(self) -> Option<usize> {
        match self {
            Subtype::Boolean | Subtype::Byte => Some(1),
            Subtype::Char | Subtype::Short => Some(2),
            Subtype::Float | Subtype::Int => Some(4),
            Subtype::Double | Subtype::Long => Some(8),
            Subtype::Bytes | Subtype::String => None,
        }
    }

    pub fn parse(name: &str) -> Result<Self, CodecError> {
        Subtype::ALL
            .into_iter()
            .find(|subtype| subtype.name() == name)
            .ok_or_else(|| CodecError::UnknownSubtype(name.to_owned()))
    }
}

impl FromStr for Subtype {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subtype::parse(s)
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for subtype in Subtype::ALL {
            assert_eq!(Subtype::parse(subtype.name()).unwrap(), subtype);
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "integer".parse::<Subtype>(),
            Err(CodecError::UnknownSubtype("integer".into()))
        );
    }

    #[test]
    fn widths() {
        assert_eq!(Subtype::Short.width(), Some(2));
        assert_eq!(Subtype::Double.width(), Some(8));
        assert_eq!(Subtype::String.width(), None);
    }
}
