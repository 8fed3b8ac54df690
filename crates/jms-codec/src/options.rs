//! Codec options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Textual form of decoded values and accepted form of test values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Fixed-width, zero-padded, lowercase big-endian hex for every subtype
    /// except boolean.
    #[default]
    Hex,
    /// Signed `0x` literals for integers and plain text for char, string and
    /// bytes; float and double stay fixed-width hex.
    Literal,
}

/// How the 2-byte length prefix of a bytes-message string is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringPrefixCheck {
    /// The prefix is skipped without comparing it to the content length.
    #[default]
    Relaxed,
    /// The prefix must equal the number of bytes that follow it.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub notation: Notation,
    /// Carry only the low byte of a char's 16-bit code unit. Peers compare
    /// against narrowed values, so this stays on unless every peer under test
    /// carries full code units.
    pub char_narrowing: bool,
    pub string_prefix: StringPrefixCheck,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            notation: Notation::Hex,
            char_narrowing: true,
            string_prefix: StringPrefixCheck::Relaxed,
        }
    }
}

impl CodecOptions {
    #[must_use]
    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    #[must_use]
    pub fn with_char_narrowing(mut self, char_narrowing: bool) -> Self {
        self.char_narrowing = char_narrowing;
        self
    }

    #[must_use]
    pub fn with_string_prefix(mut self, string_prefix: StringPrefixCheck) -> Self {
        self.string_prefix = string_prefix;
        self
    }
}

impl FromStr for Notation {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Notation::Hex),
            "literal" => Ok(Notation::Literal),
            other => Err(CodecError::InvalidOption(other.to_owned())),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Notation::Hex => "hex",
            Notation::Literal => "literal",
        })
    }
}
