//! Codec error type.

use jms_interop_buffers::BufferError;
use thiserror::Error;

/// Error type for test-value and message-body encoding and decoding.
///
/// Every variant describes a mismatch between what a peer produced and what
/// the configured test expects; none of them is recoverable within a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown JMS message subtype \"{0}\"")]
    UnknownSubtype(String),
    #[error("unknown JMS message type \"{0}\"")]
    UnknownMessageType(String),
    #[error("invalid test value \"{value}\" for subtype \"{subtype}\"")]
    InvalidTestValue { subtype: String, value: String },
    #[error(
        "incorrect message body length for subtype \"{subtype}\": \
         expected {expected}, actual {actual}"
    )]
    IncorrectMessageBodyLength {
        subtype: String,
        expected: usize,
        actual: usize,
    },
    #[error("incorrect JMS map key prefix: expected subtype \"{expected}\", found key \"{key}\"")]
    IncorrectJmsMapKeyPrefix { expected: String, key: String },
    #[error("subtype \"{subtype}\" expects {expected}, found {found}")]
    UnexpectedValueType {
        subtype: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("char U+{0:04X} does not fit a 16-bit code unit")]
    UnrepresentableChar(u32),
    #[error("invalid option value \"{0}\"")]
    InvalidOption(String),
}

impl CodecError {
    pub(crate) fn invalid_value(subtype: impl Into<String>, value: impl Into<String>) -> Self {
        CodecError::InvalidTestValue {
            subtype: subtype.into(),
            value: value.into(),
        }
    }

    /// Maps a short read inside a bytes-message body onto a length mismatch.
    pub(crate) fn from_short_body(subtype: &str, err: BufferError, body_len: usize) -> Self {
        match err {
            BufferError::EndOfBuffer { needed, remaining } => {
                CodecError::IncorrectMessageBodyLength {
                    subtype: subtype.to_owned(),
                    expected: body_len - remaining + needed,
                    actual: body_len,
                }
            }
            // Numeric reads fail only on length.
            other => CodecError::invalid_value(subtype, other.to_string()),
        }
    }
}
