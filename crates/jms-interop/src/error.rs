//! Harness error type.

use jms_interop_codec::{CodecError, JmsMessageType};
use thiserror::Error;

/// Error type for the sender and receiver drivers and their transports.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("incorrect message body type: expected {expected}, actual {actual}")]
    IncorrectMessageBodyType {
        expected: JmsMessageType,
        actual: JmsMessageType,
    },
    #[error("missing \"x-opt-jms-msg-type\" message annotation")]
    MissingAnnotation,
    #[error("invalid \"x-opt-jms-msg-type\" message annotation: {0}")]
    InvalidAnnotation(String),
    #[error("argument error: {0}")]
    Argument(String),
    #[error("JSON parser error: {0}")]
    JsonParser(#[from] serde_json::Error),
    #[error("unexpected {event} event while {state}")]
    UnexpectedEvent {
        event: &'static str,
        state: &'static str,
    },
    #[error("message received after every subtype was satisfied ({received} of {total} messages)")]
    SubtypesExhausted { received: usize, total: usize },
    #[error("unexpected disconnect after {completed} of {total} messages")]
    UnexpectedDisconnect { completed: usize, total: usize },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Transport(err.to_string())
    }
}
