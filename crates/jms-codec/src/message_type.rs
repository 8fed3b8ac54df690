//! JMS message types and their `x-opt-jms-msg-type` annotation codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Message annotation key identifying which JMS message type produced a message.
pub const JMS_MSG_TYPE_ANNOTATION: &str = "x-opt-jms-msg-type";

/// The higher-level JMS message shape layered over the AMQP body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JmsMessageType {
    #[serde(rename = "JMS_MESSAGE_TYPE")]
    Message,
    #[serde(rename = "JMS_OBJECTMESSAGE_TYPE")]
    Object,
    #[serde(rename = "JMS_MAPMESSAGE_TYPE")]
    Map,
    #[serde(rename = "JMS_BYTESMESSAGE_TYPE")]
    Bytes,
    #[serde(rename = "JMS_STREAMMESSAGE_TYPE")]
    Stream,
    #[serde(rename = "JMS_TEXTMESSAGE_TYPE")]
    Text,
}

impl JmsMessageType {
    pub const ALL: [JmsMessageType; 6] = [
        JmsMessageType::Message,
        JmsMessageType::Object,
        JmsMessageType::Map,
        JmsMessageType::Bytes,
        JmsMessageType::Stream,
        JmsMessageType::Text,
    ];

    /// Annotation code as written by JMS-over-AMQP clients.
    pub fn code(self) -> i8 {
        match self {
            JmsMessageType::Message => 0,
            JmsMessageType::Object => 1,
            JmsMessageType::Map => 2,
            JmsMessageType::Bytes => 3,
            JmsMessageType::Stream => 4,
            JmsMessageType::Text => 5,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        JmsMessageType::ALL
            .into_iter()
            .find(|message_type| message_type.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            JmsMessageType::Message => "JMS_MESSAGE_TYPE",
            JmsMessageType::Object => "JMS_OBJECTMESSAGE_TYPE",
            JmsMessageType::Map => "JMS_MAPMESSAGE_TYPE",
            JmsMessageType::Bytes => "JMS_BYTESMESSAGE_TYPE",
            JmsMessageType::Stream => "JMS_STREAMMESSAGE_TYPE",
            JmsMessageType::Text => "JMS_TEXTMESSAGE_TYPE",
        }
    }

    /// Whether bodies of this type are decoded per subtype. Text, object and
    /// plain messages carry exactly one value whatever the test label says.
    pub fn has_subtypes(self) -> bool {
        matches!(
            self,
            JmsMessageType::Map | JmsMessageType::Bytes | JmsMessageType::Stream
        )
    }
}

impl FromStr for JmsMessageType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JmsMessageType::ALL
            .into_iter()
            .find(|message_type| message_type.name() == s)
            .ok_or_else(|| CodecError::UnknownMessageType(s.to_owned()))
    }
}

impl fmt::Display for JmsMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
