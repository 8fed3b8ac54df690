//! Messages as seen by the drivers: annotations plus one body section.

use indexmap::IndexMap;
use jms_interop_codec::{Body, JmsMessageType, TypedValue, JMS_MSG_TYPE_ANNOTATION};
use serde::{Deserialize, Serialize};

use crate::HarnessError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub annotations: IndexMap<String, TypedValue>,
    pub body: Body,
}

impl Message {
    pub fn new(body: Body) -> Self {
        Self {
            annotations: IndexMap::new(),
            body,
        }
    }

    /// A message tagged with the annotation code of `message_type`.
    pub fn jms(message_type: JmsMessageType, body: Body) -> Self {
        let mut message = Self::new(body);
        message.set_jms_message_type(message_type);
        message
    }

    pub fn set_jms_message_type(&mut self, message_type: JmsMessageType) {
        self.annotations.insert(
            JMS_MSG_TYPE_ANNOTATION.to_owned(),
            TypedValue::Byte(message_type.code()),
        );
    }

    /// The JMS message type declared by the `x-opt-jms-msg-type` annotation.
    pub fn jms_message_type(&self) -> Result<JmsMessageType, HarnessError> {
        match self.annotations.get(JMS_MSG_TYPE_ANNOTATION) {
            None => Err(HarnessError::MissingAnnotation),
            Some(TypedValue::Byte(code)) => JmsMessageType::from_code(*code)
                .ok_or_else(|| HarnessError::InvalidAnnotation(format!("unknown code {code}"))),
            Some(other) => Err(HarnessError::InvalidAnnotation(format!(
                "expected byte, found {}",
                other.kind()
            ))),
        }
    }

    pub fn bits_eq(&self, other: &Message) -> bool {
        self.annotations.len() == other.annotations.len()
            && self
                .annotations
                .iter()
                .zip(&other.annotations)
                .all(|((ka, va), (kb, vb))| ka == kb && va.bits_eq(vb))
            && self.body.bits_eq(&other.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_roundtrip() {
        let message = Message::jms(JmsMessageType::Stream, Body::Empty);
        assert_eq!(
            message.annotations.get(JMS_MSG_TYPE_ANNOTATION),
            Some(&TypedValue::Byte(4))
        );
        assert_eq!(message.jms_message_type().unwrap(), JmsMessageType::Stream);
    }

    #[test]
    fn missing_and_invalid_annotations() {
        assert!(matches!(
            Message::new(Body::Empty).jms_message_type(),
            Err(HarnessError::MissingAnnotation)
        ));
        let mut message = Message::new(Body::Empty);
        message
            .annotations
            .insert(JMS_MSG_TYPE_ANNOTATION.into(), TypedValue::Byte(9));
        assert!(matches!(
            message.jms_message_type(),
            Err(HarnessError::InvalidAnnotation(_))
        ));
        message
            .annotations
            .insert(JMS_MSG_TYPE_ANNOTATION.into(), TypedValue::Int(3));
        assert!(matches!(
            message.jms_message_type(),
            Err(HarnessError::InvalidAnnotation(_))
        ));
    }
}
