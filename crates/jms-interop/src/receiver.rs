//! Receiving side of a JMS message test.

use jms_interop_codec::{BodyCodec, CodecOptions, JmsMessageType};
use tracing::{debug, info, warn};

use crate::sequencer::{ReceivedValueMap, SubtypeSequencer};
use crate::test_matrix::TestNumberMap;
use crate::transport::Transport;
use crate::{HarnessError, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
    AwaitingConnection,
    Active,
    /// Every expected message arrived; link and connection are closing.
    Draining,
    Closed,
}

impl ReceiverState {
    fn describe(self) -> &'static str {
        match self {
            ReceiverState::AwaitingConnection => "awaiting connection",
            ReceiverState::Active => "active",
            ReceiverState::Draining => "draining",
            ReceiverState::Closed => "closed",
        }
    }
}

/// Decodes a stream of messages of one JMS type into per-subtype batches.
#[derive(Debug)]
pub struct ReceiverDriver {
    message_type: JmsMessageType,
    codec: BodyCodec,
    sequencer: SubtypeSequencer,
    state: ReceiverState,
}

impl ReceiverDriver {
    pub fn new(
        message_type: JmsMessageType,
        numbers: TestNumberMap,
        options: CodecOptions,
    ) -> Self {
        Self {
            message_type,
            codec: BodyCodec::new(options),
            sequencer: SubtypeSequencer::new(numbers),
            state: ReceiverState::AwaitingConnection,
        }
    }

    pub fn message_type(&self) -> JmsMessageType {
        self.message_type
    }

    pub fn state(&self) -> ReceiverState {
        self.state
    }

    pub fn sequencer(&self) -> &SubtypeSequencer {
        &self.sequencer
    }

    pub fn received_value_map(&self) -> &ReceivedValueMap {
        self.sequencer.received()
    }

    pub fn into_received_value_map(self) -> ReceivedValueMap {
        self.sequencer.into_received()
    }

    pub fn is_complete(&self) -> bool {
        self.sequencer.is_run_complete()
    }

    pub fn on_connection_open(
        &mut self,
        transport: &mut impl Transport,
    ) -> Result<(), HarnessError> {
        if self.state != ReceiverState::AwaitingConnection {
            return Err(self.unexpected("connection open"));
        }
        info!(
            message_type = %self.message_type,
            expected = self.sequencer.numbers().expected_total(),
            "receiver link open"
        );
        self.state = ReceiverState::Active;
        if self.sequencer.is_run_complete() {
            self.drain(transport)?;
        }
        Ok(())
    }

    pub fn on_message(
        &mut self,
        transport: &mut impl Transport,
        message: &Message,
    ) -> Result<(), HarnessError> {
        match self.state {
            ReceiverState::Active => {}
            ReceiverState::Draining | ReceiverState::Closed => {
                debug!(state = self.state.describe(), "ignoring message");
                return Ok(());
            }
            ReceiverState::AwaitingConnection => {
                let err = self.unexpected("message");
                return Err(self.fail(transport, err));
            }
        }
        if let Err(err) = self.process(message) {
            return Err(self.fail(transport, err));
        }
        if self.sequencer.is_run_complete() {
            self.drain(transport)?;
        }
        Ok(())
    }

    /// Connection closed by either side. A peer close before every expected
    /// message arrived is an error.
    pub fn on_connection_closed(&mut self) -> Result<(), HarnessError> {
        if self.state == ReceiverState::Draining {
            info!("receiver connection closed");
        }
        self.on_disconnect()
    }

    /// Transport lost. Not an error once every expected message arrived.
    pub fn on_disconnect(&mut self) -> Result<(), HarnessError> {
        let complete = self.is_complete();
        self.state = ReceiverState::Closed;
        if complete {
            return Ok(());
        }
        Err(HarnessError::UnexpectedDisconnect {
            completed: self.sequencer.cursor().received_count,
            total: self.sequencer.numbers().expected_total(),
        })
    }

    /// Type name line followed by the compact JSON of the received values.
    pub fn report(&self) -> Result<String, HarnessError> {
        let values = serde_json::to_string(self.received_value_map())?;
        Ok(format!("{}\n{}", self.message_type, values))
    }

    fn process(&mut self, message: &Message) -> Result<(), HarnessError> {
        let declared = message.jms_message_type()?;
        if declared != self.message_type {
            return Err(HarnessError::IncorrectMessageBodyType {
                expected: self.message_type,
                actual: declared,
            });
        }
        let subtype = match self.sequencer.begin_message() {
            Some(subtype) => subtype.to_owned(),
            None => {
                return Err(HarnessError::SubtypesExhausted {
                    received: self.sequencer.cursor().received_count,
                    total: self.sequencer.numbers().expected_total(),
                })
            }
        };
        let values = self.codec.decode(self.message_type, &subtype, &message.body)?;
        debug!(%subtype, values = values.len(), "decoded message");
        self.sequencer.push(values);
        if self.sequencer.advance() {
            debug!(%subtype, "subtype complete");
        }
        self.sequencer.record_message();
        Ok(())
    }

    fn drain(&mut self, transport: &mut impl Transport) -> Result<(), HarnessError> {
        self.sequencer.finish();
        self.state = ReceiverState::Draining;
        info!(
            received = self.sequencer.cursor().received_count,
            "all expected messages received"
        );
        transport.close_link()?;
        transport.close_connection()
    }

    fn fail(&mut self, transport: &mut impl Transport, err: HarnessError) -> HarnessError {
        warn!(error = %err, "closing receiver");
        if let Err(close_err) = transport.close_link() {
            warn!(error = %close_err, "failed to close link");
        }
        if let Err(close_err) = transport.close_connection() {
            warn!(error = %close_err, "failed to close connection");
        }
        self.state = ReceiverState::Closed;
        err
    }

    fn unexpected(&self, event: &'static str) -> HarnessError {
        HarnessError::UnexpectedEvent {
            event,
            state: self.state.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use jms_interop_codec::{Body, TypedValue};

    fn driver(message_type: JmsMessageType, json: &str) -> ReceiverDriver {
        let numbers = TestNumberMap::from_json(message_type, json).unwrap();
        ReceiverDriver::new(message_type, numbers, CodecOptions::default())
    }

    #[test]
    fn message_before_connection_is_unexpected() {
        let mut receiver = driver(JmsMessageType::Text, r#"{"text": 1}"#);
        let mut transport = MemoryTransport::new();
        let body = Body::Value(TypedValue::String("x".into()));
        let message = Message::jms(JmsMessageType::Text, body);
        let err = receiver.on_message(&mut transport, &message).unwrap_err();
        assert!(matches!(err, HarnessError::UnexpectedEvent { event: "message", .. }));
        assert_eq!(receiver.state(), ReceiverState::Closed);
        assert!(transport.connection_closed);
    }

    #[test]
    fn empty_matrix_drains_on_open() {
        let mut receiver = driver(JmsMessageType::Map, r#"{"int": 0}"#);
        let mut transport = MemoryTransport::new();
        receiver.on_connection_open(&mut transport).unwrap();
        assert_eq!(receiver.state(), ReceiverState::Draining);
        assert!(transport.link_closed);
        assert_eq!(receiver.report().unwrap(), "JMS_MAPMESSAGE_TYPE\n{\"int\":[]}");
    }

    #[test]
    fn disconnect_before_total_is_an_error() {
        let mut receiver = driver(JmsMessageType::Text, r#"{"text": 2}"#);
        let mut transport = MemoryTransport::new();
        receiver.on_connection_open(&mut transport).unwrap();
        assert!(matches!(
            receiver.on_disconnect(),
            Err(HarnessError::UnexpectedDisconnect {
                completed: 0,
                total: 2
            })
        ));
    }

    #[test]
    fn peer_close_before_total_is_an_error() {
        let mut receiver = driver(JmsMessageType::Text, r#"{"text": 1}"#);
        let mut transport = MemoryTransport::new();
        receiver.on_connection_open(&mut transport).unwrap();
        assert!(matches!(
            receiver.on_connection_closed(),
            Err(HarnessError::UnexpectedDisconnect {
                completed: 0,
                total: 1
            })
        ));
        assert_eq!(receiver.state(), ReceiverState::Closed);
    }
}
