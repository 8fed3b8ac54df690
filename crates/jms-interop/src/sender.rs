//! Sending side of a JMS message test.

use jms_interop_codec::{BodyCodec, CodecOptions, JmsMessageType};
use tracing::{debug, info, warn};

use crate::test_matrix::TestValueMap;
use crate::transport::Transport;
use crate::{HarnessError, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderState {
    AwaitingConnection,
    Sending,
    /// Every message is confirmed; the connection is closing.
    Done,
    Closed,
}

impl SenderState {
    fn describe(self) -> &'static str {
        match self {
            SenderState::AwaitingConnection => "awaiting connection",
            SenderState::Sending => "sending",
            SenderState::Done => "done",
            SenderState::Closed => "closed",
        }
    }
}

/// Emits one message per test value, in subtype-list order.
#[derive(Debug)]
pub struct SenderDriver {
    message_type: JmsMessageType,
    codec: BodyCodec,
    pending: Vec<(String, usize, serde_json::Value)>,
    msgs_sent: usize,
    msgs_confirmed: usize,
    total_msgs: usize,
    state: SenderState,
}

impl SenderDriver {
    pub fn new(
        message_type: JmsMessageType,
        values: &TestValueMap,
        options: CodecOptions,
    ) -> Self {
        let pending: Vec<_> = values
            .iter()
            .map(|(subtype, index, value)| (subtype.to_owned(), index, value.clone()))
            .collect();
        Self {
            message_type,
            codec: BodyCodec::new(options),
            total_msgs: pending.len(),
            pending,
            msgs_sent: 0,
            msgs_confirmed: 0,
            state: SenderState::AwaitingConnection,
        }
    }

    pub fn state(&self) -> SenderState {
        self.state
    }

    pub fn msgs_sent(&self) -> usize {
        self.msgs_sent
    }

    pub fn msgs_confirmed(&self) -> usize {
        self.msgs_confirmed
    }

    pub fn total_msgs(&self) -> usize {
        self.total_msgs
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SenderState::Done | SenderState::Closed)
    }

    pub fn on_connection_open(
        &mut self,
        transport: &mut impl Transport,
    ) -> Result<(), HarnessError> {
        if self.state != SenderState::AwaitingConnection {
            return Err(HarnessError::UnexpectedEvent {
                event: "connection open",
                state: self.state.describe(),
            });
        }
        info!(
            message_type = %self.message_type,
            total = self.total_msgs,
            "sender link open"
        );
        self.state = SenderState::Sending;
        if self.total_msgs == 0 {
            self.done(transport)?;
        }
        Ok(())
    }

    /// Sends at most `credit` messages. Returns how many went out.
    pub fn on_sendable(
        &mut self,
        transport: &mut impl Transport,
        credit: usize,
    ) -> Result<usize, HarnessError> {
        if self.state != SenderState::Sending {
            return Ok(0);
        }
        let mut sent = 0;
        while sent < credit && self.msgs_sent < self.total_msgs {
            let sent_ok = self
                .build(self.msgs_sent)
                .and_then(|message| transport.send(message));
            if let Err(err) = sent_ok {
                return Err(self.fail(transport, err));
            }
            self.msgs_sent += 1;
            sent += 1;
        }
        debug!(sent, total_sent = self.msgs_sent, "sendable");
        Ok(sent)
    }

    pub fn on_delivery_accept(
        &mut self,
        transport: &mut impl Transport,
    ) -> Result<(), HarnessError> {
        if self.msgs_confirmed >= self.msgs_sent {
            return Err(HarnessError::UnexpectedEvent {
                event: "delivery accept",
                state: "no delivery outstanding",
            });
        }
        self.msgs_confirmed += 1;
        if self.msgs_confirmed == self.total_msgs {
            self.done(transport)?;
        }
        Ok(())
    }

    /// Connection closed by either side. An error unless every message was
    /// confirmed.
    pub fn on_connection_closed(&mut self) -> Result<(), HarnessError> {
        self.on_disconnect()
    }

    pub fn on_disconnect(&mut self) -> Result<(), HarnessError> {
        let confirmed_all = self.msgs_confirmed == self.total_msgs;
        self.state = SenderState::Closed;
        if confirmed_all {
            return Ok(());
        }
        Err(HarnessError::UnexpectedDisconnect {
            completed: self.msgs_confirmed,
            total: self.total_msgs,
        })
    }

    /// Callers keep `position < total_msgs`, which is `pending.len()`.
    fn build(&self, position: usize) -> Result<Message, HarnessError> {
        let (subtype, index, value) = &self.pending[position];
        let body = self.codec.encode(self.message_type, subtype, *index, value)?;
        debug!(%subtype, index, "encoded message");
        Ok(Message::jms(self.message_type, body))
    }

    fn done(&mut self, transport: &mut impl Transport) -> Result<(), HarnessError> {
        info!(confirmed = self.msgs_confirmed, "all messages confirmed");
        self.state = SenderState::Done;
        transport.close_link()?;
        transport.close_connection()
    }

    fn fail(&mut self, transport: &mut impl Transport, err: HarnessError) -> HarnessError {
        warn!(error = %err, "closing sender");
        if let Err(close_err) = transport.close_link() {
            warn!(error = %close_err, "failed to close link");
        }
        if let Err(close_err) = transport.close_connection() {
            warn!(error = %close_err, "failed to close connection");
        }
        self.state = SenderState::Closed;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use jms_interop_codec::{Body, CodecError};
    use serde_json::json;

    fn values(message_type: JmsMessageType, value: serde_json::Value) -> TestValueMap {
        TestValueMap::from_value(message_type, &value).unwrap()
    }

    #[test]
    fn credit_limits_each_round() {
        let input = values(JmsMessageType::Bytes, json!({"byte": ["00", "01", "02"]}));
        let mut sender = SenderDriver::new(JmsMessageType::Bytes, &input, CodecOptions::default());
        let mut transport = MemoryTransport::new();
        sender.on_connection_open(&mut transport).unwrap();
        assert_eq!(sender.on_sendable(&mut transport, 2).unwrap(), 2);
        assert_eq!(sender.on_sendable(&mut transport, 2).unwrap(), 1);
        assert_eq!(sender.on_sendable(&mut transport, 2).unwrap(), 0);
        assert_eq!(transport.outbox[1].body, Body::Data(vec![0x01]));
    }

    #[test]
    fn encoding_error_closes_and_surfaces() {
        let input = values(JmsMessageType::Bytes, json!({"int": ["00000001", "xyz"]}));
        let mut sender = SenderDriver::new(JmsMessageType::Bytes, &input, CodecOptions::default());
        let mut transport = MemoryTransport::new();
        sender.on_connection_open(&mut transport).unwrap();
        let err = sender.on_sendable(&mut transport, 10).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Codec(CodecError::InvalidTestValue { .. })
        ));
        assert_eq!(sender.msgs_sent(), 1);
        assert!(transport.connection_closed);
        assert_eq!(sender.state(), SenderState::Closed);
    }

    #[test]
    fn accept_without_delivery_is_unexpected() {
        let input = values(JmsMessageType::Text, json!({"text": ["a"]}));
        let mut sender = SenderDriver::new(JmsMessageType::Text, &input, CodecOptions::default());
        let mut transport = MemoryTransport::new();
        sender.on_connection_open(&mut transport).unwrap();
        assert!(sender.on_delivery_accept(&mut transport).is_err());
    }
}
