//! Sender and receiver driven against each other in one process.

use jms_interop_codec::JmsMessageType;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::receiver::ReceiverDriver;
use crate::sender::SenderDriver;
use crate::sequencer::ReceivedValueMap;
use crate::test_matrix::TestValueMap;
use crate::transport::MemoryTransport;
use crate::HarnessError;

/// Sends every value of `values` through a memory link into a receiver
/// expecting exactly those values, and returns what the receiver decoded.
pub fn run_loopback(
    message_type: JmsMessageType,
    values: &TestValueMap,
    config: &HarnessConfig,
) -> Result<ReceiverDriver, HarnessError> {
    config.validate()?;
    let mut sender = SenderDriver::new(message_type, values, config.codec);
    let mut receiver = ReceiverDriver::new(message_type, values.number_map(), config.codec);
    let mut link = MemoryTransport::new();
    let mut receiver_link = MemoryTransport::new();

    receiver.on_connection_open(&mut receiver_link)?;
    sender.on_connection_open(&mut link)?;
    while !sender.is_finished() {
        let sent = sender.on_sendable(&mut link, config.credit)?;
        if sent == 0 && link.outbox.is_empty() {
            sender.on_disconnect()?;
            break;
        }
        while let Some(message) = link.outbox.pop_front() {
            receiver.on_message(&mut receiver_link, &message)?;
            sender.on_delivery_accept(&mut link)?;
        }
        debug!(
            sent = sender.msgs_sent(),
            confirmed = sender.msgs_confirmed(),
            "loopback round"
        );
    }
    sender.on_connection_closed()?;

    if receiver_link.connection_closed {
        receiver.on_connection_closed()?;
    } else {
        receiver.on_disconnect()?;
    }
    Ok(receiver)
}

/// The decoded values of a loopback run.
pub fn loopback_values(
    message_type: JmsMessageType,
    values: &TestValueMap,
    config: &HarnessConfig,
) -> Result<ReceivedValueMap, HarnessError> {
    run_loopback(message_type, values, config).map(ReceiverDriver::into_received_value_map)
}
