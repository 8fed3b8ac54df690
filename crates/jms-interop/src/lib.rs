//! Sender and receiver drivers for JMS message interoperability tests.
//!
//! The sender turns a JSON matrix of test values into annotated JMS
//! messages; the receiver decodes incoming messages back into a per-subtype
//! JSON report so a test runner can diff what was sent against what arrived.
//! The messaging layer is reached through [`transport::Transport`].
//!
//! # Example
//!
//! ```
//! use jms_interop::config::HarnessConfig;
//! use jms_interop::loopback::loopback_values;
//! use jms_interop::test_matrix::TestValueMap;
//! use jms_interop_codec::JmsMessageType;
//! use serde_json::json;
//!
//! let input = json!({"int": ["00000001", "ffffffff"], "string": ["6869"]});
//! let values = TestValueMap::from_value(JmsMessageType::Map, &input).unwrap();
//! let config = HarnessConfig::default();
//! let received = loopback_values(JmsMessageType::Map, &values, &config).unwrap();
//! assert_eq!(serde_json::to_value(&received).unwrap(), input);
//! ```

pub mod cli;
pub mod config;
mod error;
pub mod loopback;
mod message;
pub mod receiver;
pub mod sender;
pub mod sequencer;
pub mod test_matrix;
pub mod transport;

pub use error::HarnessError;
pub use message::Message;
pub use receiver::{ReceiverDriver, ReceiverState};
pub use sender::{SenderDriver, SenderState};
pub use sequencer::{Cursor, ReceivedValueMap, SubtypeSequencer};
pub use test_matrix::{SubTypeList, TestNumberMap, TestValueMap};
pub use transport::Transport;
