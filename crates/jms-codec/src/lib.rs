//! Typed-value codec for JMS interoperability tests.
//!
//! Maps the canonical textual test values of a subtype (big-endian hex, or
//! `"True"`/`"False"` for booleans) onto wire-level [`TypedValue`]s and the
//! JMS message body shapes that carry them, and back.
//!
//! # Example
//!
//! ```
//! use jms_interop_codec::{Body, BodyCodec, JmsMessageType};
//! use serde_json::json;
//!
//! let codec = BodyCodec::default();
//! let body = codec
//!     .encode(JmsMessageType::Bytes, "int", 0, &json!("00000001"))
//!     .unwrap();
//! assert_eq!(body, Body::Data(vec![0x00, 0x00, 0x00, 0x01]));
//!
//! let values = codec.decode(JmsMessageType::Bytes, "int", &body).unwrap();
//! assert_eq!(values, vec![json!("00000001")]);
//! ```

mod error;
mod message_type;
mod options;
mod scalar;
mod subtype;
mod value;

pub mod body;
pub mod hex;

pub use body::BodyCodec;
pub use error::CodecError;
pub use message_type::{JmsMessageType, JMS_MSG_TYPE_ANNOTATION};
pub use options::{CodecOptions, Notation, StringPrefixCheck};
pub use scalar::ScalarCodec;
pub use subtype::Subtype;
pub use value::{Body, TypedValue};
