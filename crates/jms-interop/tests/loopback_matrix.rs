//! Sender and receiver wired together: the receiver reports exactly what
//! the sender was given, for every JMS message type.

use jms_interop::config::HarnessConfig;
use jms_interop::loopback::{loopback_values, run_loopback};
use jms_interop::{ReceiverState, TestValueMap};
use jms_interop_codec::{CodecOptions, JmsMessageType, Notation, StringPrefixCheck};
use serde_json::{json, Value};

fn roundtrip(message_type: JmsMessageType, input: Value, config: &HarnessConfig) {
    let values = TestValueMap::from_value(message_type, &input).unwrap();
    let received = loopback_values(message_type, &values, config).unwrap();
    assert_eq!(
        serde_json::to_string(&received).unwrap(),
        serde_json::to_string(&input).unwrap(),
        "{message_type}"
    );
}

fn scalar_matrix() -> Value {
    json!({
        "boolean": ["True", "False"],
        "byte": ["80", "ff", "00", "7f"],
        "bytes": ["", "00", "deadbeef"],
        "char": ["0000", "0041", "00ff"],
        "double": ["0000000000000000", "8000000000000000", "7ff0000000000000", "7ff8000000000001"],
        "float": ["00000000", "80000000", "ff800000", "7fc00000"],
        "int": ["80000000", "ffffffff", "00000000", "7fffffff"],
        "long": ["8000000000000000", "ffffffffffffffff", "0000000000000001"],
        "short": ["8000", "ffff", "0000", "7fff"],
        "string": ["", "48656c6c6f"]
    })
}

#[test]
fn map_messages() {
    roundtrip(JmsMessageType::Map, scalar_matrix(), &HarnessConfig::default());
}

#[test]
fn bytes_messages() {
    roundtrip(JmsMessageType::Bytes, scalar_matrix(), &HarnessConfig::default());
}

#[test]
fn stream_messages() {
    roundtrip(JmsMessageType::Stream, scalar_matrix(), &HarnessConfig::default());
}

#[test]
fn text_messages() {
    roundtrip(
        JmsMessageType::Text,
        json!({"text": ["", "Hello, world", "\"quoted\" ünïcode"]}),
        &HarnessConfig::default(),
    );
}

#[test]
fn object_messages() {
    roundtrip(
        JmsMessageType::Object,
        json!({"java.lang.String": ["aced000574000568656c6c6f"]}),
        &HarnessConfig::default(),
    );
}

#[test]
fn plain_messages() {
    roundtrip(
        JmsMessageType::Message,
        json!({"none": [null, null, null]}),
        &HarnessConfig::default(),
    );
}

#[test]
fn literal_notation_with_strict_prefixes() {
    let config = HarnessConfig {
        codec: CodecOptions::default()
            .with_notation(Notation::Literal)
            .with_string_prefix(StringPrefixCheck::Strict),
        credit: 1,
    };
    let input = json!({
        "byte": ["-0x80", "-0x1", "0x0", "0x7f"],
        "int": ["-0x80000000", "0x7fffffff"],
        "char": ["a", "Z"],
        "string": ["", "Hello, world"],
        "bytes": ["12345"]
    });
    roundtrip(JmsMessageType::Bytes, input.clone(), &config);
    roundtrip(JmsMessageType::Map, input, &config);
}

#[test]
fn zero_count_subtypes_report_empty_lists() {
    roundtrip(
        JmsMessageType::Stream,
        json!({"byte": [], "int": ["00000001"], "long": []}),
        &HarnessConfig::default(),
    );
}

#[test]
fn receiver_ends_closed() {
    let input = json!({"int": ["00000001"]});
    let values = TestValueMap::from_value(JmsMessageType::Map, &input).unwrap();
    let receiver = run_loopback(JmsMessageType::Map, &values, &HarnessConfig::default()).unwrap();
    assert_eq!(receiver.state(), ReceiverState::Closed);
    assert!(receiver.is_complete());
}

#[test]
fn sender_encoding_error_surfaces() {
    let values = TestValueMap::from_value(JmsMessageType::Map, &json!({"int": ["zz"]})).unwrap();
    assert!(loopback_values(JmsMessageType::Map, &values, &HarnessConfig::default()).is_err());
}
