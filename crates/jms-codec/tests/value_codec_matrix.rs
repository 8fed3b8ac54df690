//! Scalar codec matrix: canonical test values survive Encode then Decode
//! unchanged for every subtype.

use jms_interop_codec::{CodecOptions, Notation, ScalarCodec, Subtype, TypedValue};
use proptest::prelude::*;

fn representative_values() -> Vec<(Subtype, Vec<&'static str>)> {
    vec![
        (Subtype::Boolean, vec!["True", "False"]),
        (Subtype::Byte, vec!["80", "ff", "00", "7f"]),
        (Subtype::Short, vec!["8000", "ffff", "0000", "7fff"]),
        (Subtype::Int, vec!["80000000", "ffffffff", "00000000", "00000001", "7fffffff"]),
        (
            Subtype::Long,
            vec![
                "8000000000000000",
                "ffffffffffffffff",
                "0000000000000000",
                "7fffffffffffffff",
            ],
        ),
        (
            Subtype::Float,
            vec![
                "00000000", "80000000", "7f800000", "ff800000", "7fc00000", "7f800001", "3f800000",
            ],
        ),
        (
            Subtype::Double,
            vec![
                "0000000000000000",
                "8000000000000000",
                "7ff0000000000000",
                "fff0000000000000",
                "7ff8000000000000",
                "7ff0000000000001",
            ],
        ),
        (Subtype::Char, vec!["0000", "0041", "007f", "00ff"]),
        (Subtype::String, vec!["", "48656c6c6f2c20776f726c6421", "c3a9e282ac"]),
        (Subtype::Bytes, vec!["", "00", "deadbeef", "00ff00ff"]),
    ]
}

#[test]
fn hex_roundtrip_matrix() {
    let codec = ScalarCodec::default();
    for (subtype, values) in representative_values() {
        for text in values {
            let typed = codec.encode(subtype, text).unwrap();
            let back = codec.decode(subtype, &typed).unwrap();
            assert_eq!(back, text, "subtype {subtype}");
        }
    }
}

#[test]
fn encode_decode_are_pure() {
    let codec = ScalarCodec::default();
    let first = codec.encode(Subtype::Double, "7ff8000000000001").unwrap();
    let second = codec.encode(Subtype::Double, "7ff8000000000001").unwrap();
    assert!(first.bits_eq(&second));
    assert_eq!(
        codec.decode(Subtype::Double, &first).unwrap(),
        codec.decode(Subtype::Double, &second).unwrap()
    );
}

#[test]
fn signed_literals_encode_to_the_same_values() {
    let codec = ScalarCodec::default();
    let pairs = [
        (Subtype::Byte, "-0x80", "80"),
        (Subtype::Byte, "-0x1", "ff"),
        (Subtype::Short, "0x7fff", "7fff"),
        (Subtype::Int, "-0x80000000", "80000000"),
        (Subtype::Long, "0x1", "0000000000000001"),
    ];
    for (subtype, literal, canonical) in pairs {
        let typed = codec.encode(subtype, literal).unwrap();
        assert_eq!(codec.decode(subtype, &typed).unwrap(), canonical);
    }
}

#[test]
fn literal_notation_roundtrip_matrix() {
    let codec = ScalarCodec::new(CodecOptions::default().with_notation(Notation::Literal));
    let cases: Vec<(Subtype, Vec<&str>)> = vec![
        (Subtype::Byte, vec!["-0x80", "-0x1", "0x0", "0x7f"]),
        (Subtype::Short, vec!["-0x8000", "-0x1", "0x0", "0x7fff"]),
        (Subtype::Int, vec!["-0x80000000", "-0x81", "0x0", "0x80", "0x7fffffff"]),
        (Subtype::Long, vec!["-0x8000000000000000", "0x0", "0x7fffffffffffffff"]),
        (Subtype::Float, vec!["00000000", "80000000", "7fc00000"]),
        (Subtype::Char, vec!["a", "Z", "\u{1}", "\u{7f}"]),
        (Subtype::String, vec!["", "Hello, world", "\"Hello, world\""]),
        (Subtype::Bytes, vec!["", "12345", "\u{7f}"]),
    ];
    for (subtype, values) in cases {
        for text in values {
            let typed = codec.encode(subtype, text).unwrap();
            assert_eq!(codec.decode(subtype, &typed).unwrap(), text, "subtype {subtype}");
        }
    }
}

#[test]
fn float_is_reinterpreted_not_converted() {
    let codec = ScalarCodec::default();
    assert_eq!(
        codec.encode(Subtype::Float, "3f800000").unwrap(),
        TypedValue::Float(1.0)
    );
    match codec.encode(Subtype::Double, "8000000000000000").unwrap() {
        TypedValue::Double(d) => {
            assert_eq!(d, 0.0);
            assert!(d.is_sign_negative());
        }
        other => panic!("expected double, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_long_hex_roundtrip(bits in any::<u64>()) {
        let codec = ScalarCodec::default();
        let text = format!("{bits:016x}");
        let typed = codec.encode(Subtype::Long, &text).unwrap();
        prop_assert_eq!(codec.decode(Subtype::Long, &typed).unwrap(), text);
    }

    #[test]
    fn prop_float_bits_roundtrip(bits in any::<u32>()) {
        let codec = ScalarCodec::default();
        let text = format!("{bits:08x}");
        let typed = codec.encode(Subtype::Float, &text).unwrap();
        prop_assert_eq!(codec.decode(Subtype::Float, &typed).unwrap(), text);
    }

    #[test]
    fn prop_short_literal_roundtrip(value in any::<i16>()) {
        let codec = ScalarCodec::new(CodecOptions::default().with_notation(Notation::Literal));
        let text = if value < 0 {
            format!("-0x{:x}", value.unsigned_abs())
        } else {
            format!("0x{value:x}")
        };
        let typed = codec.encode(Subtype::Short, &text).unwrap();
        prop_assert_eq!(typed, TypedValue::Short(value));
    }
}
