//! Hex text helpers shared by the scalar and body codecs.

use std::fmt::Write;

/// Renders bytes as lowercase hex, two digits per byte.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parses two hex digits per byte. Odd lengths and non-hex characters fail.
pub fn decode_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks_exact(2)
        .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Parses at most `max_digits` hex digits with no sign and no prefix.
pub(crate) fn parse_digits(digits: &str, max_digits: usize) -> Option<u64> {
    if digits.is_empty()
        || digits.len() > max_digits
        || !digits.bytes().all(|d| d.is_ascii_hexdigit())
    {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

pub(crate) fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Parses an integer test value into the two's complement bits of a
/// `bits`-wide signed integer.
///
/// Unprefixed text is the raw two's complement pattern (`ff` is -1 for an
/// 8-bit value). `0x`-prefixed text is a signed literal with an optional
/// leading `-` and is range checked.
pub(crate) fn parse_signed_bits(text: &str, bits: u32) -> Option<u64> {
    let max_digits = (bits / 4) as usize;
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    match strip_hex_prefix(unsigned) {
        Some(digits) => {
            let magnitude = i128::from(parse_digits(digits, max_digits)?);
            let value = if negative { -magnitude } else { magnitude };
            let max = (1i128 << (bits - 1)) - 1;
            let min = -(1i128 << (bits - 1));
            if value < min || value > max {
                return None;
            }
            Some((value as u64) & mask(bits))
        }
        None if negative => None,
        None => parse_digits(unsigned, max_digits),
    }
}

/// Parses an unsigned bit pattern of `bits` width with an optional `0x`.
pub(crate) fn parse_unsigned_bits(text: &str, bits: u32) -> Option<u64> {
    let digits = strip_hex_prefix(text).unwrap_or(text);
    parse_digits(digits, (bits / 4) as usize)
}

pub(crate) fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Zero-padded fixed-width rendering of the low `bits` of `pattern`.
pub(crate) fn format_fixed(pattern: u64, bits: u32) -> String {
    let width = (bits / 4) as usize;
    format!("{:0width$x}", pattern & mask(bits))
}

/// Signed `0x` literal rendering: `-0x80`, `0x0`, `0x7f`.
pub(crate) fn format_signed_literal(value: i64) -> String {
    if value < 0 {
        format!("-0x{:x}", value.unsigned_abs())
    } else {
        format!("0x{value:x}")
    }
}
