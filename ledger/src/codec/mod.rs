//! # Binary Wire Codec
//!
//! The ordered write/read primitives every Aurum wire structure is built
//! from. A [`Serializer`] accumulates primitives in declaration order into a
//! growing buffer; a [`Deserializer`] consumes the same primitives in the
//! same order from an in-memory buffer or any byte stream.
//!
//! ## Primitives
//!
//! - fixed-width integers, little-endian (fixed by the protocol; both sides
//!   must agree, so there are no endianness knobs here)
//! - raw fixed-length byte blocks
//! - bounded UTF-8 strings in a fixed 64-byte zero-padded field — writing a
//!   string that doesn't fit is an error, never a silent truncation
//! - the packed 15-byte amount field (sign byte + 28 decimal-digit
//!   nibbles, least-significant digit first)
//! - 256-bit unsigned integers (block numbers)
//!
//! ## Sticky errors
//!
//! Both halves record the *first* error and go quiet: every later operation
//! is a no-op returning a zero-valued default. The error is never lost — it
//! is queryable with `error()` and returned by `finish()`/`data()`. This
//! lets long field sequences read linearly without a `?` after every
//! primitive while still failing the whole structure.

mod deserializer;
mod serializer;

pub use deserializer::Deserializer;
pub use serializer::Serializer;

use std::io;

use thiserror::Error;

/// Errors produced by the wire codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The source ran out of bytes mid-field.
    #[error("truncated input: source exhausted mid-field")]
    Truncated,

    /// A bounded field was handed more data than it can carry.
    #[error("{field} too long: {len} exceeds capacity {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Decoded bytes do not form a valid value (bad digit nibble,
    /// non-UTF-8 string field, ...).
    #[error("malformed {0} field")]
    Malformed(&'static str),

    /// The underlying stream failed for a reason other than exhaustion.
    #[error("read failed: {kind:?}")]
    Io { kind: io::ErrorKind },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use num_bigint::BigUint;

    /// Port of the reference serializer/deserializer round-trip fixture:
    /// every primitive written in order, read back in order, bit-for-bit.
    #[test]
    fn full_roundtrip_through_hex() {
        let amounts = [
            Amount::from_string("1234567890.123456789123456789").unwrap(),
            Amount::from_string("-987654321.102030405060708090").unwrap(),
            Amount::from_string("1000").unwrap(),
            Amount::from_string("1").unwrap(),
            Amount::from_string("0").unwrap(),
        ];
        let short = "961D2014E3E93AC701A6A5F25824DB66";
        let full = "1EF8C0F73B2370D14330C487A70618E0333EAEBA8313EC87131B8F67D964D097";

        let mut ser = Serializer::new();
        ser.put_u8(142)
            .put_u16(0xDEAD)
            .put_u32(0xDEAD_BEEF)
            .put_u64(0xDEAD_BEEF_1337_C0DE)
            .put_string64(short)
            .put_string64(full);
        for a in &amounts {
            ser.put_amount(a);
        }
        let data = hex::decode(ser.hex().unwrap()).unwrap();

        let mut des = Deserializer::from_bytes(&data);
        assert_eq!(des.get_u8(), 142);
        assert_eq!(des.get_u16(), 0xDEAD);
        assert_eq!(des.get_u32(), 0xDEAD_BEEF);
        assert_eq!(des.get_u64(), 0xDEAD_BEEF_1337_C0DE);
        assert_eq!(des.get_string64(), short);
        assert_eq!(des.get_string64(), full);
        for a in &amounts {
            assert_eq!(&des.get_amount(), a, "amount {a}");
        }
        assert!(des.finish().is_ok());
    }

    #[test]
    fn u256_roundtrip() {
        let n = BigUint::parse_bytes(b"112233445566778899aabbccddeeff", 16).unwrap();
        let mut ser = Serializer::new();
        ser.put_u256(&n);
        let data = ser.data().unwrap();
        assert_eq!(data.len(), 32);

        let mut des = Deserializer::from_bytes(&data);
        assert_eq!(des.get_u256(), n);
        assert!(des.finish().is_ok());
    }
}
