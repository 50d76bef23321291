//! Ordered little-endian writer with the sticky-first-error discipline
//! described in the [module docs](crate::codec).

use num_bigint::BigUint;
use num_traits::Signed;

use crate::amount::Amount;
use crate::config::{AMOUNT_FIELD_DIGITS, AMOUNT_FIELD_LENGTH, STRING_FIELD_LENGTH};

use super::CodecError;

/// Accumulates wire primitives in declaration order into a growing buffer.
///
/// Methods chain; the first failure (an over-long string, an amount with too
/// many digits) is recorded and every later write is ignored, so a whole
/// structure can be written fluently and checked once at [`data`](Self::data).
///
/// # Examples
///
/// ```
/// use aurum_ledger::codec::Serializer;
///
/// let mut ser = Serializer::new();
/// ser.put_u64(42).put_bytes(b"tag");
/// assert_eq!(ser.data().unwrap().len(), 11);
/// ```
#[derive(Default)]
pub struct Serializer {
    buf: Vec<u8>,
    err: Option<CodecError>,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// First error encountered, if any.
    pub fn error(&self) -> Option<&CodecError> {
        self.err.as_ref()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// A copy of the accumulated bytes, or the first recorded error.
    ///
    /// Borrows rather than consumes: wire structures are often snapshotted
    /// mid-build (a transaction digests its payload, then keeps appending
    /// the signature).
    pub fn data(&self) -> Result<Vec<u8>, CodecError> {
        match &self.err {
            Some(e) => Err(e.clone()),
            None => Ok(self.buf.clone()),
        }
    }

    /// [`data`](Self::data), hex-encoded.
    pub fn hex(&self) -> Result<String, CodecError> {
        self.data().map(hex::encode)
    }

    pub fn put_u8(&mut self, v: u8) -> &mut Self {
        self.put_raw(&[v])
    }

    pub fn put_u16(&mut self, v: u16) -> &mut Self {
        self.put_raw(&v.to_le_bytes())
    }

    pub fn put_u32(&mut self, v: u32) -> &mut Self {
        self.put_raw(&v.to_le_bytes())
    }

    pub fn put_u64(&mut self, v: u64) -> &mut Self {
        self.put_raw(&v.to_le_bytes())
    }

    /// 256-bit unsigned integer as 32 little-endian bytes.
    pub fn put_u256(&mut self, v: &BigUint) -> &mut Self {
        let bytes = v.to_bytes_le();
        if bytes.len() > 32 {
            return self.fail(CodecError::FieldTooLong {
                field: "u256",
                len: bytes.len(),
                max: 32,
            });
        }
        self.put_raw(&bytes);
        for _ in bytes.len()..32 {
            self.put_raw(&[0]);
        }
        self
    }

    /// A raw byte block. The length is part of the declared field order, not
    /// of the encoding.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.put_raw(bytes)
    }

    /// UTF-8 string in a fixed 64-byte zero-padded field.
    ///
    /// An encoded length beyond the field capacity is an error — the wire
    /// never truncates.
    pub fn put_string64(&mut self, s: &str) -> &mut Self {
        if s.len() > STRING_FIELD_LENGTH {
            return self.fail(CodecError::FieldTooLong {
                field: "string",
                len: s.len(),
                max: STRING_FIELD_LENGTH,
            });
        }
        let mut field = [0u8; STRING_FIELD_LENGTH];
        field[..s.len()].copy_from_slice(s.as_bytes());
        self.put_raw(&field)
    }

    /// The packed amount field: 15 bytes.
    ///
    /// Byte 0 is the sign (0 positive, 1 negative); the remaining 14 bytes
    /// hold the decimal digits of the scaled magnitude, least-significant
    /// first, two per byte with the earlier digit of each pair in the low
    /// nibble. 28 digits of capacity: the full 18-digit fraction plus 10
    /// integer digits.
    pub fn put_amount(&mut self, a: &Amount) -> &mut Self {
        let digits = a.value.magnitude().to_string();
        if digits.len() > AMOUNT_FIELD_DIGITS {
            return self.fail(CodecError::FieldTooLong {
                field: "amount",
                len: digits.len(),
                max: AMOUNT_FIELD_DIGITS,
            });
        }

        let mut field = [0u8; AMOUNT_FIELD_LENGTH];
        if a.value.is_negative() {
            field[0] = 1;
        }
        for (k, ch) in digits.bytes().rev().enumerate() {
            let digit = ch - b'0';
            if k % 2 == 0 {
                field[1 + k / 2] |= digit;
            } else {
                field[1 + k / 2] |= digit << 4;
            }
        }
        self.put_raw(&field)
    }

    fn put_raw(&mut self, bytes: &[u8]) -> &mut Self {
        if self.err.is_none() {
            self.buf.extend_from_slice(bytes);
        }
        self
    }

    fn fail(&mut self, err: CodecError) -> &mut Self {
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }
}
