//! Ordered reader over an in-memory buffer or any byte stream, with the
//! sticky-first-error discipline described in the [module docs](crate::codec).

use std::io::{self, Cursor, Read};

use num_bigint::{BigInt, BigUint, Sign};

use crate::amount::Amount;
use crate::config::{AMOUNT_FIELD_DIGITS, AMOUNT_FIELD_LENGTH, STRING_FIELD_LENGTH};

use super::CodecError;

/// Consumes wire primitives in declaration order from a byte source.
///
/// The first failure — truncation, a bad digit nibble, an I/O error — is
/// recorded; every later read is a no-op returning a zero-valued default.
/// Call [`error`](Self::error) or [`finish`](Self::finish) once the field
/// sequence is done.
///
/// Blocking behavior is inherited from the source: reading from a socket
/// blocks like the socket does. The codec itself imposes no timeouts.
pub struct Deserializer<R> {
    src: R,
    err: Option<CodecError>,
    capture: Option<Vec<u8>>,
}

impl<'a> Deserializer<Cursor<&'a [u8]>> {
    /// Reads from an in-memory buffer.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self::new(Cursor::new(data))
    }
}

impl<R: Read> Deserializer<R> {
    /// Reads from an arbitrary byte source (file, socket, buffer).
    pub fn new(src: R) -> Self {
        Self {
            src,
            err: None,
            capture: None,
        }
    }

    /// First error encountered, if any. Reads after an error return
    /// zero-valued defaults; the error itself stays here until queried.
    pub fn error(&self) -> Option<&CodecError> {
        self.err.as_ref()
    }

    /// `Ok` if every read so far succeeded, otherwise the first error.
    pub fn finish(&self) -> Result<(), CodecError> {
        match &self.err {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Starts recording every byte subsequently consumed.
    ///
    /// This is the tee the transaction parser uses to digest exactly the
    /// bytes it read, without buffering the whole source first.
    pub fn begin_capture(&mut self) {
        self.capture = Some(Vec::new());
    }

    /// Stops recording and returns the captured bytes.
    pub fn end_capture(&mut self) -> Vec<u8> {
        self.capture.take().unwrap_or_default()
    }

    pub fn get_u8(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf);
        buf[0]
    }

    pub fn get_u16(&mut self) -> u16 {
        let mut buf = [0u8; 2];
        self.read_into(&mut buf);
        u16::from_le_bytes(buf)
    }

    pub fn get_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf);
        u32::from_le_bytes(buf)
    }

    pub fn get_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.read_into(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// 256-bit unsigned integer from 32 little-endian bytes.
    pub fn get_u256(&mut self) -> BigUint {
        let mut buf = [0u8; 32];
        self.read_into(&mut buf);
        BigUint::from_bytes_le(&buf)
    }

    /// A raw byte block of exactly `len` bytes. Returns an empty vector
    /// after an error.
    pub fn get_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        if self.read_into(&mut buf) {
            buf
        } else {
            Vec::new()
        }
    }

    /// UTF-8 string from the fixed 64-byte zero-padded field.
    pub fn get_string64(&mut self) -> String {
        let mut buf = [0u8; STRING_FIELD_LENGTH];
        if !self.read_into(&mut buf) {
            return String::new();
        }
        let end = buf.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
        match std::str::from_utf8(&buf[..end]) {
            Ok(s) => s.to_string(),
            Err(_) => {
                self.fail(CodecError::Malformed("string"));
                String::new()
            }
        }
    }

    /// The packed 15-byte amount field (layout documented on
    /// [`Serializer::put_amount`](super::Serializer::put_amount)).
    pub fn get_amount(&mut self) -> Amount {
        let mut field = [0u8; AMOUNT_FIELD_LENGTH];
        if !self.read_into(&mut field) {
            return Amount::zero();
        }

        let sign_byte = field[0];
        if sign_byte > 1 {
            self.fail(CodecError::Malformed("amount"));
            return Amount::zero();
        }

        // Digits sit LSD-first from byte 1, the earlier digit of each pair
        // in the low nibble; collect them MSD-first.
        let mut digits = Vec::with_capacity(AMOUNT_FIELD_DIGITS);
        for k in (0..AMOUNT_FIELD_DIGITS).rev() {
            let byte = field[1 + k / 2];
            let digit = if k % 2 == 0 { byte & 0x0F } else { byte >> 4 };
            if digit > 9 {
                self.fail(CodecError::Malformed("amount"));
                return Amount::zero();
            }
            digits.push(b'0' + digit);
        }

        let magnitude = BigUint::parse_bytes(&digits, 10).unwrap_or_default();
        let sign = if sign_byte == 1 && magnitude != BigUint::default() {
            Sign::Minus
        } else if magnitude == BigUint::default() {
            Sign::NoSign
        } else {
            Sign::Plus
        };
        Amount::from_raw(BigInt::from_biguint(sign, magnitude))
    }

    /// Reads exactly `buf.len()` bytes, appending to the capture buffer when
    /// one is active. Returns false (and records the error) on failure.
    fn read_into(&mut self, buf: &mut [u8]) -> bool {
        if self.err.is_some() {
            buf.fill(0);
            return false;
        }
        match self.src.read_exact(buf) {
            Ok(()) => {
                if let Some(cap) = &mut self.capture {
                    cap.extend_from_slice(buf);
                }
                true
            }
            Err(e) => {
                self.fail(if e.kind() == io::ErrorKind::UnexpectedEof {
                    CodecError::Truncated
                } else {
                    CodecError::Io { kind: e.kind() }
                });
                buf.fill(0);
                false
            }
        }
    }

    fn fail(&mut self, err: CodecError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }
}
