//! # Checksummed Base58
//!
//! The ledger renders every opaque byte blob a human might see — addresses,
//! private keys, transaction ids — as base58 over the payload plus a trailing
//! 4-byte little-endian CRC32 (IEEE polynomial). The checksum catches the
//! transcription errors base58 was invented to avoid amplifying: a single
//! flipped character makes `unpack58` fail loudly instead of silently
//! producing a different address.

use thiserror::Error;

/// Failures while decoding checksummed base58 text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    /// The text is not valid base58.
    #[error("invalid base58 text")]
    Malformed,

    /// Decoded payload too short to even carry a checksum, or (for the
    /// exact-length variant) not the demanded size.
    #[error("invalid decoded length {actual}")]
    Length { actual: usize },

    /// The trailing CRC32 does not match the payload.
    #[error("checksum mismatch")]
    Checksum,
}

/// Appends a little-endian CRC32-IEEE of `data` and base58-encodes the result.
///
/// # Panics
///
/// Panics if `data` is empty — an empty blob has no meaningful text form and
/// passing one is a caller bug, not a runtime condition.
pub fn pack58(data: &[u8]) -> String {
    assert!(!data.is_empty(), "pack58: empty input");

    let mut buf = Vec::with_capacity(data.len() + 4);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&crc32fast::hash(data).to_le_bytes());
    bs58::encode(buf).into_string()
}

/// Decodes checksummed base58 text, verifying and stripping the trailing
/// 4-byte CRC32.
pub fn unpack58(text: &str) -> Result<Vec<u8>, Base58Error> {
    let decoded = bs58::decode(text)
        .into_vec()
        .map_err(|_| Base58Error::Malformed)?;
    if decoded.len() <= 4 {
        return Err(Base58Error::Length {
            actual: decoded.len(),
        });
    }

    let (payload, crc) = decoded.split_at(decoded.len() - 4);
    let expected = u32::from_le_bytes(crc.try_into().expect("4-byte split"));
    if crc32fast::hash(payload) != expected {
        return Err(Base58Error::Checksum);
    }
    Ok(payload.to_vec())
}

/// [`unpack58`], additionally demanding an exact payload length.
///
/// Used for the fixed-size types (a 32-byte address decodes from exactly 36
/// bytes of base58 payload); any other length is rejected even when the
/// checksum is intact.
pub fn unpack58_exact(text: &str, payload_len: usize) -> Result<Vec<u8>, Base58Error> {
    let payload = unpack58(text)?;
    if payload.len() != payload_len {
        return Err(Base58Error::Length {
            actual: payload.len(),
        });
    }
    Ok(payload)
}
