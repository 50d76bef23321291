//! # Protocol Constants
//!
//! Every magic number of the Aurum wire format lives here. These values are
//! fixed by the ledger protocol; changing any of them breaks byte-for-byte
//! compatibility with every deployed node, so don't.

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Decimal precision of an [`Amount`](crate::Amount): the scaled value is the
/// real value times 10^18, and the textual form always carries exactly this
/// many fraction digits.
pub const AMOUNT_PRECISION: usize = 18;

/// Width of the packed on-wire amount field in bytes: one sign byte plus
/// 14 digit-pair bytes (18 fraction digits + 10 integer digits).
pub const AMOUNT_FIELD_LENGTH: usize = 15;

/// Number of decimal digits the packed amount field can carry.
pub const AMOUNT_FIELD_DIGITS: usize = (AMOUNT_FIELD_LENGTH - 1) * 2;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 public key length. A public key doubles as a wallet address.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Private key length: the 64-byte *prehashed* form — the SHA-512-expanded,
/// clamped scalar in the first half and the signing prefix in the second.
/// Not a raw seed.
pub const PRIVATE_KEY_LENGTH: usize = 64;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Digest length. Transaction digests are SHA3-256 over the serialized
/// nonce + payload.
pub const DIGEST_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Wire Format
// ---------------------------------------------------------------------------

/// Width of the fixed, zero-padded UTF-8 string field.
pub const STRING_FIELD_LENGTH: usize = 64;

/// Upper bound on a user-data payload. The wire length prefix is a u32, but
/// nothing legitimate approaches that; the parser refuses to allocate past
/// this.
pub const MAX_USER_DATA_LENGTH: usize = 1 << 20;

/// A transaction identifier is the source public key followed by the
/// little-endian nonce.
pub const TRANSACTION_ID_LENGTH: usize = PUBLIC_KEY_LENGTH + 8;

/// Serialized length of a transfer payload: nonce (8) + token tag (2) +
/// source key (32) + destination key (32) + packed amount (15). Verification
/// splits a serialized transfer at this fixed offset.
pub const TRANSFER_PAYLOAD_LENGTH: usize = 8 + 2 + 2 * PUBLIC_KEY_LENGTH + AMOUNT_FIELD_LENGTH;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Block timestamps count microseconds since the ledger epoch,
/// 1400-01-01T00:00:00Z (proleptic Gregorian).
pub const EPOCH_YEAR: i32 = 1400;
