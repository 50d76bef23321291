//! # Fixed-Size Wire Types
//!
//! Newtypes for the four byte-array shapes the ledger deals in: public keys
//! (which double as wallet addresses), 64-byte prehashed private keys,
//! signatures, and digests. Any slice of the wrong length is rejected at the
//! boundary that accepts it — once you hold one of these, its length is a
//! fact, not a hope.
//!
//! All of them render as base58 with a trailing CRC32 checksum, the ledger's
//! human-readable form. `PrivateKey` gets the text codec too, but no serde
//! and a redacted `Debug` — serializing secrets should be a deliberate act,
//! not a side effect of dumping a struct into JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::base58::{self, Base58Error};
use crate::config::{DIGEST_LENGTH, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Rejection of a byte slice with the wrong length for a fixed-size type.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
pub struct InvalidLength {
    /// Human name of the offended type ("public key", "signature", ...).
    pub kind: &'static str,
    pub expected: usize,
    pub actual: usize,
}

/// Failure to parse a fixed-size type from its base58 text form.
#[derive(Debug, Error)]
pub enum TypeParseError {
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error(transparent)]
    Length(#[from] InvalidLength),
}

macro_rules! fixed_bytes_type {
    ($(#[$doc:meta])* $name:ident, $len:expr, $kind:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Wraps raw bytes. The length is enforced by the type.
            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Validates the slice length and copies it in.
            pub fn try_from_slice(slice: &[u8]) -> Result<Self, InvalidLength> {
                let arr: [u8; $len] = slice.try_into().map_err(|_| InvalidLength {
                    kind: $kind,
                    expected: $len,
                    actual: slice.len(),
                })?;
                Ok(Self(arr))
            }

            /// Parses the base58-checksum text form, enforcing the exact
            /// decoded length.
            pub fn from_base58(text: &str) -> Result<Self, TypeParseError> {
                let bytes = base58::unpack58_exact(text, $len)?;
                Ok(Self::try_from_slice(&bytes)?)
            }

            /// Renders the base58-checksum text form.
            pub fn to_base58(&self) -> String {
                base58::pack58(&self.0)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_bytes(self) -> [u8; $len] {
                self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Default for $name {
            /// All zeroes.
            fn default() -> Self {
                Self([0u8; $len])
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = TypeParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_base58(s)
            }
        }
    };
}

fixed_bytes_type!(
    /// A 32-byte Ed25519 public key. On this ledger, the public key *is*
    /// the wallet address — there is no separate address derivation step.
    PublicKey,
    PUBLIC_KEY_LENGTH,
    "public key"
);

fixed_bytes_type!(
    /// A 64-byte *prehashed* private key: the clamped signing scalar in the
    /// first 32 bytes and the Ed25519 hash prefix in the last 32. This is the
    /// expanded form, not a raw seed — see [`crate::crypto::Signer`].
    PrivateKey,
    PRIVATE_KEY_LENGTH,
    "private key"
);

fixed_bytes_type!(
    /// A 64-byte Ed25519 signature.
    Signature,
    SIGNATURE_LENGTH,
    "signature"
);

fixed_bytes_type!(
    /// A 32-byte hash output (SHA3-256 for transaction digests).
    Digest,
    DIGEST_LENGTH,
    "digest"
);

impl Signature {
    /// The all-zero placeholder used for unsigned (digest-only) transport.
    pub fn zero() -> Self {
        Self([0u8; SIGNATURE_LENGTH])
    }
}

// ---------------------------------------------------------------------------
// Display / Debug
// ---------------------------------------------------------------------------

macro_rules! display_as_base58 {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_base58())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_base58())
            }
        }
    };
}

display_as_base58!(PublicKey);
display_as_base58!(Signature);
display_as_base58!(Digest);

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "PrivateKey(..)")
    }
}

// ---------------------------------------------------------------------------
// Serde (text form; PrivateKey deliberately excluded)
// ---------------------------------------------------------------------------

macro_rules! serde_as_base58 {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base58())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_base58(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_as_base58!(PublicKey);
serde_as_base58!(Signature);
serde_as_base58!(Digest);
