//! The global transaction identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::base58;
use crate::config::{PUBLIC_KEY_LENGTH, TRANSACTION_ID_LENGTH};
use crate::types::{InvalidLength, PublicKey, TypeParseError};

/// Identifies a transaction globally by `(sender address, nonce)`.
///
/// The payload contents don't participate — a wallet can only ever emit one
/// transaction per nonce, so the pair pins the transaction down regardless
/// of what it carries. On the wire and in text form it is the 40-byte
/// concatenation of the address and the little-endian nonce, rendered as
/// checksummed base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    pub address: PublicKey,
    pub nonce: u64,
}

impl TransactionId {
    pub fn new(address: PublicKey, nonce: u64) -> Self {
        Self { address, nonce }
    }

    /// The 40-byte binary form: address followed by the nonce.
    pub fn to_bytes(&self) -> [u8; TRANSACTION_ID_LENGTH] {
        let mut buf = [0u8; TRANSACTION_ID_LENGTH];
        buf[..PUBLIC_KEY_LENGTH].copy_from_slice(self.address.as_bytes());
        buf[PUBLIC_KEY_LENGTH..].copy_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, InvalidLength> {
        if slice.len() != TRANSACTION_ID_LENGTH {
            return Err(InvalidLength {
                kind: "transaction id",
                expected: TRANSACTION_ID_LENGTH,
                actual: slice.len(),
            });
        }
        let address = PublicKey::try_from_slice(&slice[..PUBLIC_KEY_LENGTH])?;
        let mut nonce = [0u8; 8];
        nonce.copy_from_slice(&slice[PUBLIC_KEY_LENGTH..]);
        Ok(Self {
            address,
            nonce: u64::from_le_bytes(nonce),
        })
    }

    pub fn from_base58(text: &str) -> Result<Self, TypeParseError> {
        let bytes = base58::unpack58(text)?;
        Ok(Self::try_from_slice(&bytes)?)
    }

    pub fn to_base58(&self) -> String {
        base58::pack58(&self.to_bytes())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({} @ {})", self.address, self.nonce)
    }
}

impl FromStr for TransactionId {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TransactionId::from_base58(&s).map_err(serde::de::Error::custom)
    }
}
