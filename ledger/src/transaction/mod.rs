//! # Transaction Codec
//!
//! Construction, signing, parsing and verification of the seven wire
//! transaction kinds.
//!
//! A standalone transaction travels as:
//!
//! ```text
//! nonce:u64-LE | kind-specific fields | flag:u8 | signature[64] or digest[32]
//! ```
//!
//! The 2-byte kind tag is *not* part of this blob — it travels outside, in
//! the block stream (see [`crate::block`]) or is implied by the API call.
//! Every kind embeds the signer's public key in its fields, so a payload
//! self-identifies its origin.
//!
//! Signing covers the SHA3-256 digest of `nonce + fields`, not the raw
//! bytes; the flag selects between signed transport (1, signature follows)
//! and digest-only transport (0, the 32-byte digest follows and the
//! signature is a zero-filled placeholder).
//!
//! The kind set is closed, so the variants live in one [`Operation`] sum
//! dispatched by tag — there is nothing open-ended to plug in.

mod id;
mod kinds;
pub mod verification;

pub use id::TransactionId;
pub use kinds::{Kind, Token, UnknownCode, UnknownName, WalletTag};

use std::io::Read;

use sha3::{Digest as _, Sha3_256};
use thiserror::Error;

use crate::amount::Amount;
use crate::codec::{CodecError, Deserializer, Serializer};
use crate::config::{MAX_USER_DATA_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::Signer;
use crate::types::{Digest, PublicKey, Signature};

/// Failures while constructing or parsing a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),
}

/// The output of [`Operation::construct`]: the full wire blob plus the
/// pieces a client usually wants to keep around.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    /// Global identifier: signer address + nonce.
    pub id: TransactionId,
    /// SHA3-256 over nonce + fields; what the signature actually covers.
    pub digest: Digest,
    /// The complete serialized transaction.
    pub data: Vec<u8>,
    pub signature: Signature,
}

/// The envelope half of [`Operation::parse`] — everything except the
/// kind-specific fields, which come back as the [`Operation`] itself.
#[derive(Debug, Clone)]
pub struct ParsedTransaction {
    /// Signer public key embedded in the payload.
    pub from: PublicKey,
    pub nonce: u64,
    pub id: TransactionId,
    /// Recomputed over the bytes actually read.
    pub digest: Digest,
    /// Zero-filled when the transport was digest-only.
    pub signature: Signature,
    pub signed: bool,
}

// ---------------------------------------------------------------------------
// Kind-specific fields
// ---------------------------------------------------------------------------

/// Registers a node; the address is its reachable endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNode {
    pub node_address: String,
}

/// Unregisters the signer's node. No fields beyond the signer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterNode;

/// Moves `amount` of `token` from the signer to `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAsset {
    pub destination: PublicKey,
    pub token: Token,
    pub amount: Amount,
}

/// Arbitrary bytes anchored on the ledger, length-prefixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub data: Vec<u8>,
}

/// Tags a wallet with a system role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSysWallet {
    pub address: PublicKey,
    pub tag: WalletTag,
}

/// Removes a system role from a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterSysWallet {
    pub address: PublicKey,
    pub tag: WalletTag,
}

/// Distributes accumulated fees to the owner wallet, per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionFee {
    pub owner: PublicKey,
    pub amount_utility: Amount,
    pub amount_gold: Amount,
}

/// One transaction of any kind: the closed sum the wire protocol defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    RegisterNode(RegisterNode),
    UnregisterNode(UnregisterNode),
    TransferAsset(TransferAsset),
    RegisterSysWallet(RegisterSysWallet),
    UnregisterSysWallet(UnregisterSysWallet),
    UserData(UserData),
    DistributionFee(DistributionFee),
}

macro_rules! operation_from {
    ($($variant:ident),+) => {
        $(impl From<$variant> for Operation {
            fn from(fields: $variant) -> Self {
                Operation::$variant(fields)
            }
        })+
    };
}

operation_from!(
    RegisterNode,
    UnregisterNode,
    TransferAsset,
    RegisterSysWallet,
    UnregisterSysWallet,
    UserData,
    DistributionFee
);

impl Operation {
    /// The wire kind tag for this operation.
    pub fn kind(&self) -> Kind {
        match self {
            Operation::RegisterNode(_) => Kind::RegisterNode,
            Operation::UnregisterNode(_) => Kind::UnregisterNode,
            Operation::TransferAsset(_) => Kind::TransferAsset,
            Operation::RegisterSysWallet(_) => Kind::RegisterSysWallet,
            Operation::UnregisterSysWallet(_) => Kind::UnregisterSysWallet,
            Operation::UserData(_) => Kind::UserData,
            Operation::DistributionFee(_) => Kind::DistributionFee,
        }
    }

    /// Serializes, digests and signs this operation at `nonce`.
    ///
    /// The nonce is written verbatim — sequencing is the caller's business
    /// (see [`crate::nonce::NonceSequencer`]). Nothing is mutated on
    /// failure; a fresh call with fixed inputs is always possible.
    pub fn construct(
        &self,
        signer: &Signer,
        nonce: u64,
    ) -> Result<SignedTransaction, TransactionError> {
        let mut ser = Serializer::new();
        ser.put_u64(nonce);
        self.encode(&signer.public_key(), &mut ser)?;
        let payload = ser.data()?;

        let digest = Digest::from_bytes(Sha3_256::digest(&payload).into());
        let signature = signer.sign(digest.as_bytes());

        ser.put_u8(1).put_bytes(signature.as_bytes());
        let data = ser.data()?;

        Ok(SignedTransaction {
            id: TransactionId::new(signer.public_key(), nonce),
            digest,
            data,
            signature,
        })
    }

    /// Parses one transaction of the given kind from a byte source.
    ///
    /// The bytes consumed for nonce + fields are captured on the fly and
    /// digested, so the source never needs to be buffered or seekable.
    pub fn parse<R: Read>(
        kind: Kind,
        src: R,
    ) -> Result<(Self, ParsedTransaction), TransactionError> {
        let mut des = Deserializer::new(src);
        Self::parse_from(kind, &mut des)
    }

    /// [`parse`](Self::parse) against an already-open deserializer; used by
    /// the block parser, which owns the stream across many transactions.
    pub fn parse_from<R: Read>(
        kind: Kind,
        des: &mut Deserializer<R>,
    ) -> Result<(Self, ParsedTransaction), TransactionError> {
        des.begin_capture();
        let nonce = des.get_u64();
        let (from, op) = Self::decode(kind, des)?;
        let captured = des.end_capture();
        let digest = Digest::from_bytes(Sha3_256::digest(&captured).into());

        let signed = des.get_u8() != 0;
        let signature = if signed {
            Signature::try_from_slice(&des.get_bytes(SIGNATURE_LENGTH)).unwrap_or_default()
        } else {
            // Digest-only transport: the trailing 32 bytes repeat the digest.
            let _ = des.get_bytes(32);
            Signature::zero()
        };
        des.finish()?;

        Ok((
            op,
            ParsedTransaction {
                from,
                nonce,
                id: TransactionId::new(from, nonce),
                digest,
                signature,
                signed,
            },
        ))
    }

    /// Writes the kind-specific fields in their fixed wire order.
    fn encode(&self, from: &PublicKey, ser: &mut Serializer) -> Result<(), TransactionError> {
        match self {
            Operation::RegisterNode(t) => {
                ser.put_bytes(from.as_bytes()).put_string64(&t.node_address);
            }
            Operation::UnregisterNode(_) => {
                ser.put_bytes(from.as_bytes());
            }
            // The transfer is the one kind whose token code precedes the
            // signer key. Fixed by the protocol.
            Operation::TransferAsset(t) => {
                ser.put_u16(t.token.code())
                    .put_bytes(from.as_bytes())
                    .put_bytes(t.destination.as_bytes())
                    .put_amount(&t.amount);
            }
            Operation::RegisterSysWallet(t) => {
                ser.put_bytes(from.as_bytes())
                    .put_bytes(t.address.as_bytes())
                    .put_u8(t.tag.code());
            }
            Operation::UnregisterSysWallet(t) => {
                ser.put_bytes(from.as_bytes())
                    .put_bytes(t.address.as_bytes())
                    .put_u8(t.tag.code());
            }
            Operation::UserData(t) => {
                if t.data.len() > MAX_USER_DATA_LENGTH {
                    return Err(CodecError::FieldTooLong {
                        field: "user data",
                        len: t.data.len(),
                        max: MAX_USER_DATA_LENGTH,
                    }
                    .into());
                }
                ser.put_bytes(from.as_bytes())
                    .put_u32(t.data.len() as u32)
                    .put_bytes(&t.data);
            }
            Operation::DistributionFee(t) => {
                ser.put_bytes(from.as_bytes())
                    .put_bytes(t.owner.as_bytes())
                    .put_amount(&t.amount_utility)
                    .put_amount(&t.amount_gold);
            }
        }
        Ok(())
    }

    /// Reads the kind-specific fields, returning the embedded signer key.
    fn decode<R: Read>(
        kind: Kind,
        des: &mut Deserializer<R>,
    ) -> Result<(PublicKey, Self), TransactionError> {
        let op = match kind {
            Kind::RegisterNode => {
                let from = get_public_key(des);
                let node_address = des.get_string64();
                des.finish()?;
                (from, RegisterNode { node_address }.into())
            }
            Kind::UnregisterNode => {
                let from = get_public_key(des);
                des.finish()?;
                (from, UnregisterNode.into())
            }
            Kind::TransferAsset => {
                let token_code = des.get_u16();
                let from = get_public_key(des);
                let destination = get_public_key(des);
                let amount = des.get_amount();
                des.finish()?;
                let token = Token::from_code(token_code)?;
                (
                    from,
                    TransferAsset {
                        destination,
                        token,
                        amount,
                    }
                    .into(),
                )
            }
            Kind::RegisterSysWallet => {
                let from = get_public_key(des);
                let address = get_public_key(des);
                let tag_code = des.get_u8();
                des.finish()?;
                let tag = WalletTag::from_code(tag_code)?;
                (from, RegisterSysWallet { address, tag }.into())
            }
            Kind::UnregisterSysWallet => {
                let from = get_public_key(des);
                let address = get_public_key(des);
                let tag_code = des.get_u8();
                des.finish()?;
                let tag = WalletTag::from_code(tag_code)?;
                (from, UnregisterSysWallet { address, tag }.into())
            }
            Kind::UserData => {
                let from = get_public_key(des);
                let size = des.get_u32() as usize;
                // The size word is attacker-controlled; refuse before
                // allocating.
                if size > MAX_USER_DATA_LENGTH {
                    return Err(CodecError::FieldTooLong {
                        field: "user data",
                        len: size,
                        max: MAX_USER_DATA_LENGTH,
                    }
                    .into());
                }
                let data = des.get_bytes(size);
                des.finish()?;
                (from, UserData { data }.into())
            }
            Kind::DistributionFee => {
                let from = get_public_key(des);
                let owner = get_public_key(des);
                let amount_utility = des.get_amount();
                let amount_gold = des.get_amount();
                des.finish()?;
                (
                    from,
                    DistributionFee {
                        owner,
                        amount_utility,
                        amount_gold,
                    }
                    .into(),
                )
            }
        };
        Ok(op)
    }
}

/// A 32-byte key field, honoring the deserializer's sticky-default rule:
/// after an upstream error the zero key comes back, and `finish()` reports
/// the real failure.
fn get_public_key<R: Read>(des: &mut Deserializer<R>) -> PublicKey {
    PublicKey::try_from_slice(&des.get_bytes(PUBLIC_KEY_LENGTH)).unwrap_or_default()
}
