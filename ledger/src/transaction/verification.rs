//! Structural and cryptographic checks over fully serialized transactions.
//!
//! Meant for the receiving side of a payment flow: a service hands out an
//! invoice (destination, token, amount, nonce), later receives the raw
//! transaction bytes, and wants one call that answers "is this exactly the
//! transfer I asked for, signed by the claimed sender?" — with a *named*
//! failure when it isn't, because "invalid" is useless in a support ticket.

use sha3::{Digest as _, Sha3_256};
use thiserror::Error;

use crate::amount::Amount;
use crate::codec::{CodecError, Deserializer};
use crate::config::{SIGNATURE_LENGTH, TRANSFER_PAYLOAD_LENGTH};
use crate::crypto::{self, VerifyError};
use crate::transaction::{Token, UnknownCode};
use crate::types::{PublicKey, Signature};

/// Why a transaction failed verification. Each structural expectation gets
/// its own variant.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The flag byte says digest-only transport; there is no signature to
    /// check.
    #[error("transaction is not signed")]
    NotSigned,

    #[error("signature verification failed: {0}")]
    Signature(#[from] VerifyError),

    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),

    #[error("nonce mismatch: expected {expected}, found {actual}")]
    NonceMismatch { expected: u64, actual: u64 },

    #[error("token mismatch: expected {expected}, found {actual}")]
    TokenMismatch { expected: Token, actual: Token },

    /// The payload's embedded signer key differs from the claimed source.
    #[error("source address mismatch")]
    SourceMismatch,

    #[error("destination address mismatch")]
    DestinationMismatch,

    #[error("amount mismatch: expected {expected}, found {actual}")]
    AmountMismatch { expected: Amount, actual: Amount },
}

/// Checks that `signature` signs the SHA3-256 digest of `payload` under
/// `source`.
///
/// `payload` is the nonce + kind-specific fields — the exact bytes the
/// digest covers, without the flag/signature tail.
pub fn verify_payload(
    source: &PublicKey,
    payload: &[u8],
    signature: &Signature,
) -> Result<(), VerificationError> {
    let digest: [u8; 32] = Sha3_256::digest(payload).into();
    crypto::verify(source, &digest, signature)?;
    Ok(())
}

/// What a transfer is expected to contain. `None` skips that check; the
/// source address is always checked.
#[derive(Debug, Default, Clone)]
pub struct TransferExpectation {
    pub nonce: Option<u64>,
    pub token: Option<Token>,
    pub destination: Option<PublicKey>,
    pub amount: Option<Amount>,
}

/// Verifies a serialized [`TransferAsset`](crate::transaction::TransferAsset)
/// transaction end to end: structure, signature, and every expectation
/// present in `expect`.
pub fn verify_transfer(
    tx: &[u8],
    source: &PublicKey,
    expect: &TransferExpectation,
) -> Result<(), VerificationError> {
    // The transfer payload is fixed-width, so the flag and signature sit at
    // known offsets.
    let mut des = Deserializer::from_bytes(tx);
    let payload = des.get_bytes(TRANSFER_PAYLOAD_LENGTH);
    let flag = des.get_u8();
    let signature = des.get_bytes(SIGNATURE_LENGTH);
    des.finish()?;

    if flag != 1 {
        return Err(VerificationError::NotSigned);
    }
    let signature = Signature::try_from_slice(&signature)
        .map_err(|_| VerificationError::NotSigned)?;
    verify_payload(source, &payload, &signature)?;

    let mut des = Deserializer::from_bytes(&payload);
    let nonce = des.get_u64();
    let token_code = des.get_u16();
    let tx_source = des.get_bytes(32);
    let destination = des.get_bytes(32);
    let amount = des.get_amount();
    des.finish()?;
    let token = Token::from_code(token_code)?;

    if tx_source != source.as_bytes() {
        return Err(VerificationError::SourceMismatch);
    }
    if let Some(expected) = expect.nonce {
        if nonce != expected {
            return Err(VerificationError::NonceMismatch {
                expected,
                actual: nonce,
            });
        }
    }
    if let Some(expected) = expect.token {
        if token != expected {
            return Err(VerificationError::TokenMismatch {
                expected,
                actual: token,
            });
        }
    }
    if let Some(expected) = &expect.destination {
        if destination != expected.as_bytes() {
            return Err(VerificationError::DestinationMismatch);
        }
    }
    if let Some(expected) = &expect.amount {
        if &amount != expected {
            return Err(VerificationError::AmountMismatch {
                expected: expected.clone(),
                actual: amount,
            });
        }
    }
    Ok(())
}
