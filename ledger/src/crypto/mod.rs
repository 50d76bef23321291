//! # Signing and Verification
//!
//! Ed25519 over the ledger's *prehashed* 64-byte private key format: the
//! clamped secret scalar in the first 32 bytes, the deterministic-nonce
//! prefix in the last 32. The seed is hashed away at generation time and
//! never stored, so a leaked key file reveals the signing material but not
//! the seed it came from — and more importantly, every party holding a key
//! agrees on its byte layout without re-deriving anything.
//!
//! [`Signer`] wraps a keypair; [`verify`] is the stateless counterpart that
//! only needs a [`PublicKey`].
//!
//! Key bytes are never logged. If you add logging to this module, you will
//! be asked to leave.

mod signer;

pub use signer::Signer;

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use thiserror::Error;

use crate::types::{InvalidLength, PublicKey, Signature};

/// Why a signature failed to verify.
///
/// Intentionally coarse — leaking details about key material through error
/// messages is a classic footgun.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The ledger never signs the empty message, so verifying one is a
    /// caller bug, not a forged signature.
    #[error("empty message")]
    EmptyMessage,

    /// A raw key or signature slice has the wrong length.
    #[error(transparent)]
    Length(#[from] InvalidLength),

    /// The public key bytes are not a valid curve point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// The signature does not match the message under this key.
    #[error("invalid signature for this message")]
    BadSignature,
}

/// Verifies an Ed25519 signature over `message` under `public`.
pub fn verify(
    public: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), VerifyError> {
    if message.is_empty() {
        return Err(VerifyError::EmptyMessage);
    }
    let key =
        VerifyingKey::from_bytes(public.as_bytes()).map_err(|_| VerifyError::InvalidPublicKey)?;
    let sig = DalekSignature::from_bytes(signature.as_bytes());
    key.verify(message, &sig)
        .map_err(|_| VerifyError::BadSignature)
}

/// [`verify`] over raw slices, rejecting wrong lengths before any
/// cryptographic work. For callers holding bytes straight off a wire or a
/// config file rather than the typed forms.
pub fn verify_raw(public: &[u8], message: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
    let public = PublicKey::try_from_slice(public)?;
    let signature = Signature::try_from_slice(signature)?;
    verify(&public, message, &signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_what_signer_produced() {
        let signer = Signer::generate();
        let msg = [0x00, 0x01, 0x02, 0x03];
        let sig = signer.sign(&msg);
        assert_eq!(verify(&signer.public_key(), &msg, &sig), Ok(()));
    }

    #[test]
    fn tampered_message_is_rejected() {
        let signer = Signer::generate();
        let sig = signer.sign(b"original");
        assert_eq!(
            verify(&signer.public_key(), b"tampered", &sig),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn wrong_key_is_rejected() {
        let a = Signer::generate();
        let b = Signer::generate();
        let sig = a.sign(b"message");
        assert_eq!(
            verify(&b.public_key(), b"message", &sig),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn raw_variant_rejects_lengths_before_crypto() {
        let signer = Signer::generate();
        let msg = b"raw path";
        let sig = signer.sign(msg);

        assert!(verify_raw(signer.public_key().as_bytes(), msg, sig.as_bytes()).is_ok());
        assert!(matches!(
            verify_raw(&[0u8; 31], msg, sig.as_bytes()),
            Err(VerifyError::Length(_))
        ));
        assert!(matches!(
            verify_raw(signer.public_key().as_bytes(), msg, &[0u8; 63]),
            Err(VerifyError::Length(_))
        ));
    }

    #[test]
    fn empty_message_is_a_caller_bug() {
        let signer = Signer::generate();
        let sig = signer.sign(b"x");
        assert_eq!(
            verify(&signer.public_key(), b"", &sig),
            Err(VerifyError::EmptyMessage)
        );
    }
}
