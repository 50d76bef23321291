//! The [`Signer`] keypair over prehashed private keys.

use curve25519_dalek::scalar::clamp_integer;
use ed25519_dalek::hazmat::{raw_sign, ExpandedSecretKey};
use ed25519_dalek::VerifyingKey;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest as _, Sha512};
use std::fmt;

use crate::types::{PrivateKey, PublicKey, Signature};

/// An Ed25519 keypair in the ledger's prehashed form.
///
/// The 64-byte [`PrivateKey`] is the *expanded* secret — clamped scalar plus
/// nonce prefix — not a 32-byte seed. Construction from a key is therefore
/// just a byte copy and a public-key derivation; no hashing happens after
/// [`generate`](Self::generate).
///
/// Signatures are deterministic: the same key and message always produce the
/// same 64 bytes. No randomness is consumed at signing time.
///
/// # Examples
///
/// ```
/// use aurum_ledger::crypto::{self, Signer};
///
/// let signer = Signer::generate();
/// let sig = signer.sign(b"send 10 to maria");
/// assert!(crypto::verify(&signer.public_key(), b"send 10 to maria", &sig).is_ok());
/// ```
pub struct Signer {
    expanded: ExpandedSecretKey,
    verifying: VerifyingKey,
    private: PrivateKey,
    public: PublicKey,
}

impl Signer {
    /// Generates a fresh keypair from the OS cryptographic RNG.
    ///
    /// A 32-byte seed is drawn, expanded through SHA-512, clamped, and then
    /// discarded — only the expanded form survives.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);

        let mut blob: [u8; 64] = Sha512::digest(seed).into();
        let mut scalar = [0u8; 32];
        scalar.copy_from_slice(&blob[..32]);
        blob[..32].copy_from_slice(&clamp_integer(scalar));

        Self::from_private_key(&PrivateKey::from_bytes(blob))
    }

    /// Reconstructs the keypair from a prehashed private key, re-deriving
    /// the public half.
    pub fn from_private_key(key: &PrivateKey) -> Self {
        let expanded = ExpandedSecretKey::from_bytes(key.as_bytes());
        let verifying = VerifyingKey::from(&expanded);
        Self {
            public: PublicKey::from_bytes(verifying.to_bytes()),
            verifying,
            private: *key,
            expanded,
        }
    }

    /// Signs a message. Deterministic for a given key and message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = raw_sign::<Sha512>(&self.expanded, message, &self.verifying);
        Signature::from_bytes(sig.to_bytes())
    }

    /// The public key — on this ledger, also the wallet address.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// The 64-byte prehashed private key. Handle with care; see the
    /// [module docs](crate::crypto).
    pub fn private_key(&self) -> PrivateKey {
        self.private
    }
}

impl Clone for Signer {
    fn clone(&self) -> Self {
        Self::from_private_key(&self.private)
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the public half; the private key stays out of logs.
        write!(f, "Signer({})", self.public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keypairs_are_distinct() {
        let a = Signer::generate();
        let b = Signer::generate();
        assert_ne!(a.private_key().as_bytes(), b.private_key().as_bytes());
        assert_ne!(a.public_key(), b.public_key());
    }

    // Private-to-public derivation fixtures produced by the reference
    // implementation.
    #[test]
    fn derives_reference_public_keys() {
        let cases = [
            (
                "TBzyWv8Dga5aN4Hai2nFTwyTXvDJKkJhq8HMDPC9zqTWLSTLo4jFFKKnVS52a1kp7YJdm2b8HrR2Buk9PqyD1DwhxUzsJ",
                "2p6QCcwAMLSSXfFFVQT4vYCe8VPwm3rvK4zdNGAM7zeLBqrVLW",
            ),
            (
                "4CdzVBba43H7B12zNoSCE8dz8RM9ggUSagfxPdZ1kQ7hbrXLqNNUwGQiiV1VxU3xuEcj4ybxTZPnjq8BAhBUuJxzU8XxQ",
                "2PztA94iHZdeX8d5hPJbQfUGcN6WWUhfmU6G5ySJQ9cnUueiuk",
            ),
        ];
        for (private, public) in cases {
            let key = PrivateKey::from_base58(private).expect("valid private key");
            let signer = Signer::from_private_key(&key);
            assert_eq!(signer.public_key().to_base58(), public);
        }
    }

    #[test]
    fn signatures_are_deterministic() {
        let signer = Signer::generate();
        let msg = b"determinism is underrated";
        assert_eq!(signer.sign(msg), signer.sign(msg));
    }

    #[test]
    fn private_key_roundtrip_preserves_identity() {
        let signer = Signer::generate();
        let restored = Signer::from_private_key(&signer.private_key());
        assert_eq!(signer.public_key(), restored.public_key());
        assert_eq!(signer.sign(b"same"), restored.sign(b"same"));
    }

    #[test]
    fn debug_shows_only_the_public_half() {
        let signer = Signer::generate();
        let dbg = format!("{signer:?}");
        assert!(dbg.starts_with("Signer("));
        assert!(!dbg.contains(&signer.private_key().to_base58()));
    }
}
