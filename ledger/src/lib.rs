// Copyright (c) 2026 Aurum Labs. MIT License.
// See LICENSE for details.

//! # Aurum Ledger SDK
//!
//! Client-side building blocks for the Aurum ledger: construct, sign,
//! serialize, parse, and verify transactions and blocks, and encode the
//! ledger's addresses, amounts, and hashes.
//!
//! This crate deliberately stops at the wire. It knows how to produce and
//! consume the byte formats a node exchanges — it does not implement
//! consensus, state, balances, or networking. Those live in the node; we
//! just speak its language fluently.
//!
//! ## Architecture
//!
//! ```text
//! amount       — 18-digit fixed-point Amount on an arbitrary-precision integer
//! codec        — ordered binary writer/reader (the wire codec), packed amounts
//! base58       — base58 text form with a trailing CRC32 checksum
//! types        — fixed-size key/signature/digest newtypes
//! crypto       — prehashed Ed25519 signer and stateless verification
//! nonce        — thread-safe monotonic nonce sequencer
//! transaction  — per-kind payload layout, digesting, signing, parsing, verification
//! block        — streaming block parser (header + signers + transactions)
//! timestamp    — ledger epoch (microseconds since 1400-01-01) conversions
//! config       — protocol constants
//! util         — small display helpers
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Byte-exactness first. Every format here is pinned by regression vectors.
//! 2. No floating point anywhere near money — amounts are scaled big integers.
//! 3. Malformed input is an error, never a panic.
//! 4. Everything except the nonce sequencer is value-in/value-out and
//!    freely shareable across threads.

pub mod amount;
pub mod base58;
pub mod block;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod nonce;
pub mod timestamp;
pub mod transaction;
pub mod types;
pub mod util;

pub use amount::Amount;
pub use crypto::Signer;
pub use nonce::NonceSequencer;
pub use types::{Digest, PrivateKey, PublicKey, Signature};
