//! # Block Stream Parser
//!
//! Single-pass reader for the block wire format:
//!
//! ```text
//! version:u16 | prev digest[32] | merkle root[32] | timestamp:u64
//! | tx count:u16 | block number:u256-LE | signer count:u16
//! | (public key[32] + signature[64]) * signer count
//! | (kind:u16 + transaction blob) * tx count
//! ```
//!
//! The parser owns the field order and the kind-tag dispatch; what happens
//! to each transaction is the caller's business, supplied as a callback
//! that usually just runs [`Operation::parse_from`]. Any short read,
//! unknown kind tag or callback failure aborts immediately — a block is
//! all-or-nothing, there are no partial results.
//!
//! [`Operation::parse_from`]: crate::transaction::Operation::parse_from

use std::io::Read;

use num_bigint::BigUint;
use thiserror::Error;
use tracing::{debug, trace};

use crate::codec::{CodecError, Deserializer};
use crate::config::{DIGEST_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::transaction::{Kind, UnknownCode};
use crate::types::{Digest, PublicKey, Signature};

/// Everything before the transaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u16,
    pub prev_block_digest: Digest,
    pub merkle_root: Digest,
    /// Ledger epoch units; see [`crate::timestamp`].
    pub timestamp: u64,
    pub transaction_count: u16,
    pub block_number: BigUint,
    pub signers: Vec<BlockSigner>,
}

/// One consensus signer's endorsement of the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSigner {
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// Why block parsing aborted. `E` is the caller's callback error type.
#[derive(Debug, Error)]
pub enum BlockError<E: std::error::Error> {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    UnknownKind(#[from] UnknownCode),

    /// A caller callback refused the header or a transaction.
    #[error("block parsing aborted: {0}")]
    Aborted(#[source] E),
}

/// Parses one block from a byte source.
///
/// `on_header` runs once, after the header and signer list are read and
/// before any transaction. `on_transaction` runs once per transaction with
/// the deserializer positioned right after the kind tag; it must consume
/// exactly the transaction's bytes (which [`Operation::parse_from`] does).
///
/// [`Operation::parse_from`]: crate::transaction::Operation::parse_from
pub fn parse_block<R, H, T, E>(
    src: R,
    mut on_header: H,
    mut on_transaction: T,
) -> Result<(), BlockError<E>>
where
    R: Read,
    H: FnMut(&BlockHeader) -> Result<(), E>,
    T: FnMut(Kind, &mut Deserializer<R>, &BlockHeader) -> Result<(), E>,
    E: std::error::Error,
{
    let mut des = Deserializer::new(src);

    let version = des.get_u16();
    let prev_block_digest = get_digest(&mut des);
    let merkle_root = get_digest(&mut des);
    let timestamp = des.get_u64();
    let transaction_count = des.get_u16();
    let block_number = des.get_u256();
    let signer_count = des.get_u16();
    des.finish()?;

    let mut signers = Vec::with_capacity(signer_count as usize);
    for _ in 0..signer_count {
        let public_key =
            PublicKey::try_from_slice(&des.get_bytes(PUBLIC_KEY_LENGTH)).unwrap_or_default();
        let signature =
            Signature::try_from_slice(&des.get_bytes(SIGNATURE_LENGTH)).unwrap_or_default();
        des.finish()?;
        signers.push(BlockSigner {
            public_key,
            signature,
        });
    }

    let header = BlockHeader {
        version,
        prev_block_digest,
        merkle_root,
        timestamp,
        transaction_count,
        block_number,
        signers,
    };
    debug!(
        version,
        block = %header.block_number,
        transactions = transaction_count,
        signers = header.signers.len(),
        "parsed block header"
    );
    on_header(&header).map_err(BlockError::Aborted)?;

    for index in 0..transaction_count {
        let code = des.get_u16();
        des.finish()?;
        let kind = Kind::from_code(code)?;
        trace!(index, %kind, "dispatching block transaction");

        on_transaction(kind, &mut des, &header).map_err(BlockError::Aborted)?;
        des.finish()?;
    }

    Ok(())
}

fn get_digest<R: Read>(des: &mut Deserializer<R>) -> Digest {
    Digest::try_from_slice(&des.get_bytes(DIGEST_LENGTH)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::codec::Serializer;
    use crate::crypto::Signer;
    use crate::transaction::{
        Operation, ParsedTransaction, TransactionError, TransferAsset, Token, UserData,
    };

    /// Serializes a block carrying the given transactions, signed off by
    /// one synthetic consensus signer.
    fn build_block(signer: &Signer, ops: &[(Operation, u64)]) -> Vec<u8> {
        let mut ser = Serializer::new();
        ser.put_u16(1)
            .put_bytes(&[0xAA; 32])
            .put_bytes(&[0xBB; 32])
            .put_u64(19_527_035_308_000_000)
            .put_u16(ops.len() as u16)
            .put_u256(&BigUint::from(712_000u32))
            .put_u16(1)
            .put_bytes(signer.public_key().as_bytes())
            .put_bytes(signer.sign(b"endorsement").as_bytes());
        for (op, nonce) in ops {
            let tx = op.construct(signer, *nonce).expect("construct");
            ser.put_u16(op.kind().code()).put_bytes(&tx.data);
        }
        ser.data().expect("serialize block")
    }

    fn sample_ops() -> Vec<(Operation, u64)> {
        vec![
            (
                TransferAsset {
                    destination: PublicKey::from_bytes([3; 32]),
                    token: Token::Gold,
                    amount: Amount::from_string("7.25").unwrap(),
                }
                .into(),
                41,
            ),
            (
                UserData {
                    data: b"anchored".to_vec(),
                }
                .into(),
                42,
            ),
        ]
    }

    #[test]
    fn parses_header_and_dispatches_every_transaction() {
        let signer = Signer::generate();
        let ops = sample_ops();
        let block = build_block(&signer, &ops);

        let mut seen_header = None;
        let mut seen: Vec<(Operation, ParsedTransaction)> = Vec::new();
        parse_block(
            &block[..],
            |header| {
                seen_header = Some(header.clone());
                Ok::<_, TransactionError>(())
            },
            |kind, des, _| {
                seen.push(Operation::parse_from(kind, des)?);
                Ok(())
            },
        )
        .expect("parse block");

        let header = seen_header.expect("header callback ran");
        assert_eq!(header.version, 1);
        assert_eq!(header.transaction_count, 2);
        assert_eq!(header.block_number, BigUint::from(712_000u32));
        assert_eq!(header.signers.len(), 1);
        assert_eq!(header.signers[0].public_key, signer.public_key());

        assert_eq!(seen.len(), 2);
        for ((op, nonce), (parsed_op, parsed)) in ops.iter().zip(&seen) {
            assert_eq!(parsed_op, op);
            assert_eq!(parsed.nonce, *nonce);
            assert_eq!(parsed.from, signer.public_key());
        }
    }

    #[test]
    fn unknown_kind_tag_aborts() {
        let signer = Signer::generate();
        let mut block = build_block(&signer, &sample_ops());
        // First kind tag sits right after the fixed header and one signer.
        let tag_offset = 2 + 32 + 32 + 8 + 2 + 32 + 2 + (32 + 64);
        block[tag_offset] = 0xEE;

        let result = parse_block(
            &block[..],
            |_| Ok::<_, TransactionError>(()),
            |kind, des, _| Operation::parse_from(kind, des).map(|_| ()),
        );
        assert!(matches!(result, Err(BlockError::UnknownKind(_))));
    }

    #[test]
    fn truncated_stream_aborts() {
        let signer = Signer::generate();
        let block = build_block(&signer, &sample_ops());

        let result = parse_block(
            &block[..block.len() - 10],
            |_| Ok::<_, TransactionError>(()),
            |kind, des, _| Operation::parse_from(kind, des).map(|_| ()),
        );
        assert!(matches!(result, Err(BlockError::Codec(_) | BlockError::Aborted(_))));
    }

    #[test]
    fn header_callback_error_aborts_before_transactions() {
        let signer = Signer::generate();
        let block = build_block(&signer, &sample_ops());

        let mut tx_calls = 0;
        let result = parse_block(
            &block[..],
            |_| Err(TransactionError::UnknownCode(UnknownCode {
                kind: "refused",
                code: 0,
            })),
            |_, _, _| {
                tx_calls += 1;
                Ok(())
            },
        );
        assert!(matches!(result, Err(BlockError::Aborted(_))));
        assert_eq!(tx_calls, 0);
    }
}
