//! Block and block header structures.

use crate::hash::{hash_concat, Hash};
use crate::seal::SealData;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The block interface consensus variants operate on.
///
/// A block exposes the canonical text of its header without the seal, and a
/// single seal slot that is written once during sealing.
pub trait Sealable {
    /// Canonical serialization of every header field except the seal.
    fn unsealed_header(&self) -> String;

    /// The current seal.
    fn seal_data(&self) -> &SealData;

    /// Replace the seal.
    fn set_seal_data(&mut self, seal: SealData);

    /// Whether the block carries anything other than the unsealed sentinel.
    fn is_sealed(&self) -> bool {
        !self.seal_data().is_empty()
    }
}

/// The header of a block containing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block height (0 for genesis).
    pub height: u64,
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Commitment to the block body (transactions are handled elsewhere).
    pub body_root: Hash,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Canonical `|`-separated text form, signed by PoA and hashed by PoW.
    pub fn canonical(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.height, self.parent_hash, self.body_root, self.timestamp
        )
    }

    /// Get the current Unix timestamp.
    pub fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// A block: header data plus its seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block header.
    pub header: BlockHeader,
    /// Consensus seal over the header.
    #[serde(default)]
    pub seal: SealData,
}

impl Block {
    /// Create a new unsealed block.
    pub fn new(height: u64, parent_hash: Hash, body_root: Hash) -> Self {
        Self::with_timestamp(
            height,
            parent_hash,
            body_root,
            BlockHeader::current_timestamp(),
        )
    }

    /// Create a new unsealed block with an explicit timestamp.
    pub fn with_timestamp(height: u64, parent_hash: Hash, body_root: Hash, timestamp: u64) -> Self {
        Self {
            header: BlockHeader {
                height,
                parent_hash,
                body_root,
                timestamp,
            },
            seal: SealData::EMPTY,
        }
    }

    /// Create the genesis block.
    pub fn genesis() -> Self {
        Self::new(0, Hash::ZERO, Hash::ZERO)
    }

    /// Create an unsealed child of `parent`.
    pub fn child_of(parent: &Block, body_root: Hash) -> Self {
        Self::new(parent.height() + 1, parent.hash(), body_root)
    }

    /// Block hash, committing to the header and the seal.
    pub fn hash(&self) -> Hash {
        hash_concat(&[self.header.canonical().as_bytes(), self.seal.as_bytes()])
    }

    /// Get the block height.
    pub fn height(&self) -> u64 {
        self.header.height
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.header.height == 0 && self.header.parent_hash == Hash::ZERO
    }
}

impl Sealable for Block {
    fn unsealed_header(&self) -> String {
        self.header.canonical()
    }

    fn seal_data(&self) -> &SealData {
        &self.seal
    }

    fn set_seal_data(&mut self, seal: SealData) {
        self.seal = seal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash;

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis();

        assert!(genesis.is_genesis());
        assert_eq!(genesis.height(), 0);
        assert_eq!(genesis.header.parent_hash, Hash::ZERO);
        assert!(!genesis.is_sealed());
    }

    #[test]
    fn test_unsealed_header_excludes_seal() {
        let mut block = Block::with_timestamp(3, hash(b"parent"), hash(b"body"), 1_700_000_000);
        let before = block.unsealed_header();

        block.set_seal_data(SealData::from_be_slice(&[7u8; 8]).unwrap());

        assert_eq!(block.unsealed_header(), before);
        assert!(block.is_sealed());
    }

    #[test]
    fn test_unsealed_header_format() {
        let block = Block::with_timestamp(1, Hash::ZERO, Hash::ZERO, 42);
        let zero = format!("0x{}", "0".repeat(64));
        assert_eq!(
            block.unsealed_header(),
            format!("1|{}|{}|42", zero, zero)
        );
    }

    #[test]
    fn test_block_hash_commits_to_seal() {
        let mut block = Block::with_timestamp(1, Hash::ZERO, Hash::ZERO, 42);
        let unsealed = block.hash();
        assert_eq!(unsealed, block.hash());

        block.set_seal_data(SealData::from_be_slice(&[1]).unwrap());
        assert_ne!(unsealed, block.hash());
    }

    #[test]
    fn test_child_links_parent() {
        let genesis = Block::genesis();
        let child = Block::child_of(&genesis, hash(b"txs"));

        assert_eq!(child.height(), 1);
        assert_eq!(child.header.parent_hash, genesis.hash());
        assert!(!child.is_genesis());
    }

    #[test]
    fn test_block_json_roundtrip() {
        let mut block = Block::with_timestamp(2, hash(b"p"), hash(b"b"), 99);
        block.set_seal_data(SealData::from_be_slice(&[9u8; 96]).unwrap());

        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
