//! Core primitives for sealchain.
//!
//! This crate provides the data types consensus variants operate on:
//! - Blake3 hashing
//! - Blocks, block headers and the [`Sealable`] block interface
//! - Opaque seal storage
//! - ECDSA authority key material

pub mod block;
pub mod crypto;
pub mod hash;
pub mod seal;

// Re-export commonly used types at the crate root
pub use block::{Block, BlockHeader, Sealable};
pub use crypto::{CryptoError, Keypair, PublicKey, Signature, PRIVATE_KEY_LEN, SIGNATURE_LEN};
pub use hash::{hash, hash_concat, Hash, H256};
pub use seal::{SealData, SEAL_DATA_LEN};
