//! Pluggable block sealing for sealchain.
//!
//! This crate provides the consensus variants a node can run behind the
//! common [`ConsensusSealer`] interface:
//! - Proof of Authority: seals are ECDSA signatures by one configured authority
//! - Proof of Work: seals are nonces whose work hash is below a target
//! - Signature/seal integer codec
//! - Key custody, cancellable background sealing and fork choice
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sealchain_consensus::{
//!     AuthorityConfig, CancelToken, ConsensusSealer, InMemoryCustody, ProofOfAuthority,
//! };
//! use sealchain_core::{Block, Keypair};
//!
//! // The authority key pair; every node knows the public half.
//! let keypair = Keypair::generate();
//! let config = AuthorityConfig::new(keypair.public_key.clone());
//!
//! // The sealing node
//! let sealer = ProofOfAuthority::new(config.clone(), Arc::new(InMemoryCustody::new(keypair)));
//! let mut block = Block::genesis();
//! sealer.seal(&mut block, &CancelToken::new()).unwrap();
//!
//! // Any other node
//! let verifier = ProofOfAuthority::verifier(config);
//! assert!(verifier.is_sealed_valid(&block));
//! ```

pub mod codec;
pub mod config;
pub mod custody;
pub mod fork;
pub mod poa;
pub mod pow;
pub mod sealer;
pub mod worker;

// Re-export commonly used types
pub use codec::{decode_signature, encode_signature, EncodingError};
pub use config::{AuthorityConfig, ConfigError};
pub use custody::{FileCustody, InMemoryCustody, KeyCustody, KeyError, KeyFile, NoCustody};
pub use fork::{chain_weight, heavier_chain, ForkChoice};
pub use poa::{check_seal, is_sealed_valid, seal_with_key, InvalidSeal, ProofOfAuthority};
pub use pow::{PowConfig, ProofOfWork};
pub use sealer::{CancelToken, ConsensusSealer, SealError};
pub use worker::{SealHandle, SealingWorker};
