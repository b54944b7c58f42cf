//! The interface shared by every consensus variant.

use crate::codec::EncodingError;
use crate::custody::KeyError;
use num_bigint::BigUint;
use sealchain_core::{CryptoError, Sealable};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while sealing a block.
#[derive(Debug, Error)]
pub enum SealError {
    #[error("sealing key unavailable: {0}")]
    KeyUnavailable(#[from] KeyError),

    #[error("sealing key is not the configured authority")]
    NotAuthority,

    #[error("signing failed: {0}")]
    Signing(#[from] CryptoError),

    #[error("seal encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("no valid seal after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    #[error("sealing cancelled")]
    Cancelled,

    #[error("failed to spawn sealing worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("sealing worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, SealError>;

/// Shared flag used to abandon an in-flight sealing attempt.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// `Err(SealError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SealError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A consensus variant: how blocks are sealed, verified and weighed.
///
/// Implementations are interchangeable behind `Arc<dyn ConsensusSealer>`;
/// blocks carry only data.
pub trait ConsensusSealer: Send + Sync {
    /// Short human-readable name of the variant.
    fn name(&self) -> &'static str;

    /// Whether the block's seal is valid. Never fails: malformed or
    /// adversarial seals are simply `false`.
    fn is_sealed_valid(&self, block: &dyn Sealable) -> bool;

    /// Contribution of this block to cumulative chain weight.
    fn get_weight(&self, block: &dyn Sealable) -> BigUint;

    /// Difficulty target for new seals.
    fn calculate_appropriate_target(&self) -> BigUint;

    /// Install a valid seal on `block`, checking `cancel` between attempts.
    fn seal(&self, block: &mut dyn Sealable, cancel: &CancelToken) -> Result<()>;
}
