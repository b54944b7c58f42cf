//! Proof of Work (PoW) sealing.
//!
//! The seal integer is a nonce. A seal is valid when
//! `blake3(unsealed_header || decimal(nonce))`, read as a 256-bit big-endian
//! integer, is below the target. Lower targets are harder and weigh more.

use crate::codec;
use crate::sealer::{CancelToken, ConsensusSealer, Result, SealError};
use num_bigint::BigUint;
use sealchain_core::{hash_concat, Sealable};
use tracing::{debug, info};

/// How many nonces are tried between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// The easiest possible target, `2^256 - 1`.
pub fn max_target() -> BigUint {
    (BigUint::from(1u32) << 256u32) - 1u32
}

/// Proof of Work configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowConfig {
    /// Work hashes must be strictly below this value.
    pub target: BigUint,
    /// Largest nonce tried before giving up.
    pub max_nonce: u64,
}

impl Default for PowConfig {
    fn default() -> Self {
        Self::with_difficulty_bits(16)
    }
}

impl PowConfig {
    pub fn new(target: BigUint, max_nonce: u64) -> Self {
        Self { target, max_nonce }
    }

    /// Target requiring `bits` leading zero bits in the work hash.
    pub fn with_difficulty_bits(bits: u32) -> Self {
        Self {
            target: max_target() >> bits,
            max_nonce: u64::from(u32::MAX),
        }
    }
}

/// Proof of Work consensus variant.
pub struct ProofOfWork {
    config: PowConfig,
}

impl ProofOfWork {
    pub fn new(config: PowConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PowConfig {
        &self.config
    }

    /// The work hash of `header` with `nonce`.
    pub fn work_hash(header: &str, nonce: &BigUint) -> BigUint {
        let digest = hash_concat(&[header.as_bytes(), nonce.to_string().as_bytes()]);
        BigUint::from_bytes_be(digest.as_bytes())
    }
}

impl ConsensusSealer for ProofOfWork {
    fn name(&self) -> &'static str {
        "proof-of-work"
    }

    fn is_sealed_valid(&self, block: &dyn Sealable) -> bool {
        let seal = block.seal_data();
        if seal.is_empty() {
            return false;
        }
        let nonce = codec::seal_to_integer(seal);
        Self::work_hash(&block.unsealed_header(), &nonce) < self.config.target
    }

    fn get_weight(&self, _block: &dyn Sealable) -> BigUint {
        let target = self.config.target.clone().max(BigUint::from(1u32));
        max_target() / target
    }

    fn calculate_appropriate_target(&self) -> BigUint {
        self.config.target.clone()
    }

    fn seal(&self, block: &mut dyn Sealable, cancel: &CancelToken) -> Result<()> {
        let header = block.unsealed_header();

        for nonce in 1..=self.config.max_nonce {
            if nonce % CANCEL_CHECK_INTERVAL == 1 {
                cancel.check()?;
            }
            let nonce = BigUint::from(nonce);
            if Self::work_hash(&header, &nonce) < self.config.target {
                block.set_seal_data(codec::integer_to_seal(&nonce)?);
                info!(%nonce, "block sealed");
                return Ok(());
            }
        }

        debug!(max_nonce = self.config.max_nonce, "nonce space exhausted");
        Err(SealError::AttemptsExhausted {
            attempts: self.config.max_nonce,
        })
    }
}
