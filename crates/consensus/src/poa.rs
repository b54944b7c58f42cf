//! Proof of Authority (PoA) sealing.
//!
//! A block is sealed when its unsealed header carries an ECDSA signature by
//! the single configured authority. The signature travels as the block's seal
//! integer (see [`crate::codec`]). Every block weighs the same, so fork choice
//! reduces to the longest valid chain, and there is no difficulty target.

use crate::codec;
use crate::config::AuthorityConfig;
use crate::custody::{KeyCustody, NoCustody};
use crate::sealer::{CancelToken, ConsensusSealer, Result, SealError};
use num_bigint::BigUint;
use sealchain_core::{CryptoError, Keypair, PublicKey, SealData, Sealable};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound on sign-and-verify rounds for one block.
///
/// Deterministic ECDSA verifies on the first round; repeated failures point
/// at an encoding fault and are reported instead of spinning.
pub const MAX_SEAL_ATTEMPTS: u64 = 8;

/// Why a seal was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSeal {
    #[error("block is unsealed")]
    SealAbsent,

    #[error("malformed seal: {0}")]
    MalformedSeal(String),

    #[error("seal signature does not match the authority key")]
    SignatureMismatch,
}

/// Check a block's seal against `public_key`, reporting the failure reason.
pub fn check_seal<B: Sealable + ?Sized>(
    block: &B,
    public_key: &PublicKey,
) -> std::result::Result<(), InvalidSeal> {
    let seal = block.seal_data();
    if seal.is_empty() {
        return Err(InvalidSeal::SealAbsent);
    }

    let signature = codec::decode_signature(&codec::seal_to_integer(seal))
        .map_err(|e| InvalidSeal::MalformedSeal(e.to_string()))?;

    match public_key.verify(block.unsealed_header().as_bytes(), &signature) {
        Ok(()) => Ok(()),
        Err(CryptoError::InvalidSignature) => Err(InvalidSeal::MalformedSeal(
            "signature scalars out of range".into(),
        )),
        Err(_) => Err(InvalidSeal::SignatureMismatch),
    }
}

/// Whether `block` is validly sealed by `public_key`.
///
/// Pure and infallible: every rejection is an ordinary `false`.
pub fn is_sealed_valid<B: Sealable + ?Sized>(block: &B, public_key: &PublicKey) -> bool {
    match check_seal(block, public_key) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "seal rejected");
            false
        }
    }
}

/// Seal `block` with `keypair`, retrying up to [`MAX_SEAL_ATTEMPTS`] times.
///
/// An already valid seal is left untouched. On failure the seal slot is
/// reset to the unsealed sentinel.
pub fn seal_with_key<B: Sealable + ?Sized>(
    block: &mut B,
    keypair: &Keypair,
    cancel: &CancelToken,
) -> Result<()> {
    if is_sealed_valid(&*block, &keypair.public_key) {
        debug!("block already carries a valid seal");
        return Ok(());
    }

    for attempt in 1..=MAX_SEAL_ATTEMPTS {
        if let Err(e) = cancel.check() {
            block.set_seal_data(SealData::EMPTY);
            return Err(e);
        }

        let header = block.unsealed_header();
        let signature = keypair.sign(header.as_bytes())?;
        let value = codec::encode_signature(signature.as_bytes());
        block.set_seal_data(codec::integer_to_seal(&value)?);

        if is_sealed_valid(&*block, &keypair.public_key) {
            info!(attempt, "block sealed");
            return Ok(());
        }
        warn!(attempt, "fresh seal failed verification, retrying");
    }

    block.set_seal_data(SealData::EMPTY);
    Err(SealError::AttemptsExhausted {
        attempts: MAX_SEAL_ATTEMPTS,
    })
}

/// Proof of Authority consensus variant.
pub struct ProofOfAuthority {
    config: AuthorityConfig,
    custody: Arc<dyn KeyCustody>,
}

impl ProofOfAuthority {
    /// A sealing node: verifies against `config` and signs with the key from
    /// `custody`.
    pub fn new(config: AuthorityConfig, custody: Arc<dyn KeyCustody>) -> Self {
        Self { config, custody }
    }

    /// A verify-only node. Sealing fails with [`SealError::KeyUnavailable`].
    pub fn verifier(config: AuthorityConfig) -> Self {
        Self::new(config, Arc::new(NoCustody))
    }

    /// Get the configuration.
    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    /// Check a seal against the configured authority, with the reason.
    pub fn check_seal(&self, block: &dyn Sealable) -> std::result::Result<(), InvalidSeal> {
        check_seal(block, &self.config.public_key)
    }
}

impl ConsensusSealer for ProofOfAuthority {
    fn name(&self) -> &'static str {
        "proof-of-authority"
    }

    fn is_sealed_valid(&self, block: &dyn Sealable) -> bool {
        is_sealed_valid(block, &self.config.public_key)
    }

    fn get_weight(&self, _block: &dyn Sealable) -> BigUint {
        BigUint::from(1u32)
    }

    fn calculate_appropriate_target(&self) -> BigUint {
        BigUint::default()
    }

    fn seal(&self, block: &mut dyn Sealable, cancel: &CancelToken) -> Result<()> {
        let keypair = self.custody.keypair()?;
        if keypair.public_key != self.config.public_key {
            return Err(SealError::NotAuthority);
        }
        seal_with_key(block, &keypair, cancel)
    }
}
