//! Fork choice by cumulative chain weight.

use crate::sealer::ConsensusSealer;
use num_bigint::BigUint;
use sealchain_core::Sealable;
use std::cmp::Ordering;

/// Outcome of comparing two competing chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkChoice {
    Left,
    Right,
    Tie,
}

/// Sum of block weights, or `None` if any block is not validly sealed.
pub fn chain_weight<B: Sealable>(sealer: &dyn ConsensusSealer, blocks: &[B]) -> Option<BigUint> {
    blocks.iter().try_fold(BigUint::default(), |acc, block| {
        sealer
            .is_sealed_valid(block)
            .then(|| acc + sealer.get_weight(block))
    })
}

/// Pick the heavier of two chains. A chain with an invalid seal always loses.
pub fn heavier_chain<B: Sealable>(
    sealer: &dyn ConsensusSealer,
    left: &[B],
    right: &[B],
) -> ForkChoice {
    match (chain_weight(sealer, left), chain_weight(sealer, right)) {
        (Some(l), Some(r)) => match l.cmp(&r) {
            Ordering::Greater => ForkChoice::Left,
            Ordering::Less => ForkChoice::Right,
            Ordering::Equal => ForkChoice::Tie,
        },
        (Some(_), None) => ForkChoice::Left,
        (None, Some(_)) => ForkChoice::Right,
        (None, None) => ForkChoice::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthorityConfig;
    use crate::custody::InMemoryCustody;
    use crate::poa::ProofOfAuthority;
    use crate::sealer::CancelToken;
    use sealchain_core::{hash, Block, Keypair};
    use std::sync::Arc;

    fn sealed_chain(poa: &ProofOfAuthority, len: usize) -> Vec<Block> {
        let mut chain: Vec<Block> = Vec::with_capacity(len);
        for i in 0..len {
            let mut block = match chain.last() {
                Some(parent) => Block::child_of(parent, hash(&[i as u8])),
                None => Block::genesis(),
            };
            poa.seal(&mut block, &CancelToken::new()).unwrap();
            chain.push(block);
        }
        chain
    }

    fn authority() -> ProofOfAuthority {
        let keypair = Keypair::generate();
        ProofOfAuthority::new(
            AuthorityConfig::new(keypair.public_key.clone()),
            Arc::new(InMemoryCustody::new(keypair)),
        )
    }

    #[test]
    fn test_poa_weight_is_block_count() {
        let poa = authority();
        let chain = sealed_chain(&poa, 4);
        assert_eq!(chain_weight(&poa, &chain), Some(BigUint::from(4u32)));
    }

    #[test]
    fn test_longest_valid_chain_wins() {
        let poa = authority();
        let short = sealed_chain(&poa, 2);
        let long = sealed_chain(&poa, 3);

        assert_eq!(heavier_chain(&poa, &long, &short), ForkChoice::Left);
        assert_eq!(heavier_chain(&poa, &short, &long), ForkChoice::Right);
        assert_eq!(heavier_chain(&poa, &short, &short), ForkChoice::Tie);
    }

    #[test]
    fn test_invalid_chain_loses() {
        let poa = authority();
        let short = sealed_chain(&poa, 1);
        let mut long = sealed_chain(&poa, 3);
        long[1].header.timestamp += 1;

        assert_eq!(chain_weight(&poa, &long), None);
        assert_eq!(heavier_chain(&poa, &long, &short), ForkChoice::Right);
    }
}
