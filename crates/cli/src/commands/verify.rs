//! Verify a sealed block.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sealchain_consensus::{AuthorityConfig, ConsensusSealer, InvalidSeal, ProofOfAuthority};
use sealchain_core::Block;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct VerifyArgs {
    /// Authority config file
    #[arg(short, long, default_value = "./authority/authority.json")]
    config: PathBuf,

    /// Sealed block JSON
    #[arg(short, long, default_value = "./block.json")]
    block: PathBuf,
}

pub fn run(args: VerifyArgs) -> Result<bool> {
    let (poa, block) = load(&args.config, &args.block)?;

    println!("{}", "Block:".bold().cyan());
    println!("  Height: {}", block.height().to_string().bright_cyan());
    println!("  Hash:   {}", block.hash().to_hex().bright_yellow());
    println!("  Weight: {}", poa.get_weight(&block));
    println!("  Target: {}", poa.calculate_appropriate_target());
    println!();

    match verify_block(&poa, &block) {
        Ok(()) => {
            println!("{}  Seal is {}", "✓".green().bold(), "VALID".green().bold());
            Ok(true)
        }
        Err(reason) => {
            println!(
                "{}  Seal is {}: {}",
                "✗".red().bold(),
                "INVALID".red().bold(),
                reason
            );
            Ok(false)
        }
    }
}

fn load(config_path: &Path, block_path: &Path) -> Result<(ProofOfAuthority, Block)> {
    let config = AuthorityConfig::load(config_path)
        .with_context(|| format!("Failed to load authority config: {:?}", config_path))?;
    let raw = fs::read_to_string(block_path)
        .with_context(|| format!("Failed to read block: {:?}", block_path))?;
    let block: Block = serde_json::from_str(&raw).context("Failed to parse block JSON")?;
    Ok((ProofOfAuthority::verifier(config), block))
}

/// Check the block's seal, returning the rejection reason if any.
pub fn verify_block(poa: &ProofOfAuthority, block: &Block) -> Result<(), InvalidSeal> {
    poa.check_seal(block)
}
