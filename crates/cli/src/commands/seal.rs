//! Seal a block with the authority key.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sealchain_consensus::{AuthorityConfig, FileCustody, ProofOfAuthority, SealingWorker};
use sealchain_core::{Block, BlockHeader, Hash};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct SealArgs {
    /// Authority key file
    #[arg(short, long, default_value = "./authority/authority_key.json")]
    key: PathBuf,

    /// Authority config file
    #[arg(short, long, default_value = "./authority/authority.json")]
    config: PathBuf,

    /// Block height
    #[arg(long, default_value = "0")]
    height: u64,

    /// Parent block hash (hex)
    #[arg(long)]
    parent: Option<String>,

    /// Body root (hex)
    #[arg(long)]
    body_root: Option<String>,

    /// Unix timestamp (defaults to now)
    #[arg(long)]
    timestamp: Option<u64>,

    /// Where to write the sealed block JSON
    #[arg(short, long, default_value = "./block.json")]
    out: PathBuf,
}

pub fn run(args: SealArgs) -> Result<()> {
    let block = build_block(
        args.height,
        args.parent.as_deref(),
        args.body_root.as_deref(),
        args.timestamp,
    )?;

    println!(
        "{} block at height {}",
        "Sealing".bold().cyan(),
        block.height().to_string().bright_cyan()
    );

    let sealed = seal_block(&args.key, &args.config, block)?;
    fs::write(&args.out, serde_json::to_string_pretty(&sealed)?)
        .with_context(|| format!("Failed to write block: {:?}", args.out))?;

    println!("{}  Block sealed", "✓".green().bold());
    println!("    Hash: {}", sealed.hash().to_hex().bright_yellow());
    println!("    Seal: {}", sealed.seal.to_hex().bright_black());
    println!(
        "    Saved to: {}",
        args.out.display().to_string().bright_black()
    );

    Ok(())
}

/// Build an unsealed block from command-line values.
pub fn build_block(
    height: u64,
    parent: Option<&str>,
    body_root: Option<&str>,
    timestamp: Option<u64>,
) -> Result<Block> {
    let parse = |value: Option<&str>, what: &str| -> Result<Hash> {
        match value {
            Some(s) => Hash::from_hex(s).with_context(|| format!("Invalid {}: {}", what, s)),
            None => Ok(Hash::ZERO),
        }
    };

    Ok(Block::with_timestamp(
        height,
        parse(parent, "parent hash")?,
        parse(body_root, "body root")?,
        timestamp.unwrap_or_else(BlockHeader::current_timestamp),
    ))
}

/// Seal `block` on a worker thread using the key at `key_path`.
pub fn seal_block(key_path: &Path, config_path: &Path, block: Block) -> Result<Block> {
    let config = AuthorityConfig::load(config_path)
        .with_context(|| format!("Failed to load authority config: {:?}", config_path))?;
    let poa = ProofOfAuthority::new(config, Arc::new(FileCustody::new(key_path)));
    let worker = SealingWorker::new(Arc::new(poa));

    let sealed = worker.spawn(block)?.join().context("Sealing failed")?;
    Ok(sealed)
}
