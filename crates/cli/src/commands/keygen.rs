//! Generate authority key material.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sealchain_consensus::{AuthorityConfig, FileCustody};
use sealchain_core::Keypair;
use std::fs;
use std::path::{Path, PathBuf};

pub const KEY_FILE: &str = "authority_key.json";
pub const CONFIG_FILE: &str = "authority.json";

#[derive(Args)]
pub struct KeygenArgs {
    /// Directory to write the key and config files to
    #[arg(short, long, default_value = "./authority")]
    out_dir: PathBuf,
}

pub fn run(args: KeygenArgs) -> Result<()> {
    println!("{}", "Generating authority key...".bold().cyan());
    println!();

    let keypair = generate(&args.out_dir)?;

    println!(
        "  Public key: {}",
        keypair.public_key.to_hex().bright_yellow()
    );
    println!(
        "{}  Saved private key to: {}",
        "✓".green().bold(),
        args.out_dir.join(KEY_FILE).display().to_string().bright_black()
    );
    println!(
        "{}  Saved authority config to: {}",
        "✓".green().bold(),
        args.out_dir
            .join(CONFIG_FILE)
            .display()
            .to_string()
            .bright_black()
    );
    println!();
    println!(
        "Distribute {} to every node; keep {} on the sealing node only.",
        CONFIG_FILE.bright_cyan(),
        KEY_FILE.bright_cyan()
    );

    Ok(())
}

/// Write a fresh key file and matching authority config into `dir`.
pub fn generate(dir: &Path) -> Result<Keypair> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))?;

    let keypair = Keypair::generate();
    FileCustody::store(dir.join(KEY_FILE), &keypair).context("Failed to write key file")?;
    AuthorityConfig::new(keypair.public_key.clone())
        .save(dir.join(CONFIG_FILE))
        .context("Failed to write authority config")?;

    Ok(keypair)
}
