//! CLI commands module.

use anyhow::Result;
use clap::Subcommand;

mod keygen;
mod seal;
mod verify;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an authority key pair and its public config
    Keygen(keygen::KeygenArgs),
    /// Build a block and seal it with the authority key
    Seal(seal::SealArgs),
    /// Verify a sealed block against the authority config
    Verify(verify::VerifyArgs),
}

/// Run a command. `Ok(false)` means the command ran but the check failed.
pub fn run(cmd: Commands) -> Result<bool> {
    match cmd {
        Commands::Keygen(args) => keygen::run(args).map(|()| true),
        Commands::Seal(args) => seal::run(args).map(|()| true),
        Commands::Verify(args) => verify::run(args),
    }
}
