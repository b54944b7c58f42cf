//! Where the sealing node's private key comes from.
//!
//! A custody hands out an owned [`Keypair`] per signing call. The caller drops
//! it as soon as the signature is produced, so the scalar only lives in
//! memory for the duration of one seal.

use sealchain_core::{CryptoError, Keypair};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when retrieving a private key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("{0}")]
    Unavailable(String),

    #[error("failed to read key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed key file: {0}")]
    Malformed(String),

    #[error("invalid key material: {0}")]
    Crypto(#[from] CryptoError),
}

pub type Result<T> = std::result::Result<T, KeyError>;

/// Source of the authority's signing key.
pub trait KeyCustody: Send + Sync {
    fn keypair(&self) -> Result<Keypair>;
}

/// Custody for nodes that only verify.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCustody;

impl KeyCustody for NoCustody {
    fn keypair(&self) -> Result<Keypair> {
        Err(KeyError::Unavailable(
            "this node holds no authority key".into(),
        ))
    }
}

/// Custody holding a key in process memory (tests, devnets).
#[derive(Debug, Clone)]
pub struct InMemoryCustody {
    keypair: Keypair,
}

impl InMemoryCustody {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

impl KeyCustody for InMemoryCustody {
    fn keypair(&self) -> Result<Keypair> {
        Ok(self.keypair.clone())
    }
}

/// On-disk JSON representation of an authority key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFile {
    pub public_key: String,
    pub private_key: String,
}

impl KeyFile {
    pub fn from_keypair(keypair: &Keypair) -> Self {
        Self {
            public_key: keypair.public_key.to_hex(),
            private_key: hex::encode(keypair.private_key()),
        }
    }

    /// Parse the key, checking the stored public half matches.
    pub fn to_keypair(&self) -> Result<Keypair> {
        let keypair = Keypair::from_private_hex(&self.private_key)?;
        if keypair.public_key.to_hex() != self.public_key.trim_start_matches("0x") {
            return Err(KeyError::Malformed(
                "public key does not match private key".into(),
            ));
        }
        Ok(keypair)
    }
}

/// Custody reading a [`KeyFile`] from disk on every request.
#[derive(Debug, Clone)]
pub struct FileCustody {
    path: PathBuf,
}

impl FileCustody {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `keypair` to `path` as a [`KeyFile`].
    pub fn store(path: impl AsRef<Path>, keypair: &Keypair) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&KeyFile::from_keypair(keypair))
            .map_err(|e| KeyError::Malformed(e.to_string()))?;
        fs::write(path, json).map_err(|source| KeyError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl KeyCustody for FileCustody {
    fn keypair(&self) -> Result<Keypair> {
        let raw = fs::read_to_string(&self.path).map_err(|source| KeyError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: KeyFile =
            serde_json::from_str(&raw).map_err(|e| KeyError::Malformed(e.to_string()))?;
        file.to_keypair()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_custody_is_unavailable() {
        assert!(matches!(NoCustody.keypair(), Err(KeyError::Unavailable(_))));
    }

    #[test]
    fn test_in_memory_custody() {
        let keypair = Keypair::generate();
        let custody = InMemoryCustody::new(keypair.clone());
        assert_eq!(custody.keypair().unwrap().public_key, keypair.public_key);
    }

    #[test]
    fn test_file_custody_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("authority_key.json");
        let keypair = Keypair::generate();

        FileCustody::store(&path, &keypair).unwrap();
        let custody = FileCustody::new(&path);

        assert_eq!(custody.keypair().unwrap().public_key, keypair.public_key);
    }

    #[test]
    fn test_file_custody_missing_file() {
        let dir = TempDir::new().unwrap();
        let custody = FileCustody::new(dir.path().join("missing.json"));
        assert!(matches!(custody.keypair(), Err(KeyError::Io { .. })));
    }

    #[test]
    fn test_file_custody_mismatched_public_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.json");
        let mut file = KeyFile::from_keypair(&Keypair::generate());
        file.public_key = Keypair::generate().public_key.to_hex();
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        assert!(matches!(
            FileCustody::new(&path).keypair(),
            Err(KeyError::Malformed(_))
        ));
    }
}
