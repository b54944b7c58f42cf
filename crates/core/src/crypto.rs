//! ECDSA (NIST P-384) key material for block authorities.
//!
//! Signatures are fixed-width `r || s` encodings of [`SIGNATURE_LEN`] bytes,
//! produced with SHA-384 and RFC 6979 deterministic nonces.

use p384::ecdsa::signature::{Signer, Verifier};
use p384::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of a fixed-width P-384 signature.
pub const SIGNATURE_LEN: usize = 96;

/// Length of a P-384 private scalar.
pub const PRIVATE_KEY_LEN: usize = 48;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid signature encoding")]
    InvalidSignature,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("signing failed")]
    SigningFailed,
    #[error("signature verification failed")]
    VerificationFailed,
}

/// A fixed-width ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Create a signature from raw bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn to_ecdsa(self) -> Result<EcdsaSignature, CryptoError> {
        EcdsaSignature::from_slice(&self.0).map_err(|_| CryptoError::InvalidSignature)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; SIGNATURE_LEN])
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// An authority verification key.
///
/// Serialized as the hex of its compressed SEC1 encoding.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "public_key_serde")] pub VerifyingKey);

mod public_key_serde {
    use p384::ecdsa::VerifyingKey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(key: &VerifyingKey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(key.to_encoded_point(true).as_bytes()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<VerifyingKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(&s))
            .map_err(serde::de::Error::custom)?;
        VerifyingKey::from_sec1_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl PublicKey {
    /// Parse a SEC1-encoded (compressed or uncompressed) public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Parse from a hex string (with or without 0x prefix).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| CryptoError::InvalidPublicKey)?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Compressed SEC1 encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Hex of the compressed SEC1 encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Verify a signature over `message` against this public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        let sig = signature.to_ecdsa()?;
        self.0
            .verify(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// An authority signing key together with its public half.
///
/// The private scalar is zeroized when the keypair is dropped.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
    pub public_key: PublicKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    /// Create a keypair from a private scalar (48 bytes, big-endian).
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Parse a private key from hex (with or without 0x prefix).
    pub fn from_private_hex(s: &str) -> Result<Self, CryptoError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Self::from_private_key(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey(VerifyingKey::from(&signing_key));
        Self {
            signing_key,
            public_key,
        }
    }

    /// Get the private key bytes.
    pub fn private_key(&self) -> [u8; PRIVATE_KEY_LEN] {
        let mut out = [0u8; PRIVATE_KEY_LEN];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, CryptoError> {
        let sig: EcdsaSignature = self
            .signing_key
            .try_sign(message)
            .map_err(|_| CryptoError::SigningFailed)?;
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&sig.to_bytes());
        Ok(Signature(out))
    }

    /// Verify a signature against our public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        self.public_key.verify(message, signature)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let kp = Keypair::generate();
        let sig = kp.sign(b"hello world").unwrap();
        assert_eq!(sig.as_bytes().len(), SIGNATURE_LEN);
        assert!(kp.verify(b"hello world", &sig).is_ok());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let kp = Keypair::generate();
        assert_eq!(kp.sign(b"header").unwrap(), kp.sign(b"header").unwrap());
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = Keypair::generate();
        let sig = kp.sign(b"hello").unwrap();
        assert!(matches!(
            kp.verify(b"world", &sig),
            Err(CryptoError::VerificationFailed)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        let sig = kp1.sign(b"hello").unwrap();
        assert!(kp2.verify(b"hello", &sig).is_err());
    }

    #[test]
    fn test_zero_signature_is_malformed() {
        let kp = Keypair::generate();
        assert!(matches!(
            kp.verify(b"hello", &Signature::default()),
            Err(CryptoError::InvalidSignature)
        ));
    }

    #[test]
    fn test_keypair_from_private_key() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::from_private_key(&kp1.private_key()).unwrap();
        assert_eq!(kp1.public_key, kp2.public_key);

        let kp3 = Keypair::from_private_hex(&hex::encode(kp1.private_key())).unwrap();
        assert_eq!(kp1.public_key, kp3.public_key);
    }

    #[test]
    fn test_invalid_private_key_rejected() {
        assert!(matches!(
            Keypair::from_private_key(&[0u8; PRIVATE_KEY_LEN]),
            Err(CryptoError::InvalidPrivateKey)
        ));
        assert!(Keypair::from_private_hex("not hex").is_err());
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let kp = Keypair::generate();
        let parsed = PublicKey::from_hex(&kp.public_key.to_string()).unwrap();
        assert_eq!(parsed, kp.public_key);
        assert!(PublicKey::from_hex("0x1234").is_err());
    }

    #[test]
    fn test_public_key_serde_json() {
        let kp = Keypair::generate();
        let json = serde_json::to_string(&kp.public_key).unwrap();
        assert_eq!(json, format!("\"{}\"", kp.public_key.to_hex()));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kp.public_key);
    }

    #[test]
    fn test_keypair_debug_hides_private_key() {
        let kp = Keypair::generate();
        let debug = format!("{:?}", kp);
        assert!(!debug.contains(&hex::encode(kp.private_key())));
    }
}
