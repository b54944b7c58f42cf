//! Opaque seal storage.
//!
//! The block layer stores a seal as a fixed-capacity big-endian byte buffer
//! and never interprets it. Consensus variants give the bytes meaning (a
//! signature for PoA, a nonce for PoW).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Capacity of the seal buffer in bytes.
pub const SEAL_DATA_LEN: usize = 96;

/// Seal bytes attached to a block. All zeros means "unsealed".
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SealData(pub [u8; SEAL_DATA_LEN]);

impl SealData {
    /// The unsealed sentinel.
    pub const EMPTY: Self = Self([0u8; SEAL_DATA_LEN]);

    /// Create seal data from raw bytes.
    pub fn from_bytes(bytes: [u8; SEAL_DATA_LEN]) -> Self {
        Self(bytes)
    }

    /// Create seal data from a big-endian slice, left-padding with zeros.
    ///
    /// Returns `None` when the slice does not fit.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > SEAL_DATA_LEN {
            return None;
        }
        let mut arr = [0u8; SEAL_DATA_LEN];
        arr[SEAL_DATA_LEN - bytes.len()..].copy_from_slice(bytes);
        Some(Self(arr))
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; SEAL_DATA_LEN] {
        &self.0
    }

    /// Whether this is the unsealed sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Convert to a fixed-width hex string (192 digits, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex, with or without the `0x` prefix. Shorter inputs are
    /// left-padded; longer ones are rejected.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() > SEAL_DATA_LEN * 2 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let padded = format!("{:0>width$}", s, width = SEAL_DATA_LEN * 2);
        let mut arr = [0u8; SEAL_DATA_LEN];
        hex::decode_to_slice(padded, &mut arr)?;
        Ok(Self(arr))
    }
}

impl Default for SealData {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for SealData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "SealData(unsealed)")
        } else {
            write!(f, "SealData({}...)", &self.to_hex()[..16])
        }
    }
}

impl fmt::Display for SealData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for SealData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SealData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SealData::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unsealed() {
        assert!(SealData::default().is_empty());
        assert_eq!(SealData::default(), SealData::EMPTY);
    }

    #[test]
    fn test_from_be_slice_pads_left() {
        let seal = SealData::from_be_slice(&[0x01, 0x02]).unwrap();
        assert_eq!(seal.0[SEAL_DATA_LEN - 2..], [0x01, 0x02]);
        assert!(seal.0[..SEAL_DATA_LEN - 2].iter().all(|b| *b == 0));
        assert!(!seal.is_empty());
    }

    #[test]
    fn test_from_be_slice_rejects_oversized() {
        assert!(SealData::from_be_slice(&[1u8; SEAL_DATA_LEN + 1]).is_none());
        assert!(SealData::from_be_slice(&[1u8; SEAL_DATA_LEN]).is_some());
    }

    #[test]
    fn test_hex_short_input_is_padded() {
        let seal = SealData::from_hex("0xff").unwrap();
        assert_eq!(seal.0[SEAL_DATA_LEN - 1], 0xff);
        assert_eq!(seal.to_hex().len(), SEAL_DATA_LEN * 2);
    }

    #[test]
    fn test_hex_too_long_rejected() {
        let s = "1".repeat(SEAL_DATA_LEN * 2 + 1);
        assert!(SealData::from_hex(&s).is_err());
    }

    #[test]
    fn test_serde_json_hex_string() {
        let seal = SealData::from_be_slice(&[0xab; 4]).unwrap();
        let json = serde_json::to_string(&seal).unwrap();
        assert_eq!(json, format!("\"{}\"", seal.to_hex()));
        let back: SealData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seal);
    }
}
