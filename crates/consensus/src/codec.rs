//! Conversion between signatures, seal bytes and seal integers.
//!
//! On the wire and at the consensus boundary a seal is an arbitrary-precision
//! non-negative integer. A PoA seal is the big-endian reading of a
//! fixed-width signature; decoding left-pads back to [`SIGNATURE_LEN`] bytes.
//! Zero is reserved for "no seal".

use num_bigint::BigUint;
use sealchain_core::{SealData, Signature, SEAL_DATA_LEN, SIGNATURE_LEN};
use thiserror::Error;

/// Errors that can occur while decoding a seal integer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("seal integer needs {len} bytes, at most {max} allowed")]
    Overflow { len: usize, max: usize },

    #[error("zero seal is the unsealed sentinel")]
    Sentinel,
}

pub type Result<T> = std::result::Result<T, EncodingError>;

/// Interpret signature bytes as a big-endian unsigned integer.
pub fn encode_signature(signature: &[u8]) -> BigUint {
    BigUint::from_bytes_be(signature)
}

/// Render a seal integer as a fixed-width signature.
pub fn decode_signature(value: &BigUint) -> Result<Signature> {
    let bytes = to_fixed_be::<SIGNATURE_LEN>(value)?;
    Ok(Signature::from_bytes(bytes))
}

/// Read stored seal bytes as an integer.
pub fn seal_to_integer(seal: &SealData) -> BigUint {
    BigUint::from_bytes_be(seal.as_bytes())
}

/// Store a seal integer as seal bytes.
pub fn integer_to_seal(value: &BigUint) -> Result<SealData> {
    Ok(SealData::from_bytes(to_fixed_be::<SEAL_DATA_LEN>(value)?))
}

fn to_fixed_be<const N: usize>(value: &BigUint) -> Result<[u8; N]> {
    if value.bits() == 0 {
        return Err(EncodingError::Sentinel);
    }
    let natural = value.to_bytes_be();
    if natural.len() > N {
        return Err(EncodingError::Overflow {
            len: natural.len(),
            max: N,
        });
    }
    let mut out = [0u8; N];
    out[N - natural.len()..].copy_from_slice(&natural);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_signature() -> [u8; SIGNATURE_LEN] {
        let mut bytes = [0u8; SIGNATURE_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        bytes
    }

    #[test]
    fn test_roundtrip_full_width() {
        let sig = sample_signature();
        let decoded = decode_signature(&encode_signature(&sig)).unwrap();
        assert_eq!(decoded.as_bytes(), &sig);
    }

    #[test]
    fn test_roundtrip_leading_zeros() {
        let mut sig = sample_signature();
        sig[..5].fill(0);
        let value = encode_signature(&sig);
        assert!(value.to_bytes_be().len() < SIGNATURE_LEN);

        let decoded = decode_signature(&value).unwrap();
        assert_eq!(decoded.as_bytes(), &sig);
    }

    #[test]
    fn test_hex_padding_matches_byte_padding() {
        let value = BigUint::from(0xabcdu32);
        let decoded = decode_signature(&value).unwrap();
        let padded_hex = format!("{:0>192}", value.to_str_radix(16));
        assert_eq!(decoded.to_hex(), padded_hex);
    }

    #[test]
    fn test_overflow_rejected() {
        let value = BigUint::from_bytes_be(&[1u8; SIGNATURE_LEN + 1]);
        assert_eq!(
            decode_signature(&value),
            Err(EncodingError::Overflow {
                len: SIGNATURE_LEN + 1,
                max: SIGNATURE_LEN
            })
        );
        assert!(integer_to_seal(&value).is_err());
    }

    #[test]
    fn test_zero_is_sentinel() {
        assert_eq!(
            decode_signature(&BigUint::default()),
            Err(EncodingError::Sentinel)
        );
        assert_eq!(seal_to_integer(&SealData::EMPTY), BigUint::default());
    }

    #[test]
    fn test_seal_integer_roundtrip() {
        let value = BigUint::from(123_456_789u64);
        let seal = integer_to_seal(&value).unwrap();
        assert_eq!(seal_to_integer(&seal), value);
    }
}
