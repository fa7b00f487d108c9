//! Fixed-width byte arrays (addresses, public keys, signatures, uint256)

use crate::error::DecodeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A byte array of exactly `N` bytes
///
/// Decoding never truncates or pads: any other input width is a
/// [`DecodeError::FixedWidthMismatch`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

/// 20-byte execution layer address
pub type ExecutionAddress = FixedBytes<20>;

/// 48-byte BLS public key
pub type BlsPubkey = FixedBytes<48>;

/// 96-byte BLS signature
pub type BlsSignature = FixedBytes<96>;

/// 48-byte KZG commitment
pub type KzgCommitment = FixedBytes<48>;

/// 256-bit unsigned integer kept in its little-endian wire form
pub type U256Le = FixedBytes<32>;

impl<const N: usize> FixedBytes<N> {
    /// All-zero value
    pub const ZERO: Self = FixedBytes([0u8; N]);

    /// Copy from a slice that must be exactly `N` bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let arr: [u8; N] = bytes
            .try_into()
            .map_err(|_| DecodeError::FixedWidthMismatch {
                expected: N,
                actual: bytes.len(),
            })?;
        Ok(FixedBytes(arr))
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        super::hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        super::hex::decode_fixed::<N>(s).map(FixedBytes)
    }
}

impl U256Le {
    /// Widen a `u64` into the little-endian uint256 form
    pub fn from_u64(value: u64) -> Self {
        let mut out = [0u8; 32];
        out[..8].copy_from_slice(&value.to_le_bytes());
        FixedBytes(out)
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedBytes(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_is_enforced() {
        assert!(ExecutionAddress::from_slice(&[1u8; 20]).is_ok());
        assert_eq!(
            ExecutionAddress::from_slice(&[1u8; 19]),
            Err(DecodeError::FixedWidthMismatch {
                expected: 20,
                actual: 19
            })
        );
        assert!(ExecutionAddress::from_slice(&[1u8; 21]).is_err());
    }

    #[test]
    fn test_u256_from_u64() {
        let v = U256Le::from_u64(0x0102);
        assert_eq!(v.0[0], 0x02);
        assert_eq!(v.0[1], 0x01);
        assert!(v.0[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_serde_roundtrip_wide_array() {
        let sig = BlsSignature::from([9u8; 96]);
        let json = serde_json::to_string(&sig).unwrap();
        let back: BlsSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }
}
