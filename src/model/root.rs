//! 32-byte Merkle root type

use crate::error::DecodeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 32-byte hash tree root, also the unit chunk of every Merkle tree
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Root([u8; 32]);

impl Root {
    /// The all-zero root (an empty chunk)
    pub const ZERO: Root = Root([0u8; 32]);

    /// Create a root from raw bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Root(bytes)
    }

    /// Create a root from a slice that must be exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| DecodeError::FixedWidthMismatch {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Root(arr))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to 0x-prefixed hex string
    pub fn to_hex(&self) -> String {
        super::hex::encode(&self.0)
    }

    /// Parse from 0x-prefixed hex string
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        super::hex::decode_fixed::<32>(s).map(Root)
    }

    /// Get a short prefix for display (first 4 bytes)
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Check if this is the zero root
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root({})", self.short())
    }
}

impl Default for Root {
    fn default() -> Self {
        Root::ZERO
    }
}

impl AsRef<[u8]> for Root {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Root {
    fn from(bytes: [u8; 32]) -> Self {
        Root(bytes)
    }
}

impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Root {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Root::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
