//! Bounded byte lists with hex text form

use super::List;
use crate::error::{DecodeError, EncodeError};
use crate::model::{hex, Root};
use crate::ssz::{Kind, SimpleSerialize, TreeHasher};
use crate::Result;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Up to `N` opaque bytes (transactions, extra data)
///
/// Same encoding and root as `List<u8, N>`; serializes as `0x` hex.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteList<const N: usize>(List<u8, N>);

impl<const N: usize> ByteList<N> {
    /// Copy `bytes`, rejecting anything longer than `N`
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, EncodeError> {
        List::new(bytes.to_vec()).map(ByteList)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_inner()
    }
}

impl<const N: usize> Deref for ByteList<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> TryFrom<Vec<u8>> for ByteList<N> {
    type Error = EncodeError;

    fn try_from(bytes: Vec<u8>) -> std::result::Result<Self, EncodeError> {
        List::new(bytes).map(ByteList)
    }
}

impl<const N: usize> fmt::Debug for ByteList<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteList({})", hex::encode(self.as_bytes()))
    }
}

impl<const N: usize> SimpleSerialize for ByteList<N> {
    const KIND: Kind = <List<u8, N> as SimpleSerialize>::KIND;

    fn ssz_len(&self) -> usize {
        self.0.ssz_len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes())
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        if bytes.len() > N {
            return Err(DecodeError::LengthExceedsCapacity {
                len: bytes.len(),
                max: N,
            });
        }
        Ok(ByteList(List::new(bytes.to_vec()).map_err(|_| {
            DecodeError::LengthExceedsCapacity {
                len: bytes.len(),
                max: N,
            }
        })?))
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        self.0.hash_tree_root_with(hasher)
    }
}

impl<const N: usize> Serialize for ByteList<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.as_bytes()))
    }
}

impl<'de, const N: usize> Deserialize<'de> for ByteList<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(de::Error::custom)?;
        ByteList::try_from(bytes).map_err(de::Error::custom)
    }
}
