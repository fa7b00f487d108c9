//! Bounded UTF-8 strings, hashed as byte lists

use crate::error::{DecodeError, EncodeError};
use crate::merkle::{chunk_count, mix_in_length};
use crate::model::Root;
use crate::ssz::{Kind, SimpleSerialize, TreeHasher};
use crate::Result;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Text of at most `N` bytes
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SszString<const N: usize>(String);

impl<const N: usize> SszString<N> {
    pub fn new(text: impl Into<String>) -> std::result::Result<Self, EncodeError> {
        let text = text.into();
        if text.len() > N {
            return Err(EncodeError::LengthExceedsCapacity {
                len: text.len(),
                max: N,
            });
        }
        Ok(SszString(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> fmt::Display for SszString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> SimpleSerialize for SszString<N> {
    const KIND: Kind = Kind::Text { max: N };

    fn ssz_len(&self) -> usize {
        self.0.len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.0.as_bytes())
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        if bytes.len() > N {
            return Err(DecodeError::LengthExceedsCapacity {
                len: bytes.len(),
                max: N,
            });
        }
        let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
        Ok(SszString(text.to_owned()))
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        Self::shape()?;
        let root = hasher.merkleize_packed(self.0.as_bytes(), chunk_count(N))?;
        Ok(mix_in_length(&root, self.0.len()))
    }
}

impl<const N: usize> Serialize for SszString<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, const N: usize> Deserialize<'de> for SszString<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        SszString::new(text).map_err(de::Error::custom)
    }
}
