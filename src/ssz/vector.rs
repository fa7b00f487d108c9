//! Fixed-length homogeneous vectors

use crate::error::{DecodeError, EncodeError};
use crate::model::Root;
use crate::ssz::codec::{composite, packed, roots};
use crate::ssz::{Element, Kind, Shape, SimpleSerialize, TreeHasher};
use crate::Result;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// Exactly `N` elements of `T`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vector<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> Vector<T, N> {
    pub fn new(items: Vec<T>) -> std::result::Result<Self, EncodeError> {
        if items.len() != N {
            return Err(EncodeError::VectorLengthMismatch {
                expected: N,
                actual: items.len(),
            });
        }
        Ok(Vector { items })
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: Default + Clone, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Vector {
            items: vec![T::default(); N],
        }
    }
}

impl<T, const N: usize> Deref for Vector<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> DerefMut for Vector<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for Vector<T, N> {
    type Error = EncodeError;

    fn try_from(items: Vec<T>) -> std::result::Result<Self, EncodeError> {
        Vector::new(items)
    }
}

impl<T: SimpleSerialize, const N: usize> SimpleSerialize for Vector<T, N> {
    const KIND: Kind = Kind::Vector {
        elem: Element::of(T::KIND),
        len: N,
    };

    fn ssz_len(&self) -> usize {
        composite::encoded_len(&self.items)
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        composite::encode(&self.items, buf)
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        composite::decode_vector(bytes, N).map(|items| Vector { items })
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        match Self::shape()? {
            Shape::RootsArray => roots::hash_tree_root(&self.items, N, hasher),
            Shape::FixedVectorOfScalars => packed::hash_tree_root(&self.items, N, hasher),
            _ => composite::hash_tree_root(&self.items, N, hasher),
        }
    }
}

impl<T: Serialize, const N: usize> Serialize for Vector<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for Vector<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Vector::new(items).map_err(de::Error::custom)
    }
}
