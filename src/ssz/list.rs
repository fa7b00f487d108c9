//! Bounded lists

use crate::error::{DecodeError, EncodeError};
use crate::merkle::mix_in_length;
use crate::model::Root;
use crate::ssz::codec::{composite, packed};
use crate::ssz::{Element, Kind, Shape, SimpleSerialize, TreeHasher};
use crate::Result;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// At most `N` elements of `T`
///
/// The capacity is enforced whenever the length can grow, so an over-full
/// list never reaches the encoder or the hasher.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct List<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> List<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new(items: Vec<T>) -> std::result::Result<Self, EncodeError> {
        if items.len() > N {
            return Err(EncodeError::LengthExceedsCapacity {
                len: items.len(),
                max: N,
            });
        }
        Ok(List { items })
    }

    pub fn empty() -> Self {
        List { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) -> std::result::Result<(), EncodeError> {
        if self.items.len() >= N {
            return Err(EncodeError::LengthExceedsCapacity {
                len: self.items.len() + 1,
                max: N,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T, const N: usize> Default for List<T, N> {
    fn default() -> Self {
        List::empty()
    }
}

impl<T, const N: usize> Deref for List<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> DerefMut for List<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for List<T, N> {
    type Error = EncodeError;

    fn try_from(items: Vec<T>) -> std::result::Result<Self, EncodeError> {
        List::new(items)
    }
}

impl<T, const N: usize> IntoIterator for List<T, N> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a List<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: SimpleSerialize, const N: usize> SimpleSerialize for List<T, N> {
    const KIND: Kind = Kind::List {
        elem: Element::of(T::KIND),
        max: N,
    };

    fn ssz_len(&self) -> usize {
        composite::encoded_len(&self.items)
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        composite::encode(&self.items, buf)
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        composite::decode_list(bytes, N).map(|items| List { items })
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        match Self::shape()? {
            Shape::BoundedListOfScalars => {
                let root = packed::hash_tree_root(&self.items, N, hasher)?;
                Ok(mix_in_length(&root, self.items.len()))
            }
            _ => {
                let roots = composite::element_roots(&self.items, hasher)?;
                hasher.merkleize_list_of_composites(&roots, N)
            }
        }
    }
}

impl<T: Serialize, const N: usize> Serialize for List<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for List<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        List::new(items).map_err(de::Error::custom)
    }
}
