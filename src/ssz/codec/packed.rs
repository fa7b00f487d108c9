//! Vectors and lists of scalars
//!
//! Elements are concatenated little-endian and packed into shared chunks.

use crate::merkle::chunk_count;
use crate::model::Root;
use crate::ssz::{SimpleSerialize, TreeHasher};
use crate::Result;

/// Concatenated encodings of fixed-width scalars
pub(crate) fn pack<T: SimpleSerialize>(items: &[T]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(items.len() * T::ssz_fixed_len());
    for item in items {
        item.ssz_append(&mut bytes);
    }
    bytes
}

/// Root of `items` in a tree sized for `capacity` elements
pub(crate) fn hash_tree_root<T: SimpleSerialize>(
    items: &[T],
    capacity: usize,
    hasher: &TreeHasher<'_>,
) -> Result<Root> {
    let limit = chunk_count(capacity.saturating_mul(T::ssz_fixed_len()));
    hasher.merkleize_packed(&pack(items), limit)
}
