//! Vectors of 32-byte roots
//!
//! Each element already is a chunk, so the element encodings are the leaves
//! and no per-element hashing happens. Identical arrays produce identical
//! cache keys, which makes this the cheapest shape to memoize.

use crate::model::Root;
use crate::ssz::codec::packed::pack;
use crate::ssz::{SimpleSerialize, TreeHasher};
use crate::Result;

pub(crate) fn hash_tree_root<T: SimpleSerialize>(
    items: &[T],
    capacity: usize,
    hasher: &TreeHasher<'_>,
) -> Result<Root> {
    hasher.merkleize_packed(&pack(items), capacity)
}
