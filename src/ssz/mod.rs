//! SimpleSerialize: encoding, decoding and hash tree roots
//!
//! Types implement [`SimpleSerialize`] once; their [`Kind`] descriptor is
//! classified into a [`Shape`] which picks the codec. Records are wired up
//! with [`ssz_container!`](crate::ssz_container).

pub mod codec;
mod byte_list;
mod list;
mod shape;
mod string;
mod vector;

pub use byte_list::ByteList;
pub use codec::container::{field_len, ContainerDecoder, ContainerEncoder};
pub use list::List;
pub use shape::{classify, Element, ElementClass, Kind, Shape};
pub use string::SszString;
pub use vector::Vector;

use crate::cache::{CacheKey, HashCache};
use crate::constants::{BYTES_PER_CHUNK, BYTES_PER_LENGTH_OFFSET};
use crate::error::{ClassificationError, DecodeError};
use crate::merkle::{
    merkleize_chunks, merkleize_list_of_composites, merkleize_packed, mix_in_length,
};
use crate::model::Root;
use crate::Result;

/// A type with a canonical SSZ encoding and hash tree root
pub trait SimpleSerialize: Sized {
    /// Static descriptor used for classification and layout
    const KIND: Kind;

    /// The codec family this type resolves to
    fn shape() -> std::result::Result<Shape, ClassificationError> {
        classify(&Self::KIND)
    }

    fn is_fixed_size() -> bool {
        Self::KIND.is_fixed_size()
    }

    /// Bytes this type occupies in its parent's fixed region
    fn ssz_fixed_len() -> usize {
        Self::KIND.fixed_size().unwrap_or(BYTES_PER_LENGTH_OFFSET)
    }

    /// Exact encoded length of this value
    fn ssz_len(&self) -> usize;

    /// Append the encoding of this value to `buf`
    fn ssz_append(&self, buf: &mut Vec<u8>);

    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.ssz_len());
        self.ssz_append(&mut buf);
        buf
    }

    /// Decode a value that spans all of `bytes`
    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError>;

    /// Hash tree root, consulting the hasher's cache where one is attached
    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root>;

    /// Hash tree root without any cache
    fn hash_tree_root(&self) -> Result<Root> {
        self.hash_tree_root_with(&TreeHasher::uncached())
    }
}

/// Merkleization entry point threaded through every hashing call
///
/// Holds an optional borrowed cache; copying it is free.
#[derive(Clone, Copy)]
pub struct TreeHasher<'a> {
    cache: Option<&'a dyn HashCache>,
}

impl TreeHasher<'static> {
    pub const fn uncached() -> Self {
        TreeHasher { cache: None }
    }
}

impl<'a> TreeHasher<'a> {
    pub fn with_cache(cache: &'a dyn HashCache) -> Self {
        TreeHasher { cache: Some(cache) }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Merkleize chunks under `limit`
    ///
    /// Single-chunk inputs are their own root and skip the cache.
    pub fn merkleize(&self, chunks: &[Root], limit: usize) -> Result<Root> {
        match self.cache {
            Some(cache) if chunks.len() > 1 => {
                let key = CacheKey::for_chunks(chunks, limit);
                if let Some(root) = cache.get(&key) {
                    return Ok(root);
                }
                let root = merkleize_chunks(chunks, limit)?;
                cache.put(key, root);
                Ok(root)
            }
            _ => merkleize_chunks(chunks, limit),
        }
    }

    /// Merkleize the element roots of a list bounded by `max_capacity`, then mix in the count
    pub fn merkleize_list_of_composites(
        &self,
        element_roots: &[Root],
        max_capacity: usize,
    ) -> Result<Root> {
        if self.cache.is_none() {
            return merkleize_list_of_composites(element_roots, max_capacity);
        }
        let root = self.merkleize(element_roots, max_capacity)?;
        Ok(mix_in_length(&root, element_roots.len()))
    }

    /// Pack `bytes` into chunks and merkleize them under `limit`
    pub fn merkleize_packed(&self, bytes: &[u8], limit: usize) -> Result<Root> {
        match self.cache {
            Some(cache) if bytes.len() > BYTES_PER_CHUNK => {
                let key = CacheKey::for_packed(bytes, limit);
                if let Some(root) = cache.get(&key) {
                    return Ok(root);
                }
                let root = merkleize_packed(bytes, limit)?;
                cache.put(key, root);
                Ok(root)
            }
            _ => merkleize_packed(bytes, limit),
        }
    }
}

impl std::fmt::Debug for TreeHasher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeHasher")
            .field("cached", &self.is_cached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RootCache;

    #[test]
    fn test_cached_and_uncached_agree() {
        let cache = RootCache::new(16);
        let hasher = TreeHasher::with_cache(&cache);
        let chunks = vec![Root::from_bytes([7u8; 32]); 3];

        let first = hasher.merkleize(&chunks, 4).unwrap();
        let second = hasher.merkleize(&chunks, 4).unwrap();
        let plain = TreeHasher::uncached().merkleize(&chunks, 4).unwrap();

        assert_eq!(first, plain);
        assert_eq!(second, plain);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_single_chunk_bypasses_cache() {
        let cache = RootCache::new(16);
        let hasher = TreeHasher::with_cache(&cache);
        hasher.merkleize_packed(&[1, 2, 3], 1).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 0);
    }
}
