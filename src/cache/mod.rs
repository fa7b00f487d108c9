//! Memoization of hash tree roots
//!
//! The cache is an optimization only: a miss (or a disabled cache) always
//! falls back to full merkleization, and nothing is ever invalidated
//! explicitly. Entries leave only through bounded-capacity eviction.

mod root_cache;

pub use root_cache::RootCache;

use crate::model::Root;
use serde::Serialize;
use std::fmt;

/// Content key for a merkleization: a BLAKE3 digest of the leaf limit and leaf bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    /// Key for merkleizing packed `bytes` under a `limit` of chunks
    pub fn for_packed(bytes: &[u8], limit: usize) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(limit as u64).to_le_bytes());
        hasher.update(bytes);
        CacheKey(*hasher.finalize().as_bytes())
    }

    /// Key for merkleizing a sequence of chunks under a `limit`
    pub fn for_chunks(chunks: &[Root], limit: usize) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(limit as u64).to_le_bytes());
        for chunk in chunks {
            hasher.update(chunk.as_bytes());
        }
        CacheKey(*hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", hex::encode(&self.0[..4]))
    }
}

/// Counters describing cache behavior since construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

/// A bounded, thread-safe key → root store
///
/// Implementations must never block on I/O; failures inside the store are
/// reported as misses.
pub trait HashCache: Send + Sync {
    /// Look up a previously computed root
    fn get(&self, key: &CacheKey) -> Option<Root>;

    /// Record a computed root, possibly evicting another entry
    fn put(&self, key: CacheKey, root: Root);

    /// Number of entries currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss/eviction counters
    fn stats(&self) -> CacheStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_depends_on_limit() {
        let chunks = [Root::from_bytes([1u8; 32])];
        assert_ne!(
            CacheKey::for_chunks(&chunks, 1),
            CacheKey::for_chunks(&chunks, 2)
        );
    }

    #[test]
    fn test_chunk_and_packed_keys_agree_on_aligned_input() {
        let chunks = [Root::from_bytes([1u8; 32]), Root::from_bytes([2u8; 32])];
        let mut bytes = vec![1u8; 32];
        bytes.extend_from_slice(&[2u8; 32]);
        assert_eq!(
            CacheKey::for_chunks(&chunks, 4),
            CacheKey::for_packed(&bytes, 4)
        );
    }
}
