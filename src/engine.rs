//! Engine facade
//!
//! Owns the optional shared hash cache and routes encode, decode and hash
//! requests through it. Cloning an engine shares its cache.

use crate::cache::{CacheStats, HashCache, RootCache};
use crate::config::EngineConfig;
use crate::error::EncodeError;
use crate::model::Root;
use crate::ssz::{SimpleSerialize, TreeHasher};
use crate::types::{BeaconBlock, BeaconBlockHeader};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone, Default)]
pub struct Engine {
    cache: Option<Arc<dyn HashCache>>,
}

impl Engine {
    /// Build an engine from configuration
    pub fn new(config: &EngineConfig) -> Self {
        let cache = config.hash_cache.enabled.then(|| {
            Arc::new(RootCache::new(config.hash_cache.capacity)) as Arc<dyn HashCache>
        });
        info!(
            cache_enabled = config.hash_cache.enabled,
            capacity = config.hash_cache.capacity,
            "ssz engine ready"
        );
        Engine { cache }
    }

    /// Build an engine around an existing cache, possibly shared with others
    pub fn with_cache(cache: Arc<dyn HashCache>) -> Self {
        info!(cache_enabled = true, "ssz engine ready");
        Engine { cache: Some(cache) }
    }

    pub fn uncached() -> Self {
        Engine { cache: None }
    }

    /// Hasher bound to this engine's cache
    pub fn hasher(&self) -> TreeHasher<'_> {
        match &self.cache {
            Some(cache) => TreeHasher::with_cache(cache.as_ref()),
            None => TreeHasher::uncached(),
        }
    }

    pub fn hash_tree_root<T: SimpleSerialize>(&self, value: &T) -> Result<Root> {
        value.hash_tree_root_with(&self.hasher())
    }

    /// Encode `value`, checking the output against its declared length
    pub fn marshal<T: SimpleSerialize>(&self, value: &T) -> Result<Vec<u8>> {
        let expected = value.ssz_len();
        let bytes = value.as_ssz_bytes();
        if bytes.len() != expected {
            return Err(EncodeError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            }
            .into());
        }
        Ok(bytes)
    }

    pub fn unmarshal<T: SimpleSerialize>(&self, bytes: &[u8]) -> Result<T> {
        T::from_ssz_bytes(bytes).map_err(|err| {
            debug!(
                len = bytes.len(),
                kind = std::any::type_name::<T>(),
                %err,
                "rejected ssz input"
            );
            err.into()
        })
    }

    /// Derive a block header through this engine's cache
    pub fn block_header(&self, block: &BeaconBlock) -> Result<BeaconBlockHeader> {
        block.header_with(&self.hasher())
    }

    /// Cache counters, or `None` when caching is off
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("cache", &self.cache_stats())
            .finish()
    }
}
