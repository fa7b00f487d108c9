//! Slot-keyed storage of encoded blocks

use crate::engine::Engine;
use crate::types::{BeaconBlock, ForkVersion};
use crate::Result;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Persists raw block encodings by slot
///
/// Whatever `set` receives must come back unchanged from `get`.
pub trait BlockStore: Send + Sync {
    fn set(&self, slot: u64, encoded: Bytes) -> Result<()>;

    fn get(&self, slot: u64) -> Result<Option<Bytes>>;
}

#[derive(Default)]
pub struct MemoryBlockStore {
    blocks: RwLock<BTreeMap<u64, Bytes>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlockStore for MemoryBlockStore {
    fn set(&self, slot: u64, encoded: Bytes) -> Result<()> {
        self.blocks.write().insert(slot, encoded);
        Ok(())
    }

    fn get(&self, slot: u64) -> Result<Option<Bytes>> {
        Ok(self.blocks.read().get(&slot).cloned())
    }
}

/// Encode `block` and store it under its slot
pub fn store_block(store: &dyn BlockStore, engine: &Engine, block: &BeaconBlock) -> Result<()> {
    let encoded = engine.marshal(block)?;
    store.set(block.slot, Bytes::from(encoded))
}

/// Load and decode the block at `slot`, tagging it with `version`
pub fn load_block(
    store: &dyn BlockStore,
    engine: &Engine,
    slot: u64,
    version: ForkVersion,
) -> Result<Option<BeaconBlock>> {
    match store.get(slot)? {
        Some(encoded) => {
            let mut block = engine.unmarshal::<BeaconBlock>(&encoded)?;
            block.body_mut().set_version(version);
            Ok(Some(block))
        }
        None => Ok(None),
    }
}
