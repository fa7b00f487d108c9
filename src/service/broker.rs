//! Event fan-out of decoded records

use crate::engine::Engine;
use crate::ssz::SimpleSerialize;
use crate::types::{BeaconBlock, ForkVersion};
use crate::Result;
use parking_lot::Mutex;
use tracing::debug;

pub const BLOB_BROKER: &str = "blob-broker";
pub const BLOCK_BROKER: &str = "blk-broker";
pub const GENESIS_BROKER: &str = "genesis-broker";
pub const SLOT_BROKER: &str = "slot-broker";
pub const STATUS_BROKER: &str = "status-broker";
pub const VALIDATOR_UPDATES_BROKER: &str = "validator-updates-broker";

/// A value published on a named topic
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event<T> {
    pub topic: &'static str,
    pub data: T,
}

impl<T> Event<T> {
    pub fn new(topic: &'static str, data: T) -> Self {
        Event { topic, data }
    }
}

/// Receives fully decoded values for delivery to subscribers
pub trait Publisher<T>: Send + Sync {
    fn publish(&self, event: Event<T>) -> Result<()>;
}

/// Publisher that keeps every event in memory
pub struct MemoryPublisher<T> {
    events: Mutex<Vec<Event<T>>>,
}

impl<T> MemoryPublisher<T> {
    pub fn new() -> Self {
        MemoryPublisher {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Remove and return everything published so far
    pub fn drain(&self) -> Vec<Event<T>> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for MemoryPublisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Publisher<T> for MemoryPublisher<T> {
    fn publish(&self, event: Event<T>) -> Result<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Decode `bytes` and publish the value; malformed input is never published
pub fn decode_and_publish<T: SimpleSerialize>(
    engine: &Engine,
    publisher: &dyn Publisher<T>,
    topic: &'static str,
    bytes: &[u8],
) -> Result<()> {
    let value = engine.unmarshal::<T>(bytes)?;
    debug!(topic, len = bytes.len(), "publishing decoded value");
    publisher.publish(Event::new(topic, value))
}

/// Decode a block, tag it with `version` and publish it on the block topic
pub fn decode_block_and_publish(
    engine: &Engine,
    publisher: &dyn Publisher<BeaconBlock>,
    bytes: &[u8],
    version: ForkVersion,
) -> Result<()> {
    let mut block: BeaconBlock = engine.unmarshal(bytes)?;
    block.body_mut().set_version(version);
    debug!(slot = block.slot, %version, "publishing decoded block");
    publisher.publish(Event::new(BLOCK_BROKER, block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Root;
    use crate::types::Withdrawal;

    #[test]
    fn test_valid_block_is_published() {
        let engine = Engine::uncached();
        let publisher = MemoryPublisher::<BeaconBlock>::new();
        let block = BeaconBlock::new_with_version(3, 1, Root::ZERO, ForkVersion::DENEB);
        let bytes = engine.marshal(&block).unwrap();

        decode_block_and_publish(&engine, &publisher, &bytes, ForkVersion::DENEB).unwrap();

        let events = publisher.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].topic, "blk-broker");
        assert_eq!(events[0].data.version(), ForkVersion::DENEB);
        assert_eq!(events[0].data, block);
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_untagged_decode_publishes_record() {
        let engine = Engine::uncached();
        let publisher = MemoryPublisher::<Withdrawal>::new();
        let withdrawal = Withdrawal {
            amount: 5,
            ..Withdrawal::default()
        };

        decode_and_publish(&engine, &publisher, VALIDATOR_UPDATES_BROKER, &withdrawal.as_ssz_bytes())
            .unwrap();

        let events = publisher.drain();
        assert_eq!(events[0].topic, VALIDATOR_UPDATES_BROKER);
        assert_eq!(events[0].data, withdrawal);
    }

    #[test]
    fn test_malformed_block_is_dropped() {
        let engine = Engine::uncached();
        let publisher = MemoryPublisher::<BeaconBlock>::new();
        assert!(decode_block_and_publish(&engine, &publisher, &[0u8; 10], ForkVersion::DENEB).is_err());
        assert!(decode_and_publish(&engine, &publisher, BLOCK_BROKER, &[0u8; 10]).is_err());
        assert!(publisher.is_empty());
    }
}
