//! Collaborator interfaces
//!
//! The engine produces and consumes the values these services move around
//! but does not implement the services themselves. Each trait comes with a
//! small in-memory implementation for tests and local tooling.

mod block_store;
mod broker;
mod deposit;

pub use block_store::{load_block, store_block, BlockStore, MemoryBlockStore};
pub use broker::{
    decode_and_publish, decode_block_and_publish, Event, MemoryPublisher, Publisher, BLOB_BROKER,
    BLOCK_BROKER, GENESIS_BROKER, SLOT_BROKER, STATUS_BROKER, VALIDATOR_UPDATES_BROKER,
};
pub use deposit::{sync_deposits, DepositContract, DepositStore, MemoryDepositStore};
