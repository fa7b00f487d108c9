//! Deposit contract and deposit queue interfaces

use crate::types::Deposit;
use crate::{Error, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::debug;

/// Source of deposits observed in execution blocks
pub trait DepositContract: Send + Sync {
    fn deposits(&self, block_number: u64) -> Result<Vec<Deposit>>;
}

/// Queue of deposits waiting to be included in beacon blocks
pub trait DepositStore: Send + Sync {
    /// Drop every deposit with an index below `index`
    fn prune_to_index(&self, index: u64) -> Result<()>;

    fn enqueue_deposits(&self, deposits: &[Deposit]) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryDepositStore {
    queue: Mutex<VecDeque<Deposit>>,
}

impl MemoryDepositStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<Deposit> {
        self.queue.lock().iter().cloned().collect()
    }
}

impl DepositStore for MemoryDepositStore {
    fn prune_to_index(&self, index: u64) -> Result<()> {
        let mut queue = self.queue.lock();
        while queue.front().is_some_and(|d| d.index < index) {
            queue.pop_front();
        }
        Ok(())
    }

    fn enqueue_deposits(&self, deposits: &[Deposit]) -> Result<()> {
        let mut queue = self.queue.lock();
        if let (Some(last), Some(first)) = (queue.back(), deposits.first()) {
            if first.index <= last.index {
                return Err(Error::Collaborator(format!(
                    "deposit {} enqueued after {}",
                    first.index, last.index
                )));
            }
        }
        queue.extend(deposits.iter().cloned());
        Ok(())
    }
}

/// Copy the deposits of one execution block into the store
pub fn sync_deposits(
    contract: &dyn DepositContract,
    store: &dyn DepositStore,
    block_number: u64,
) -> Result<usize> {
    let deposits = contract.deposits(block_number)?;
    store.enqueue_deposits(&deposits)?;
    debug!(block_number, count = deposits.len(), "enqueued deposits");
    Ok(deposits.len())
}
