//! Opaque execution transactions

use crate::constants::{MAX_BYTES_PER_TRANSACTION, MAX_TRANSACTIONS_PER_PAYLOAD};
use crate::error::EncodeError;
use crate::ssz::{ByteList, List};

/// One RLP-encoded transaction, never inspected here
pub type Transaction = ByteList<MAX_BYTES_PER_TRANSACTION>;

pub type Transactions = List<Transaction, MAX_TRANSACTIONS_PER_PAYLOAD>;

/// Build a transaction list from raw byte strings
///
/// Every element is copied and checked against the per-transaction limit,
/// and the count against the per-payload limit.
pub fn transactions_from_bytes<B: AsRef<[u8]>>(raw: &[B]) -> Result<Transactions, EncodeError> {
    if raw.len() > MAX_TRANSACTIONS_PER_PAYLOAD {
        return Err(EncodeError::LengthExceedsCapacity {
            len: raw.len(),
            max: MAX_TRANSACTIONS_PER_PAYLOAD,
        });
    }
    let txs = raw
        .iter()
        .map(|tx| Transaction::from_bytes(tx.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    List::new(txs)
}
