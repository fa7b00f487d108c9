//! Deneb execution payload

use super::transaction::Transactions;
use super::withdrawal::Withdrawals;
use crate::constants::{BYTES_PER_LOGS_BLOOM, MAX_EXTRA_DATA_BYTES};
use crate::model::{ExecutionAddress, FixedBytes, Root, U256Le};
use crate::ssz::ByteList;
use crate::ssz_container;
use serde::{Deserialize, Serialize};

pub type LogsBloom = FixedBytes<BYTES_PER_LOGS_BLOOM>;

pub type ExtraData = ByteList<MAX_EXTRA_DATA_BYTES>;

/// The execution block embedded in a beacon block body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPayload {
    pub parent_hash: Root,
    pub fee_recipient: ExecutionAddress,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256Le,
    pub block_hash: Root,
    pub transactions: Transactions,
    pub withdrawals: Withdrawals,
    pub blob_gas_used: u64,
    pub excess_blob_gas: u64,
}

ssz_container!(ExecutionPayload {
    parent_hash: Root,
    fee_recipient: ExecutionAddress,
    state_root: Root,
    receipts_root: Root,
    logs_bloom: LogsBloom,
    prev_randao: Root,
    number: u64,
    gas_limit: u64,
    gas_used: u64,
    timestamp: u64,
    extra_data: ExtraData,
    base_fee_per_gas: U256Le,
    block_hash: Root,
    transactions: Transactions,
    withdrawals: Withdrawals,
    blob_gas_used: u64,
    excess_blob_gas: u64,
});
