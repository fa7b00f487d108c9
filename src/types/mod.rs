//! Consensus records
//!
//! Each record is a plain struct with public fields whose SSZ behaviour is
//! declared with `ssz_container!` in field order.

mod block;
mod body;
mod deposit;
mod eth1_data;
mod execution_payload;
mod header;
mod transaction;
mod withdrawal;

pub use block::BeaconBlock;
pub use body::{
    kzg_commitment_position, BeaconBlockBody, BlobKzgCommitments, ForkVersion,
    BLOB_KZG_COMMITMENTS_INDEX,
};
pub use deposit::{Deposit, Deposits};
pub use eth1_data::Eth1Data;
pub use execution_payload::{ExecutionPayload, ExtraData, LogsBloom};
pub use header::BeaconBlockHeader;
pub use transaction::{transactions_from_bytes, Transaction, Transactions};
pub use withdrawal::{Withdrawal, Withdrawals};
