//! Validator deposits

use crate::constants::MAX_DEPOSITS_PER_BLOCK;
use crate::model::{BlsPubkey, BlsSignature, Root};
use crate::ssz::List;
use crate::ssz_container;
use serde::{Deserialize, Serialize};

/// A deposit as recorded by the deposit contract
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deposit {
    pub pubkey: BlsPubkey,
    pub credentials: Root,
    /// Amount in gwei
    pub amount: u64,
    pub signature: BlsSignature,
    /// Position in the deposit contract's log
    pub index: u64,
}

ssz_container!(Deposit {
    pubkey: BlsPubkey,
    credentials: Root,
    amount: u64,
    signature: BlsSignature,
    index: u64,
});

pub type Deposits = List<Deposit, MAX_DEPOSITS_PER_BLOCK>;
