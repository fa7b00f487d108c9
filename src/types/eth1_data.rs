//! Eth1 deposit contract snapshot

use crate::model::Root;
use crate::ssz_container;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Eth1Data {
    pub deposit_root: Root,
    pub deposit_count: u64,
    pub block_hash: Root,
}

ssz_container!(Eth1Data {
    deposit_root: Root,
    deposit_count: u64,
    block_hash: Root,
});
