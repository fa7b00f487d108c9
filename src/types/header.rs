//! Beacon block header

use crate::model::Root;
use crate::ssz_container;
use serde::{Deserialize, Serialize};

/// Block summary whose `body_root` commits to the full body
///
/// Headers are derived from a block (see `BeaconBlock::header`) rather than
/// maintained alongside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeaconBlockHeader {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Root,
    pub state_root: Root,
    pub body_root: Root,
}

ssz_container!(BeaconBlockHeader {
    slot: u64,
    proposer_index: u64,
    parent_root: Root,
    state_root: Root,
    body_root: Root,
});

impl BeaconBlockHeader {
    pub fn new(
        slot: u64,
        proposer_index: u64,
        parent_root: Root,
        state_root: Root,
        body_root: Root,
    ) -> Self {
        BeaconBlockHeader {
            slot,
            proposer_index,
            parent_root,
            state_root,
            body_root,
        }
    }
}
