//! Property tests for encoding and hashing laws
//!
//! Run with:
//! ```bash
//! cargo test --test ssz_properties
//! ```

use std::sync::Arc;

use beacon_ssz::constants::MAX_TRANSACTIONS_PER_PAYLOAD;
use beacon_ssz::merkle::{chunk_count, chunk_depth, merkleize_packed, mix_in_length, zero_hash};
use beacon_ssz::model::{ExecutionAddress, FixedBytes, Root, U256Le};
use beacon_ssz::ssz::{ByteList, List, Vector};
use beacon_ssz::types::{
    transactions_from_bytes, BeaconBlock, BlobKzgCommitments, Deposit, Deposits, Eth1Data,
    ExecutionPayload, ExtraData, ForkVersion, Transactions, Withdrawal, Withdrawals,
};
use beacon_ssz::{DecodeError, Engine, HashCache, RootCache, SimpleSerialize};
use proptest::collection::vec;
use proptest::prelude::*;

fn withdrawal_strategy() -> impl Strategy<Value = Withdrawal> {
    (any::<u64>(), any::<u64>(), any::<[u8; 20]>(), any::<u64>()).prop_map(
        |(index, validator_index, address, amount)| Withdrawal {
            index,
            validator_index,
            address: ExecutionAddress::from(address),
            amount,
        },
    )
}

fn root_strategy() -> impl Strategy<Value = Root> {
    any::<[u8; 32]>().prop_map(Root::from_bytes)
}

fn fixed_bytes<const N: usize>() -> impl Strategy<Value = FixedBytes<N>> {
    vec(any::<u8>(), N).prop_map(|bytes| FixedBytes::from_slice(&bytes).unwrap())
}

fn eth1_data_strategy() -> impl Strategy<Value = Eth1Data> {
    (root_strategy(), any::<u64>(), root_strategy()).prop_map(
        |(deposit_root, deposit_count, block_hash)| Eth1Data {
            deposit_root,
            deposit_count,
            block_hash,
        },
    )
}

fn deposit_strategy() -> impl Strategy<Value = Deposit> {
    (
        fixed_bytes::<48>(),
        root_strategy(),
        any::<u64>(),
        fixed_bytes::<96>(),
        any::<u64>(),
    )
        .prop_map(|(pubkey, credentials, amount, signature, index)| Deposit {
            pubkey,
            credentials,
            amount,
            signature,
            index,
        })
}

fn payload_strategy() -> impl Strategy<Value = ExecutionPayload> {
    (
        (
            root_strategy(),
            any::<[u8; 20]>(),
            root_strategy(),
            root_strategy(),
            fixed_bytes::<256>(),
            root_strategy(),
        ),
        (
            any::<u64>(),
            any::<u64>(),
            any::<u64>(),
            any::<u64>(),
            vec(any::<u8>(), 0..=32),
            any::<[u8; 32]>(),
        ),
        (
            root_strategy(),
            vec(vec(any::<u8>(), 0..48), 0..4),
            vec(withdrawal_strategy(), 0..=16),
            any::<u64>(),
            any::<u64>(),
        ),
    )
        .prop_map(
            |(
                (parent_hash, fee_recipient, state_root, receipts_root, logs_bloom, prev_randao),
                (number, gas_limit, gas_used, timestamp, extra_data, base_fee),
                (block_hash, txs, withdrawals, blob_gas_used, excess_blob_gas),
            )| ExecutionPayload {
                parent_hash,
                fee_recipient: ExecutionAddress::from(fee_recipient),
                state_root,
                receipts_root,
                logs_bloom,
                prev_randao,
                number,
                gas_limit,
                gas_used,
                timestamp,
                extra_data: ExtraData::from_bytes(&extra_data).unwrap(),
                base_fee_per_gas: U256Le::from(base_fee),
                block_hash,
                transactions: transactions_from_bytes(&txs).unwrap(),
                withdrawals: Withdrawals::new(withdrawals).unwrap(),
                blob_gas_used,
                excess_blob_gas,
            },
        )
}

fn block_strategy() -> impl Strategy<Value = BeaconBlock> {
    (
        (any::<u64>(), any::<u64>(), root_strategy(), root_strategy()),
        (
            fixed_bytes::<96>(),
            eth1_data_strategy(),
            root_strategy(),
            vec(deposit_strategy(), 0..=4),
            payload_strategy(),
            vec(fixed_bytes::<48>(), 0..=4),
        ),
    )
        .prop_map(
            |(
                (slot, proposer_index, parent_root, state_root),
                (randao_reveal, eth1_data, graffiti, deposits, payload, commitments),
            )| {
                let mut block =
                    BeaconBlock::new_with_version(slot, proposer_index, parent_root, ForkVersion::DENEB);
                block.set_state_root(state_root);
                let body = block.body_mut();
                body.randao_reveal = randao_reveal;
                body.eth1_data = eth1_data;
                body.graffiti = graffiti;
                body.deposits = Deposits::new(deposits).unwrap();
                body.execution_payload = payload;
                body.blob_kzg_commitments = BlobKzgCommitments::new(commitments).unwrap();
                block
            },
        )
}

fn cached_engine() -> (Engine, Arc<RootCache>) {
    let cache = Arc::new(RootCache::new(1024));
    (Engine::with_cache(cache.clone()), cache)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn scalar_list_round_trips(items in vec(any::<u64>(), 0..=32)) {
        let list = List::<u64, 32>::new(items).unwrap();
        let bytes = list.as_ssz_bytes();
        prop_assert_eq!(bytes.len(), list.len() * 8);
        prop_assert_eq!(List::<u64, 32>::from_ssz_bytes(&bytes).unwrap(), list);
    }

    #[test]
    fn scalar_list_root_mixes_in_length(items in vec(any::<u64>(), 0..=32)) {
        let list = List::<u64, 32>::new(items.clone()).unwrap();
        let packed: Vec<u8> = items.iter().flat_map(|v| v.to_le_bytes()).collect();
        let content = merkleize_packed(&packed, chunk_count(32 * 8)).unwrap();

        prop_assert_eq!(
            list.hash_tree_root().unwrap(),
            mix_in_length(&content, items.len())
        );
    }

    #[test]
    fn list_over_capacity_is_rejected(extra in 1usize..16) {
        let bytes = vec![0u8; (8 + extra) * 2];
        prop_assert_eq!(
            List::<u16, 8>::from_ssz_bytes(&bytes),
            Err(DecodeError::LengthExceedsCapacity { len: 8 + extra, max: 8 })
        );
        prop_assert!(List::<u16, 8>::new(vec![0; 8 + extra]).is_err());
    }

    #[test]
    fn ragged_scalar_list_is_rejected(items in vec(any::<u16>(), 0..8)) {
        let mut bytes = List::<u16, 8>::new(items).unwrap().as_ssz_bytes();
        bytes.push(0xaa);
        prop_assert!(List::<u16, 8>::from_ssz_bytes(&bytes).is_err());
    }

    #[test]
    fn withdrawals_round_trip(items in vec(withdrawal_strategy(), 0..=16)) {
        let list = Withdrawals::new(items).unwrap();
        let bytes = list.as_ssz_bytes();
        prop_assert_eq!(bytes.len(), list.len() * 44);
        prop_assert_eq!(Withdrawals::from_ssz_bytes(&bytes).unwrap(), list);
    }

    #[test]
    fn deposits_round_trip(items in vec(deposit_strategy(), 0..=16)) {
        let list = Deposits::new(items).unwrap();
        let bytes = list.as_ssz_bytes();
        prop_assert_eq!(bytes.len(), list.len() * 192);
        prop_assert_eq!(Deposits::from_ssz_bytes(&bytes).unwrap(), list);
    }

    #[test]
    fn execution_payload_round_trips(payload in payload_strategy()) {
        let bytes = payload.as_ssz_bytes();
        prop_assert_eq!(bytes.len(), payload.ssz_len());
        prop_assert_eq!(ExecutionPayload::from_ssz_bytes(&bytes).unwrap(), payload);
    }

    #[test]
    fn block_round_trips(block in block_strategy()) {
        let bytes = block.as_ssz_bytes();
        prop_assert_eq!(block.size_ssz(), bytes.len());

        let decoded = BeaconBlock::from_ssz(&bytes, ForkVersion::DENEB).unwrap();
        prop_assert_eq!(decoded.version(), ForkVersion::DENEB);
        prop_assert_eq!(&decoded, &block);

        let (engine, _cache) = cached_engine();
        let root = block.hash_tree_root().unwrap();
        prop_assert_eq!(engine.hash_tree_root(&decoded).unwrap(), root);
        prop_assert_eq!(engine.block_header(&decoded).unwrap().body_root, block.body().hash_tree_root().unwrap());
    }

    #[test]
    fn cache_never_changes_roots(items in vec(withdrawal_strategy(), 0..=16)) {
        let list = Withdrawals::new(items).unwrap();
        let (engine, _cache) = cached_engine();

        let plain = list.hash_tree_root().unwrap();
        prop_assert_eq!(engine.hash_tree_root(&list).unwrap(), plain);
        prop_assert_eq!(engine.hash_tree_root(&list).unwrap(), plain);
    }

    #[test]
    fn variable_elements_round_trip(raw in vec(vec(any::<u8>(), 0..=8), 0..=4)) {
        let items: Vec<ByteList<8>> = raw
            .iter()
            .map(|bytes| ByteList::from_bytes(bytes).unwrap())
            .collect();
        let list = List::<ByteList<8>, 4>::new(items).unwrap();
        let bytes = list.as_ssz_bytes();

        prop_assert_eq!(List::<ByteList<8>, 4>::from_ssz_bytes(&bytes).unwrap(), list);
    }

    #[test]
    fn decreasing_offset_is_rejected(raw in vec(vec(any::<u8>(), 1..=8), 2..=4)) {
        let items: Vec<ByteList<8>> = raw
            .iter()
            .map(|bytes| ByteList::from_bytes(bytes).unwrap())
            .collect();
        let mut bytes = List::<ByteList<8>, 4>::new(items).unwrap().as_ssz_bytes();

        let first = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        bytes[4..8].copy_from_slice(&(first - 1).to_le_bytes());

        prop_assert!(matches!(
            List::<ByteList<8>, 4>::from_ssz_bytes(&bytes),
            Err(DecodeError::InvalidOffsetOrder { .. })
        ), "expected DecodeError::InvalidOffsetOrder");
    }

    #[test]
    fn offset_past_end_is_rejected(raw in vec(vec(any::<u8>(), 0..=8), 2..=4)) {
        let count = raw.len();
        let items: Vec<ByteList<8>> = raw
            .iter()
            .map(|bytes| ByteList::from_bytes(bytes).unwrap())
            .collect();
        let mut bytes = List::<ByteList<8>, 4>::new(items).unwrap().as_ssz_bytes();

        let last = (count - 1) * 4;
        let past = bytes.len() as u32 + 1;
        bytes[last..last + 4].copy_from_slice(&past.to_le_bytes());

        prop_assert!(matches!(
            List::<ByteList<8>, 4>::from_ssz_bytes(&bytes),
            Err(DecodeError::OffsetOutOfRange { .. })
        ), "expected DecodeError::OffsetOutOfRange");
    }

    #[test]
    fn header_tracks_body_changes(
        slot in any::<u64>(),
        graffiti in any::<[u8; 32]>(),
        txs in vec(vec(any::<u8>(), 0..64), 0..4),
    ) {
        let mut block = BeaconBlock::new_with_version(slot, 1, Root::ZERO, ForkVersion::DENEB);
        let before = block.header().unwrap();
        prop_assert_eq!(before.body_root, block.body().hash_tree_root().unwrap());

        block.body_mut().graffiti = Root::from_bytes(graffiti);
        block.body_mut().execution_payload.transactions = transactions_from_bytes(&txs).unwrap();
        let after = block.header().unwrap();

        prop_assert_eq!(after.body_root, block.body().hash_tree_root().unwrap());
        prop_assert_eq!(after.slot, slot);
        prop_assert_eq!(block.size_ssz(), block.as_ssz_bytes().len());
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn withdrawal_is_fixed_width_and_stable() {
    let withdrawal = Withdrawal {
        index: 7,
        validator_index: 3,
        address: ExecutionAddress::ZERO,
        amount: 100,
    };

    let bytes = withdrawal.as_ssz_bytes();
    assert_eq!(bytes.len(), 44);
    assert_eq!(&bytes[0..8], &7u64.to_le_bytes());
    assert_eq!(&bytes[36..44], &100u64.to_le_bytes());

    let first = withdrawal.hash_tree_root().unwrap();
    assert_eq!(withdrawal.hash_tree_root().unwrap(), first);
    assert_eq!(Withdrawal::from_ssz_bytes(&bytes).unwrap(), withdrawal);
}

#[test]
fn empty_transactions_hash_to_zero_subtree() {
    let depth = chunk_depth(MAX_TRANSACTIONS_PER_PAYLOAD).unwrap();
    let expected = mix_in_length(&zero_hash(depth), 0);

    assert_eq!(Transactions::default().hash_tree_root().unwrap(), expected);
}

#[test]
fn header_body_root_after_mutation() {
    let mut block = BeaconBlock::new_with_version(9, 4, Root::from_bytes([1; 32]), ForkVersion::DENEB);
    block
        .body_mut()
        .execution_payload
        .withdrawals
        .push(Withdrawal {
            index: 1,
            validator_index: 2,
            address: ExecutionAddress::ZERO,
            amount: 3,
        })
        .unwrap();
    let first = block.header().unwrap();
    assert_eq!(first.body_root, block.body().hash_tree_root().unwrap());

    block.body_mut().execution_payload.withdrawals.clear();
    let second = block.header().unwrap();
    assert_eq!(second.body_root, block.body().hash_tree_root().unwrap());
    assert_ne!(first.body_root, second.body_root);
}

#[test]
fn repeated_roots_array_hits_cache() {
    let (engine, cache) = cached_engine();
    let roots: Vec<Root> = (0..8u8).map(|i| Root::from_bytes([i; 32])).collect();
    let a = Vector::<Root, 8>::new(roots.clone()).unwrap();
    let b = Vector::<Root, 8>::new(roots).unwrap();

    let first = engine.hash_tree_root(&a).unwrap();
    let hits_before = cache.stats().hits;
    let second = engine.hash_tree_root(&b).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, a.hash_tree_root().unwrap());
    assert!(cache.stats().hits > hits_before);
}
