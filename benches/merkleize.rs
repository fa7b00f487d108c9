use std::sync::Arc;

use beacon_ssz::merkle::merkleize_chunks;
use beacon_ssz::model::Root;
use beacon_ssz::types::{transactions_from_bytes, BeaconBlock, ForkVersion};
use beacon_ssz::{Engine, RootCache};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, RngCore, SeedableRng};

fn random_chunks(rng: &mut StdRng, count: usize) -> Vec<Root> {
    (0..count)
        .map(|_| {
            let mut chunk = [0u8; 32];
            rng.fill_bytes(&mut chunk);
            Root::from_bytes(chunk)
        })
        .collect()
}

fn sample_block(rng: &mut StdRng) -> BeaconBlock {
    let mut block = BeaconBlock::new_with_version(1, 2, Root::ZERO, ForkVersion::DENEB);
    let txs: Vec<Vec<u8>> = (0..64)
        .map(|_| {
            let mut tx = vec![0u8; 512];
            rng.fill_bytes(&mut tx);
            tx
        })
        .collect();
    block.body_mut().execution_payload.transactions =
        transactions_from_bytes(&txs).expect("64 transactions fit");
    block
}

fn bench_merkleize_chunks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("merkleize_chunks");

    for count in [16usize, 256, 4096] {
        let chunks = random_chunks(&mut rng, count);
        group.throughput(Throughput::Bytes((count * 32) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &chunks, |b, chunks| {
            b.iter(|| merkleize_chunks(chunks, 1 << 20).expect("limit fits"))
        });
    }
    group.finish();
}

fn bench_block_root(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let block = sample_block(&mut rng);
    let uncached = Engine::uncached();
    let cached = Engine::with_cache(Arc::new(RootCache::new(10_000)));

    let mut group = c.benchmark_group("block_root");
    group.bench_function("uncached", |b| {
        b.iter(|| uncached.hash_tree_root(&block).expect("block hashes"))
    });
    group.bench_function("cached", |b| {
        b.iter(|| cached.hash_tree_root(&block).expect("block hashes"))
    });
    group.finish();
}

criterion_group!(benches, bench_merkleize_chunks, bench_block_root);
criterion_main!(benches);
