//! # QC-18 Quorums Benchmarks
//!
//! Hot paths:
//! - Member selection over a full masternode list (one SHA256d per node)
//! - Connection set for one member (DKG session setup)
//! - All members' connections (parallel)
//! - Sign hash (every sig share)
//!
//! Conditions:
//! - Mainnet-sized lists (up to 5000 masternodes)
//! - Largest quorum type (400 members)

use crate::integration::fixtures::random_candidates;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qc_18_quorums::{
    all_member_connections, build_sign_hash, llmq_400_60, llmq_50_60, quorum_connections,
    select_quorum_members, LlmqType, QuorumAnchor,
};
use shared_types::BlockRef;
use std::time::Duration;

pub fn bench_member_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/member_selection");
    group.measurement_time(Duration::from_secs(10));

    let params = llmq_400_60();
    let anchor = QuorumAnchor::new(&params, BlockRef::new([0x42; 32], 288 * 100))
        .expect("anchor height");

    for count in [500usize, 1000, 5000] {
        let candidates = random_candidates(count, count as u64);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("select_llmq_400_60", count),
            &candidates,
            |b, candidates| b.iter(|| black_box(select_quorum_members(&params, &anchor, candidates))),
        );
    }

    group.finish();
}

pub fn bench_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/connections");
    group.measurement_time(Duration::from_secs(10));

    for params in [llmq_50_60(), llmq_400_60()] {
        let anchor = QuorumAnchor::new(&params, BlockRef::new([0x24; 32], params.dkg_interval * 10))
            .expect("anchor height");
        let members = select_quorum_members(&params, &anchor, &random_candidates(2000, 7));
        let me = members.get(0).expect("non-empty quorum").pro_tx_hash;

        group.bench_function(BenchmarkId::new("single_member", &params.name), |b| {
            b.iter(|| black_box(quorum_connections(&params, &members, &me)))
        });

        group.throughput(Throughput::Elements(members.len() as u64));
        group.bench_function(BenchmarkId::new("all_members", &params.name), |b| {
            b.iter(|| black_box(all_member_connections(&params, &members)))
        });
    }

    group.finish();
}

pub fn bench_sign_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/hashing");

    group.bench_function("build_sign_hash", |b| {
        b.iter(|| {
            black_box(build_sign_hash(
                LlmqType::Llmq50_60,
                &[1; 32],
                &[2; 32],
                &[3; 32],
            ))
        })
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_member_selection(c);
    bench_connections(c);
    bench_sign_hash(c);
}
