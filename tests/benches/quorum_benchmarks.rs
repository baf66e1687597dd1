//! # Quorum Subsystem Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Member selection, 5000 nodes | < 10ms |
//! | Connections, one member of 400 | < 100µs |
//! | Sign hash | < 2µs |

use criterion::{criterion_group, criterion_main};
use qc_tests::benchmarks::qc_18_quorums::{
    bench_connections, bench_member_selection, bench_sign_hash,
};

criterion_group!(
    benches,
    bench_member_selection,
    bench_connections,
    bench_sign_hash,
);

criterion_main!(benches);
