//! Benchmarks comparing the treap against the standard library's ordered set.

use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    btreeset::insert,
    btreeset::search,
    btreeset::iter,
    treap_bench::insert,
    treap_bench::search,
    treap_bench::delete,
    treap_bench::iter
);
criterion_main!(benches);
