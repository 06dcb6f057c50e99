//! Streaming digest benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sumlith::StreamingDigest;

const SIZES: &[usize] = &[64, 1024, 16 * 1024];

/// Absorb-then-digest over a range of input sizes.
fn bench_absorb(c: &mut Criterion) {
    let mut group = c.benchmark_group("sumhash512 absorb");

    for &size in SIZES {
        let data = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut h = StreamingDigest::new();
                h.absorb(black_box(data));
                black_box(h.digest_array())
            })
        });
    }

    group.finish();
}

/// Cost of a non-destructive digest on a long-running stream.
fn bench_peek(c: &mut Criterion) {
    let mut h = StreamingDigest::new();
    h.absorb(&[7u8; 4096]);

    c.bench_function("sumhash512 digest peek", |b| {
        b.iter(|| black_box(h.digest(black_box(b""))))
    });
}

criterion_group!(benches, bench_absorb, bench_peek);
criterion_main!(benches);
