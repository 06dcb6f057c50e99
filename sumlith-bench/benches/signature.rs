//! Signature scheme benchmarks.
//!
//! Set `RUST_LOG=sumlith_dsa=trace` to see rejection-sampling attempts.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rng;
use sumlith::{Dsa65Scheme, Seed};
use tracing_subscriber::EnvFilter;

/// Test message for signing benchmarks.
const TEST_MESSAGE: &[u8] = b"The quick brown fox jumps over the lazy dog";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn bench_keygen(c: &mut Criterion) {
    init_tracing();
    let mut group = c.benchmark_group("Dsa65 KeyGen");
    group.throughput(Throughput::Elements(1));

    group.bench_function("random", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(Dsa65Scheme::generate_keypair_with_rng(&mut rng))
        })
    });

    let seed = Seed::from([0x42u8; 32]);
    group.bench_function("seeded", |b| {
        b.iter(|| black_box(Dsa65Scheme::generate_keypair_from_seed(black_box(&seed))))
    });

    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let (sk, _) = Dsa65Scheme::generate_keypair();

    c.bench_function("Dsa65 Sign", |b| {
        b.iter(|| black_box(sk.sign(black_box(TEST_MESSAGE))))
    });
}

fn bench_verify(c: &mut Criterion) {
    let (sk, pk) = Dsa65Scheme::generate_keypair();
    let sig = sk.sign(TEST_MESSAGE);
    let seed = Seed::rho_of(&pk);

    c.bench_function("Dsa65 Verify", |b| {
        b.iter(|| black_box(pk.verify(black_box(TEST_MESSAGE), sig.as_bytes())))
    });

    c.bench_function("Dsa65 VerifySeedBinding", |b| {
        b.iter(|| black_box(pk.verify_seed_binding(black_box(&seed))))
    });
}

criterion_group!(benches, bench_keygen, bench_sign, bench_verify);
criterion_main!(benches);
