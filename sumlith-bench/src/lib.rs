//! Benchmarks for sumlith live under `benches/`.
