//! Benchmarks for the ModEdit codecs live under `benches/`.
