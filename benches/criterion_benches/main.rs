use criterion::{criterion_group, criterion_main, Criterion};

mod segment;
mod tokens;
mod utils;

pub fn criterion_benchmark(c: &mut Criterion) {
  tokens::benches(c);
  segment::benches(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
