use criterion::{black_box, Bencher, Criterion};
use jwtoken::{decode_segment, encode_segment};

use crate::utils::bench_sized_string_group;

fn bench_encode(b: &mut Bencher, s: &str) {
  b.iter(|| encode_segment(black_box(s.as_bytes())))
}

fn bench_decode(b: &mut Bencher, s: &str) {
  let encoded = encode_segment(s.as_bytes());
  b.iter(|| decode_segment(black_box(&encoded)).expect("Failed to decode segment!"))
}

pub fn benches(c: &mut Criterion) {
  bench_sized_string_group(c, "segment::encode", &bench_encode);
  bench_sized_string_group(c, "segment::decode", &bench_decode);
}
