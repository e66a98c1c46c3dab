use std::iter;
use std::str;
use criterion::{Criterion, Bencher, Throughput, BenchmarkId};

static KB: usize = 1024;
static BENCH_SIZES: [usize; 4] = [1, KB, 4 * KB, 16 * KB];

/// Run a benchmark once per claim payload size.
pub fn bench_sized_string_group(c: &mut Criterion, name: &str, f: &dyn Fn(&mut Bencher, &str)) {
  let mut group = c.benchmark_group(name);
  for size in BENCH_SIZES.iter() {
    group.throughput(Throughput::Bytes(*size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
      let bytes = iter::repeat(b'x').take(size).collect::<Vec<_>>();
      let s = str::from_utf8(&bytes).expect("Bench payload is not utf8");

      f(b, s);
    });
  }
  group.finish();
}
