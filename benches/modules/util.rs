use std::env;

use criterion::{black_box, BatchSize, Criterion};

use once_cell::sync::OnceCell;

/// `BENCH_FILTER` holds comma separated substrings, a benchmark runs if its name contains any of
/// them. Unset runs everything.
pub fn should_run_benchmark(name: &str) -> bool {
    static FILTER: OnceCell<Option<Vec<String>>> = OnceCell::new();

    let filter = FILTER.get_or_init(|| {
        env::var("BENCH_FILTER").ok().map(|val| {
            val.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
    });

    filter
        .as_ref()
        .map(|parts| parts.iter().any(|part| name.contains(part.as_str())))
        .unwrap_or(true)
}

#[inline(never)]
pub fn bench_fn<T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: impl Fn(usize) -> Vec<i32>,
    bench_name: &str,
    test_fn: impl Fn(&mut [T]),
) {
    // No core pinning, the parallel sorts need the whole machine.
    let batch_size = if test_len > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    let name = format!("{bench_name}-hot-{transform_name}-{pattern_name}-{test_len}");
    if should_run_benchmark(&name) {
        c.bench_function(&name, |b| {
            b.iter_batched_ref(
                || transform(pattern_provider(test_len)),
                |test_data| {
                    test_fn(black_box(test_data.as_mut_slice()));
                    black_box(test_data); // side-effect
                },
                batch_size,
            )
        });
    }
}
