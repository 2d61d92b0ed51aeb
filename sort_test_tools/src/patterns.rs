//! Input generators for tests and benchmarks, all producing `i32` values.
//!
//! Every generator draws from a [`StdRng`] seeded with [`random_init_seed`], so one process sees
//! the same inputs for the same calls unless [`use_random_seed_each_time`] was called. The
//! `OVERRIDE_SEED` environment variable pins the seed to reproduce a failure.

use std::cmp::Reverse;
use std::env;
use std::ops::Range;
use std::sync::{Mutex, PoisonError};

use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = pattern_rng();
    (0..len).map(|_| rng.gen()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<Uniform<i32>>,
{
    // :.:.:.::

    let dist: Uniform<i32> = range.into();
    dist.sample_iter(pattern_rng()).take(len).collect()
}

pub fn random_signed_spread(len: usize) -> Vec<i32> {
    //    .
    //  .:::.
    // .:::::.
    // Difference of two uniform draws from 0..999, centered on zero with plenty of duplicates.

    let mut rng = pattern_rng();
    (0..len)
        .map(|_| rng.gen_range(0..999) - rng.gen_range(0..999))
        .collect()
}

/// Random values with the first `sorted_percent` of them already in order.
pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len.min(len)].sort_unstable();
    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    sorted_runs(len, even_runs(len, saw_count), |_| Direction::Up)
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    sorted_runs(len, even_runs(len, saw_count), |_| Direction::Down)
}

/// `saw_count` runs of equal length, each ascending or descending at random.
pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let mut rng = pattern_rng();
    sorted_runs(len, even_runs(len, saw_count), |_| Direction::random(&mut rng))
}

/// Runs of random length in `run_len`, each ascending or descending at random.
pub fn saw_mixed_range(len: usize, run_len: Range<usize>) -> Vec<i32> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::

    let mut rng = pattern_rng();
    let lens = Uniform::from(run_len.start.max(1)..run_len.end.max(run_len.start + 1));
    let run_lens = lens.sample_iter(pattern_rng());

    sorted_runs(len, run_lens, |_| Direction::random(&mut rng))
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    sorted_runs(len, [len / 2, len - len / 2].into_iter(), |i| {
        if i == 0 {
            Direction::Up
        } else {
            Direction::Down
        }
    })
}

/// Makes every following pattern call draw a fresh seed. Meant for benchmarks, where repeating
/// the same inputs would train the branch predictor.
///
/// # Panics
///
/// Panics if the seed was pinned with `OVERRIDE_SEED`.
pub fn use_random_seed_each_time() {
    let mut state = lock_seed();
    if let SeedMode::Override(_) = init_seed_mode(&mut state) {
        panic!("use_random_seed_each_time conflicts with OVERRIDE_SEED.");
    }

    *state = Some(SeedMode::EachCall);
}

/// The seed of the next pattern call. Constant per process unless
/// [`use_random_seed_each_time`] was called.
pub fn random_init_seed() -> u64 {
    match init_seed_mode(&mut lock_seed()) {
        SeedMode::PerProcess(seed) | SeedMode::Override(seed) => seed,
        SeedMode::EachCall => thread_rng().gen(),
    }
}

// --- Private ---

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SeedMode {
    PerProcess(u64),
    Override(u64),
    EachCall,
}

static SEED: Mutex<Option<SeedMode>> = Mutex::new(None);

fn lock_seed() -> std::sync::MutexGuard<'static, Option<SeedMode>> {
    SEED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn init_seed_mode(state: &mut Option<SeedMode>) -> SeedMode {
    *state.get_or_insert_with(|| match env::var("OVERRIDE_SEED") {
        Ok(val) => SeedMode::Override(
            val.trim()
                .parse()
                .unwrap_or_else(|_| panic!("OVERRIDE_SEED is not a u64: {val}")),
        ),
        Err(_) => SeedMode::PerProcess(thread_rng().gen()),
    })
}

fn pattern_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

#[derive(Copy, Clone)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn random(rng: &mut StdRng) -> Self {
        if rng.gen() {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Runs of `len / saw_count` elements, the last one may be shorter.
fn even_runs(len: usize, saw_count: usize) -> impl Iterator<Item = usize> {
    let run_len = (len / saw_count.max(1)).max(1);
    std::iter::repeat(run_len)
}

/// Random values, cut into consecutive runs with lengths from `run_lens`, each sorted in the
/// direction `direction` picks for the run index.
fn sorted_runs(
    len: usize,
    run_lens: impl Iterator<Item = usize>,
    mut direction: impl FnMut(usize) -> Direction,
) -> Vec<i32> {
    let mut v = random(len);
    let mut start = 0;

    for (i, run_len) in run_lens.enumerate() {
        if start >= len {
            break;
        }

        let end = (start + run_len.max(1)).min(len);
        let run = &mut v[start..end];
        match direction(i) {
            Direction::Up => run.sort_unstable(),
            Direction::Down => run.sort_unstable_by_key(|&x| Reverse(x)),
        }
        start = end;
    }

    v
}
