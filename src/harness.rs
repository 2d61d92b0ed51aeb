//! Repeated sort runs of one variant, the library side of the `mergesort-trace` binary.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::observer::SortObserver;
use crate::variant::Variant;

/// The input of the single shot tracing demo.
pub const DEMO_INPUT: [i32; 9] = [89, 123, 12, 9, 198, 1546, 108, 872, 93];

/// Everything that shapes a run. Missing TOML keys take the default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub variant: Variant,
    /// Worker threads of a dedicated pool, the global pool if unset.
    pub threads: Option<usize>,
    pub iterations: usize,
    /// Length of each generated input.
    pub len: usize,
    /// Overrides the crossover of the variant.
    pub crossover: Option<usize>,
    /// Seed of the input generator, random if unset.
    pub seed: Option<u64>,
    /// Sort [`DEMO_INPUT`] instead of generated inputs.
    pub fixed_input: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            variant: Variant::ForkAll,
            threads: None,
            iterations: 10_000,
            len: 10,
            crossover: None,
            seed: None,
            fixed_input: false,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub variant: Variant,
    pub iterations: usize,
    /// Total number of elements sorted over all iterations.
    pub elements: usize,
    pub seed: u64,
    pub elapsed: Duration,
    /// The sorted result of the last iteration.
    pub last_output: Vec<i32>,
}

/// Sorts `config.iterations` inputs with the configured variant, reporting every task to
/// `observer`.
pub fn run<O: SortObserver>(config: &RunConfig, observer: &O) -> Result<RunReport> {
    let mut sorter = config.variant.sorter(config.crossover).observer(observer);

    if let Some(threads) = config.threads {
        if threads == 0 {
            return Err(Error::ZeroThreads);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mergesort-{i}"))
            .build()?;
        sorter = sorter.thread_pool(Arc::new(pool));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    tracing::info!(
        variant = %config.variant,
        threads = ?config.threads,
        iterations = config.iterations,
        len = config.len,
        crossover = sorter.crossover_len(),
        seed,
        "starting run"
    );

    let mut elements = 0;
    let mut last_output = Vec::new();
    let start = Instant::now();

    for iteration in 0..config.iterations {
        let mut v = if config.fixed_input {
            DEMO_INPUT.to_vec()
        } else {
            signed_spread(&mut rng, config.len)
        };

        sorter.sort(&mut v);
        elements += v.len();

        tracing::trace!(iteration, len = v.len(), "sorted");
        last_output = v;
    }

    let elapsed = start.elapsed();
    tracing::info!(elements, ?elapsed, "run finished");

    Ok(RunReport {
        variant: config.variant,
        iterations: config.iterations,
        elements,
        seed,
        elapsed,
        last_output,
    })
}

/// Values in `-998..=998`, the difference of two uniform draws from `0..999`.
fn signed_spread(rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len)
        .map(|_| rng.gen_range(0..999) - rng.gen_range(0..999))
        .collect()
}
