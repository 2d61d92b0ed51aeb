//! Runs one variant of the fork-join merge sort repeatedly and optionally writes a task trace.
//!
//! ```text
//! mergesort-trace v1 --threads 8 --trace v1.jsonl
//! MERGESORT_THREADS=1 mergesort-trace v3 --len 100000 --iterations 20
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use fork_join_sort::harness::{self, RunConfig};
use fork_join_sort::observer::{SpanRecord, SpanRecorder, TracingObserver};
use fork_join_sort::{Error, Variant};

#[derive(Parser, Debug)]
#[command(name = "mergesort-trace", version, about)]
struct Args {
    /// v1 (fork everything), v2 (fork both above crossover), v3 (fork one above crossover) or seq.
    variant: Option<Variant>,

    /// Worker threads, the global pool sized to the machine if unset.
    #[arg(short, long, env = "MERGESORT_THREADS")]
    threads: Option<usize>,

    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Length of each generated input.
    #[arg(short, long)]
    len: Option<usize>,

    #[arg(short, long)]
    crossover: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Sort the fixed demo sequence instead of random inputs.
    #[arg(long)]
    fixed: bool,

    /// TOML run config. Flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run report as one JSON object instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Write one JSON record per finished task to this file.
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl Args {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(len) = self.len {
            config.len = len;
        }
        if self.crossover.is_some() {
            config.crossover = self.crossover;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.fixed_input |= self.fixed;

        Ok(config)
    }
}

fn write_trace(path: &Path, records: &[SpanRecord]) -> Result<(), Error> {
    let file = File::create(path).map_err(Error::TraceWrite)?;
    let mut out = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n").map_err(Error::TraceWrite)?;
    }

    out.flush().map_err(Error::TraceWrite)
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    let config = args.run_config()?;

    let recorder = args.trace.as_ref().map(|_| SpanRecorder::new());
    let observer = (TracingObserver, recorder.as_ref());

    let report = harness::run(&config, &observer)
        .with_context(|| format!("run of variant {} failed", config.variant))?;

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "{}: {} iterations, {} elements in {:.3?} (seed {})",
            report.variant, report.iterations, report.elements, report.elapsed, report.seed
        );
        if config.fixed_input {
            println!("{:?}", report.last_output);
        }
    }

    if let (Some(path), Some(recorder)) = (&args.trace, &recorder) {
        let records = recorder.take_records();
        write_trace(path, &records)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(records = records.len(), path = %path.display(), "trace written");
    }

    Ok(())
}
