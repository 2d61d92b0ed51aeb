use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the run harness. The sort itself cannot fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown variant `{0}`, expected one of v1, v2, v3, seq")]
    UnknownVariant(String),

    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to write trace: {0}")]
    TraceWrite(#[source] io::Error),

    #[error("failed to encode trace record: {0}")]
    TraceEncode(#[from] serde_json::Error),
}
