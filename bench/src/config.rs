use crate::errors::BenchError;
use std::path::PathBuf;
use std::str::FromStr;

/// Number of squarings in the reference circuit when `BENCH_CONSTRAINTS` is unset.
pub const DEFAULT_CONSTRAINTS: usize = 40_000;

#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Number of squaring constraints in `x^(2^n) == y`.
    pub constraints: usize,
    /// Where keys, witnesses and the proof bundle are stored.
    pub data_dir: PathBuf,
    /// Size of the rayon pool. `None` keeps rayon's default (one thread per core).
    pub threads: Option<usize>,
}

impl BenchConfig {
    pub fn from_env() -> Result<Self, BenchError> {
        Ok(Self {
            constraints: parse_var("BENCH_CONSTRAINTS")?.unwrap_or(DEFAULT_CONSTRAINTS),
            data_dir: std::env::var("BENCH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            threads: parse_var("BENCH_THREADS")?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, BenchError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| BenchError::Config(format!("{name}={raw} cannot be parsed"))),
        Err(_) => Ok(None),
    }
}
