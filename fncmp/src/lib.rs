#![warn(missing_docs)]
//! # fncmp
//!
//! Side-by-side comparison of competing Rust closures.
//!
//! Register a handful of candidates, run each of them a fixed number of
//! times, and get back the wall-clock time and heap delta of every loop:
//! - **Fixed iteration counts**: no warmup, no sampling, just N calls per candidate
//! - **Fail-fast**: the first failing candidate aborts the run with its label attached
//! - **Heap tracking**: install `TrackingAllocator` to get memory deltas
//! - **Pluggable output**: table, HTML, JSON, CSV, or your own `ResultFormatter`
//!
//! ## Quick Start
//!
//! ```ignore
//! use fncmp::ComparisonRunner;
//!
//! fn main() -> Result<(), fncmp::ComparisonError> {
//!     let mut runner = ComparisonRunner::load(Some(1000));
//!     runner
//!         .add_function("format", || format!("{}-{}", 1, 2))
//!         .add_function("concat", || 1.to_string() + "-" + &2.to_string());
//!     runner.exec()
//! }
//! ```

mod config;
mod runner;

pub use config::{CONFIG_FILE_NAME, FncmpConfig, OutputConfig, RunnerConfig};
pub use runner::{BoxError, ComparisonError, ComparisonRunner, DEFAULT_NUM_RUNS, LOAD_NUM_RUNS};

// Re-export core types
pub use fncmp_core::{
    HeapProbe, Instant, MemoryProbe, TestResultSet, TestRunResult, Timer, TrackingAllocator,
    current_allocation, live_bytes, reset_allocation_counter,
};

// Re-export formatters
pub use fncmp_report::{
    CsvFormatter, Formatter, HtmlFormatter, JsonFormatter, OutputFormat, ResultFormatter,
    TableFormatter,
};

/// Install a `tracing` subscriber writing to stderr.
///
/// `verbose` enables per-candidate debug events. Calling this more than once,
/// or after another subscriber was installed, is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = if verbose { "fncmp=debug" } else { "fncmp=info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
