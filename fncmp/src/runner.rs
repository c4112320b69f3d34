//! Comparison Runner
//!
//! Registers labelled candidates and runs each of them a fixed number of
//! times, back to back on the calling thread.
//!
//! ## Data Flow
//!
//! ```text
//! add_function / add_fallible   (label → candidate, insertion ordered)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ ComparisonRunner │  probe → timer → N iterations → timer → probe
//! └────────┬─────────┘
//!          │
//!          ▼
//!   TestResultSet (one TestRunResult per candidate)
//!          │
//!          ▼
//!   Formatter (explicit, or chosen from the output context)
//! ```
//!
//! Failures are not recovered: the first candidate error aborts the run and
//! no partial result set is produced. Panics unwind through `run()` untouched.

use crate::config::FncmpConfig;
use fncmp_core::{HeapProbe, MemoryProbe, TestResultSet, TestRunResult, Timer};
use fncmp_report::{Formatter, ResultFormatter};
use std::hint::black_box;
use std::io::{IsTerminal, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Iteration count used by [`ComparisonRunner::new`]
pub const DEFAULT_NUM_RUNS: u64 = 5000;

/// Iteration count used by [`ComparisonRunner::load`] when none is given
pub const LOAD_NUM_RUNS: u64 = 500;

/// Error type returned by fallible candidates
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

type CandidateFn = Box<dyn FnMut() -> Result<(), BoxError>>;

/// Errors surfaced by a comparison run
#[derive(Debug, Error)]
pub enum ComparisonError {
    /// A candidate returned an error; the run was aborted
    #[error("Candidate '{label}' failed on iteration {iteration}: {source}")]
    CandidateFailed {
        /// Label of the failing candidate
        label: String,
        /// 1-based iteration on which it failed
        iteration: u64,
        /// The candidate's own error
        source: BoxError,
    },

    /// Writing the rendered report failed
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

struct Candidate {
    label: String,
    run: CandidateFn,
}

/// Runs labelled candidates side by side and reports time and memory cost
pub struct ComparisonRunner {
    num_runs: u64,
    candidates: Vec<Candidate>,
    formatter: Option<Formatter>,
    probe: Box<dyn MemoryProbe>,
    heap_probe: bool,
}

impl ComparisonRunner {
    /// Create a runner with [`DEFAULT_NUM_RUNS`] iterations per candidate
    pub fn new() -> Self {
        Self {
            num_runs: DEFAULT_NUM_RUNS,
            candidates: Vec::new(),
            formatter: None,
            probe: Box::new(HeapProbe),
            heap_probe: true,
        }
    }

    /// Create a runner with a preset iteration count.
    ///
    /// `None` falls back to [`LOAD_NUM_RUNS`].
    pub fn load(num_runs: Option<u64>) -> Self {
        let mut runner = Self::new();
        runner.set_num_runs(num_runs.unwrap_or(LOAD_NUM_RUNS));
        runner
    }

    /// Create a runner from `fncmp.toml` settings
    pub fn from_config(config: &FncmpConfig) -> Self {
        let mut runner = Self::new();
        runner.set_num_runs(config.runner.num_runs);
        if let Some(format) = config.output.output_format() {
            runner.set_formatter(format.into());
        }
        runner
    }

    /// Register `f` under `label`, replacing any candidate with the same label.
    ///
    /// A replaced candidate keeps its original position in the run order.
    pub fn add_function<F, T>(&mut self, label: impl Into<String>, mut f: F) -> &mut Self
    where
        F: FnMut() -> T + 'static,
    {
        self.insert(
            label.into(),
            Box::new(move || {
                black_box(f());
                Ok(())
            }),
        )
    }

    /// Register a candidate that can fail.
    ///
    /// An `Err` on any iteration aborts the whole run with
    /// [`ComparisonError::CandidateFailed`].
    pub fn add_fallible<F, T, E>(&mut self, label: impl Into<String>, mut f: F) -> &mut Self
    where
        F: FnMut() -> Result<T, E> + 'static,
        E: Into<BoxError>,
    {
        self.insert(
            label.into(),
            Box::new(move || {
                f().map(|value| {
                    black_box(value);
                })
                .map_err(Into::into)
            }),
        )
    }

    /// Register the first of two candidates.
    #[deprecated(note = "use `add_function`")]
    pub fn set_function_a<F, T>(&mut self, label: impl Into<String>, f: F) -> &mut Self
    where
        F: FnMut() -> T + 'static,
    {
        self.add_function(label, f)
    }

    /// Register the second of two candidates.
    #[deprecated(note = "use `add_function`")]
    pub fn set_function_b<F, T>(&mut self, label: impl Into<String>, f: F) -> &mut Self
    where
        F: FnMut() -> T + 'static,
    {
        self.add_function(label, f)
    }

    fn insert(&mut self, label: String, run: CandidateFn) -> &mut Self {
        match self.candidates.iter_mut().find(|c| c.label == label) {
            Some(existing) => {
                debug!(label = %label, "replacing candidate");
                existing.run = run;
            }
            None => self.candidates.push(Candidate { label, run }),
        }
        self
    }

    /// Set how many times each candidate is invoked per run.
    ///
    /// 0 is allowed and measures only the loop overhead.
    pub fn set_num_runs(&mut self, num_runs: u64) {
        self.num_runs = num_runs;
    }

    /// How many times each candidate is invoked per run
    pub fn num_runs(&self) -> u64 {
        self.num_runs
    }

    /// Set the formatter used by [`exec`](Self::exec). Always wins over the
    /// context-based default.
    pub fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = Some(formatter);
    }

    /// Replace the memory probe sampled around each candidate
    pub fn set_probe(&mut self, probe: impl MemoryProbe + 'static) {
        self.probe = Box::new(probe);
        self.heap_probe = false;
    }

    /// Builder form of [`set_probe`](Self::set_probe)
    pub fn with_probe(mut self, probe: impl MemoryProbe + 'static) -> Self {
        self.set_probe(probe);
        self
    }

    /// Registered labels in run order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.label.as_str())
    }

    /// Number of registered candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no candidates are registered
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Run every candidate `num_runs` times, in registration order.
    pub fn run(&mut self) -> Result<TestResultSet, ComparisonError> {
        let num_runs = self.num_runs;
        let mut results = TestResultSet::new();

        info!(
            candidates = self.candidates.len(),
            iterations = num_runs,
            "starting comparison"
        );

        for candidate in &mut self.candidates {
            let start_usage = self.probe.current_usage();
            let timer = Timer::start();

            for iteration in 1..=num_runs {
                if let Err(source) = (candidate.run)() {
                    warn!(label = %candidate.label, iteration, "candidate failed");
                    return Err(ComparisonError::CandidateFailed {
                        label: candidate.label.clone(),
                        iteration,
                        source,
                    });
                }
            }

            let elapsed = timer.stop();
            let delta = self.probe.current_usage() as i64 - start_usage as i64;
            let result = TestRunResult::from_measurement(&candidate.label, elapsed, delta, num_runs);

            debug!(
                label = %candidate.label,
                elapsed_s = result.elapsed_seconds(),
                memory_mb = result.memory_delta_mb(),
                "candidate finished"
            );
            results.push(result);
        }

        if self.heap_untracked(&results) {
            warn!(
                "all candidates reported 0 MB; ensure TrackingAllocator is set as #[global_allocator]"
            );
        }

        info!(results = results.len(), "comparison complete");
        Ok(results)
    }

    /// Default heap probe in use, yet no candidate moved the gauge
    fn heap_untracked(&self, results: &TestResultSet) -> bool {
        self.heap_probe
            && !results.is_empty()
            && results.iter().all(|r| r.memory_delta_mb() == 0.0)
    }

    /// Run the comparison and print the report to stdout.
    ///
    /// Without an explicit formatter, a table is printed when stdout is a
    /// terminal and HTML otherwise. Stdout is locked only after every
    /// candidate has finished.
    pub fn exec(&mut self) -> Result<(), ComparisonError> {
        let results = self.run()?;
        let stdout = std::io::stdout();
        let is_terminal = stdout.is_terminal();
        self.render_to(&mut stdout.lock(), &results, is_terminal)
    }

    /// Run the comparison and write the report to `writer`.
    pub fn exec_to<W: Write>(
        &mut self,
        writer: &mut W,
        is_terminal: bool,
    ) -> Result<(), ComparisonError> {
        let results = self.run()?;
        self.render_to(writer, &results, is_terminal)
    }

    /// Render `results` with the configured (or context-selected) formatter
    /// and write them to `writer`.
    pub fn render_to<W: Write>(
        &self,
        writer: &mut W,
        results: &TestResultSet,
        is_terminal: bool,
    ) -> Result<(), ComparisonError> {
        let rendered = match &self.formatter {
            Some(formatter) => {
                debug!(formatter = formatter.name(), "using configured formatter");
                formatter.format(results)
            }
            None => {
                let formatter = Formatter::for_context(is_terminal);
                debug!(formatter = formatter.name(), is_terminal, "using context formatter");
                formatter.format(results)
            }
        };

        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for ComparisonRunner {
    fn default() -> Self {
        Self::new()
    }
}
