//! Result Data Structures

use crate::measure::round_to;
use crate::{BYTES_PER_MB, PRECISION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Measured outcome of one candidate's iteration loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunResult {
    label: String,
    elapsed_seconds: f64,
    memory_delta_mb: f64,
    iterations: u64,
}

impl TestRunResult {
    /// Create a result from already-scaled values
    pub fn new(
        label: impl Into<String>,
        elapsed_seconds: f64,
        memory_delta_mb: f64,
        iterations: u64,
    ) -> Self {
        Self {
            label: label.into(),
            elapsed_seconds,
            memory_delta_mb,
            iterations,
        }
    }

    /// Create a result from raw measurements.
    ///
    /// Elapsed time is truncated to four decimal places; the byte delta is
    /// converted to megabytes and rounded to four decimal places.
    pub fn from_measurement(
        label: impl Into<String>,
        elapsed: Duration,
        memory_delta_bytes: i64,
        iterations: u64,
    ) -> Self {
        // Truncate on integer nanos so 100µs steps land exactly.
        let ticks = elapsed.as_nanos() / 100_000;
        let elapsed_seconds = ticks as f64 / 10f64.powi(PRECISION as i32);
        let memory_delta_mb = round_to(memory_delta_bytes as f64 / BYTES_PER_MB, PRECISION);
        Self::new(label, elapsed_seconds, memory_delta_mb, iterations)
    }

    /// Candidate label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wall-clock seconds for the whole iteration loop (4 decimal places)
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Heap delta in megabytes (4 decimal places, negative when memory was freed)
    pub fn memory_delta_mb(&self) -> f64 {
        self.memory_delta_mb
    }

    /// Number of times the candidate was invoked
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

/// Ordered collection of run results, one per candidate in registration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultSet {
    recorded_at: DateTime<Utc>,
    results: Vec<TestRunResult>,
}

impl TestResultSet {
    /// Create an empty set stamped with the current time
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    /// Create an empty set with an explicit timestamp
    pub fn with_timestamp(recorded_at: DateTime<Utc>) -> Self {
        Self {
            recorded_at,
            results: Vec::new(),
        }
    }

    /// Append one result
    pub fn push(&mut self, result: TestRunResult) {
        self.results.push(result);
    }

    /// All results in insertion order
    pub fn results(&self) -> &[TestRunResult] {
        &self.results
    }

    /// Iterate over results in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TestRunResult> {
        self.results.iter()
    }

    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set holds no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// When the run that produced this set started
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl Default for TestResultSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a TestResultSet {
    type Item = &'a TestRunResult;
    type IntoIter = std::slice::Iter<'a, TestRunResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
