#![warn(missing_docs)]
//! fncmp Core - Measurement Primitives
//!
//! This crate provides everything a comparison run needs to measure and record:
//! - `Instant` / `Timer` wall-clock time source
//! - `MemoryProbe` capability with a heap-gauge implementation
//! - Global allocator interceptor for live heap tracking
//! - `TestRunResult` / `TestResultSet` records produced by a run

mod allocator;
mod measure;
mod result;

pub use allocator::{
    HeapProbe, MemoryProbe, TrackingAllocator, current_allocation, live_bytes,
    reset_allocation_counter,
};
pub use measure::{Instant, Timer, round_to, truncate_to};
pub use result::{TestResultSet, TestRunResult};

/// Decimal places kept for elapsed seconds and memory deltas
pub const PRECISION: u32 = 4;

/// Bytes per megabyte used when converting memory deltas
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
