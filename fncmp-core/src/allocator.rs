//! Heap Tracking
//!
//! `TrackingAllocator` wraps the system allocator and keeps two kinds of
//! counters:
//! - a live-bytes gauge (allocated minus freed), read by [`HeapProbe`] to
//!   compute the memory delta of a candidate's iteration loop
//! - cumulative bytes/count since the last [`reset_allocation_counter`]
//!
//! The counters only move when the allocator is installed:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: fncmp::TrackingAllocator = fncmp::TrackingAllocator;
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);
static ALLOCATION_COUNT: AtomicU64 = AtomicU64::new(0);

/// Global allocator that records heap usage on top of [`System`]
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded unchanged to the system allocator.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded unchanged to the system allocator.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: caller guarantees `ptr` came from this allocator with `layout`.
        unsafe { System.dealloc(ptr, layout) };
        LIVE_BYTES.fetch_sub(layout.size(), Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::realloc` contract.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size >= old_size {
                LIVE_BYTES.fetch_add(new_size - old_size, Ordering::Relaxed);
            } else {
                LIVE_BYTES.fetch_sub(old_size - new_size, Ordering::Relaxed);
            }
            ALLOCATED_BYTES.fetch_add(new_size as u64, Ordering::Relaxed);
            ALLOCATION_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        new_ptr
    }
}

#[inline]
fn record_alloc(size: usize) {
    LIVE_BYTES.fetch_add(size, Ordering::Relaxed);
    ALLOCATED_BYTES.fetch_add(size as u64, Ordering::Relaxed);
    ALLOCATION_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Bytes currently held on the heap through [`TrackingAllocator`]
pub fn live_bytes() -> u64 {
    LIVE_BYTES.load(Ordering::Relaxed) as u64
}

/// Cumulative `(bytes, count)` allocated since the last reset
pub fn current_allocation() -> (u64, u64) {
    (
        ALLOCATED_BYTES.load(Ordering::Relaxed),
        ALLOCATION_COUNT.load(Ordering::Relaxed),
    )
}

/// Reset the cumulative counters. The live-bytes gauge is left untouched.
pub fn reset_allocation_counter() {
    ALLOCATED_BYTES.store(0, Ordering::Relaxed);
    ALLOCATION_COUNT.store(0, Ordering::Relaxed);
}

/// Source of "current process memory usage" in bytes.
///
/// A comparison run samples the probe before and after each candidate's
/// iteration loop; the difference is the reported memory delta. Any
/// `Fn() -> u64` closure is a probe, which keeps tests deterministic.
pub trait MemoryProbe {
    /// Current memory usage in bytes
    fn current_usage(&self) -> u64;
}

impl<F> MemoryProbe for F
where
    F: Fn() -> u64,
{
    fn current_usage(&self) -> u64 {
        self()
    }
}

/// Probe reading the [`TrackingAllocator`] live-bytes gauge.
///
/// Reads 0 when the tracking allocator is not installed, so every delta is 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapProbe;

impl MemoryProbe for HeapProbe {
    fn current_usage(&self) -> u64 {
        live_bytes()
    }
}
