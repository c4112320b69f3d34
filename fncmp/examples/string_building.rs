//! String Building Strategies
//!
//! Compares three ways of building the same comma-separated string. The
//! tracking allocator is installed so the memory column is populated.
//!
//! Run with: cargo run --example string_building -p fncmp --release
//! Pipe the output (`| cat`) to get the HTML report instead of the table.

use fncmp::{ComparisonRunner, FncmpConfig, TrackingAllocator};
use std::fmt::Write;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn main() {
    fncmp::init_logging(std::env::var_os("FNCMP_VERBOSE").is_some());

    let config = FncmpConfig::discover().unwrap_or_default();
    let mut runner = ComparisonRunner::from_config(&config);

    runner
        .add_function("push_str + format!", || {
            let mut s = String::new();
            for i in 0..200 {
                s.push_str(&format!("{i},"));
            }
            s
        })
        .add_fallible("write!", || {
            let mut s = String::with_capacity(1024);
            for i in 0..200 {
                write!(s, "{i},")?;
            }
            Ok::<_, std::fmt::Error>(s)
        })
        .add_function("collect + join", || {
            (0..200)
                .map(|i: u32| i.to_string())
                .collect::<Vec<_>>()
                .join(",")
        });

    if let Err(e) = runner.exec() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
