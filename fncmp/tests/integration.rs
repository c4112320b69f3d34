//! Integration tests for fncmp
//!
//! These tests drive the public API end to end: registration, the run loop,
//! and rendering through the built-in formatters.

use fncmp::{
    ComparisonError, ComparisonRunner, Formatter, FncmpConfig, ResultFormatter, TableFormatter,
    TestResultSet, TestRunResult,
};
use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

/// A no-op candidate yields exactly one non-negative measurement
#[test]
fn test_noop_single_result() {
    for num_runs in [1, 10, 1000] {
        let mut runner = ComparisonRunner::new();
        runner.set_num_runs(num_runs);
        runner.add_function("noop", || ());

        let results = runner.run().unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.results()[0].elapsed_seconds() >= 0.0);
    }
}

/// K distinct labels give K results in registration order
#[test]
fn test_results_follow_registration_order() {
    let labels = ["zeta", "alpha", "mid", "beta"];
    let mut runner = ComparisonRunner::new();
    runner.set_num_runs(2);
    for label in labels {
        runner.add_function(label, || ());
    }
    // Re-registering does not add a row
    runner.add_function("alpha", || 1 + 1);

    let results = runner.run().unwrap();
    let got: Vec<_> = results.iter().map(|r| r.label()).collect();
    assert_eq!(got, labels);
}

/// Zero iterations is valid and measures next to nothing
#[test]
fn test_zero_runs() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut runner = ComparisonRunner::new();
    runner.set_num_runs(0);
    runner.add_function("never", move || counter.set(counter.get() + 1));

    let results = runner.run().unwrap();
    assert_eq!(calls.get(), 0);
    assert_eq!(results.len(), 1);
    assert!(results.results()[0].elapsed_seconds() < 0.01);
    assert_eq!(results.results()[0].iterations(), 0);
}

/// A failure on the 3rd of 10 iterations aborts the run
#[test]
fn test_fail_fast() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut runner = ComparisonRunner::new();
    runner.set_num_runs(10);
    runner.add_function("ok", || ());
    runner.add_fallible("broken", move || {
        counter.set(counter.get() + 1);
        if counter.get() == 3 {
            Err(std::io::Error::other("disk on fire"))
        } else {
            Ok(counter.get())
        }
    });

    let err = runner.run().unwrap_err();
    assert!(matches!(
        err,
        ComparisonError::CandidateFailed { ref label, iteration: 3, .. } if label == "broken"
    ));
    assert!(err.to_string().contains("disk on fire"));
    assert_eq!(calls.get(), 3);
}

fn explode() {
    panic!("candidate exploded");
}

/// A panicking candidate is not caught by the runner
#[test]
#[should_panic(expected = "candidate exploded")]
fn test_panics_propagate() {
    let mut runner = ComparisonRunner::new();
    runner.set_num_runs(5);
    runner.add_function("panics", explode);
    let _ = runner.run();
}

/// A 1ms sleep is clearly slower than a no-op
#[test]
fn test_sleep_slower_than_noop() {
    let mut runner = ComparisonRunner::new();
    runner.set_num_runs(10);
    runner
        .add_function("noop", || ())
        .add_function("sleep1ms", || std::thread::sleep(Duration::from_millis(1)));

    let results = runner.run().unwrap();
    let rows = results.results();
    assert_eq!(rows[0].label(), "noop");
    assert_eq!(rows[1].label(), "sleep1ms");
    assert!(rows[1].elapsed_seconds() >= 0.01);
    assert!(rows[1].elapsed_seconds() > rows[0].elapsed_seconds());
}

/// No candidates: empty set, header-only table
#[test]
fn test_empty_run_renders_header() {
    let mut runner = ComparisonRunner::new();
    let results = runner.run().unwrap();
    assert!(results.is_empty());

    let table = TableFormatter.format(&results);
    assert!(table.contains("Test"));
    assert_eq!(table.lines().filter(|l| l.starts_with("| ")).count(), 1);

    let mut out = Vec::new();
    runner.exec_to(&mut out, true).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Memory (MB)"));
}

/// Every built-in formatter is a pure function of the set
#[test]
fn test_formatting_is_idempotent() {
    let mut set = TestResultSet::new();
    set.push(TestRunResult::new("a", 0.0042, 0.0, 100));
    set.push(TestRunResult::new("b", 1.5, -0.125, 100));

    for formatter in [
        Formatter::Table,
        Formatter::Html,
        Formatter::Json,
        Formatter::Csv,
    ] {
        assert_eq!(formatter.format(&set), formatter.format(&set));
    }
}

/// Two rows: both labels appear on distinct lines
#[test]
fn test_two_row_table() {
    let mut set = TestResultSet::new();
    set.push(TestRunResult::new("first_label", 0.1, 0.0, 1));
    set.push(TestRunResult::new("second_label", 0.2, 0.0, 1));

    let table = TableFormatter.format(&set);
    let first = table.lines().position(|l| l.contains("first_label")).unwrap();
    let second = table.lines().position(|l| l.contains("second_label")).unwrap();
    assert_ne!(first, second);
}

/// Configuration drives iteration count and output format
#[test]
fn test_runner_from_config() {
    let config: FncmpConfig = toml::from_str(
        r#"
        [runner]
        num_runs = 7

        [output]
        format = "json"
        "#,
    )
    .unwrap();

    let mut runner = ComparisonRunner::from_config(&config);
    assert_eq!(runner.num_runs(), 7);
    runner.add_function("noop", || ());

    // Configured format beats the terminal default
    let mut out = Vec::new();
    runner.exec_to(&mut out, true).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["results"][0]["label"], "noop");
    assert_eq!(json["results"][0]["iterations"], 7);
}

/// Memory deltas come from the injected probe
#[test]
fn test_probe_injection() {
    let usage = Rc::new(Cell::new(0u64));
    let probe = Rc::clone(&usage);
    let alloc = Rc::clone(&usage);

    let mut runner = ComparisonRunner::load(Some(8)).with_probe(move || probe.get());
    runner.add_function("alloc_128k", move || alloc.set(alloc.get() + 131_072));

    let results = runner.run().unwrap();
    assert_eq!(results.results()[0].memory_delta_mb(), 1.0);
}

/// Candidates may write to stdout from other threads while `exec()` runs
#[test]
fn test_exec_does_not_hold_stdout_during_run() {
    let (done_tx, done_rx) = mpsc::channel();

    std::thread::spawn(move || {
        let mut runner = ComparisonRunner::new();
        runner.set_num_runs(2);
        runner.set_formatter(Formatter::Csv);
        runner.add_function("stdout_from_thread", || {
            std::thread::spawn(|| {
                let _ = writeln!(std::io::stdout(), "from worker");
            })
            .join()
            .unwrap();
        });

        let outcome = runner.exec().map_err(|e| e.to_string());
        let _ = done_tx.send(outcome);
    });

    let outcome = done_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("exec() did not finish while a candidate thread wrote to stdout");
    assert!(outcome.is_ok());
}
