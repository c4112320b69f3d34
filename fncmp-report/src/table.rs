//! Table Output
//!
//! Fixed-width table for terminal display:
//!
//! ```text
//! +-----------+----------+-------------+
//! | Test      | Time (s) | Memory (MB) |
//! +-----------+----------+-------------+
//! | noop      |   0.0001 |      0.0000 |
//! | sleep_1ms |   0.0112 |      0.0000 |
//! +-----------+----------+-------------+
//! ```

use crate::ResultFormatter;
use fncmp_core::TestResultSet;

const LABEL_HEADER: &str = "Test";
const TIME_HEADER: &str = "Time (s)";
const MEMORY_HEADER: &str = "Memory (MB)";

/// Renders results as a column-aligned text table
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatter;

impl ResultFormatter for TableFormatter {
    fn format(&self, results: &TestResultSet) -> String {
        generate_table_report(results)
    }
}

/// Format a result set as a fixed-width table.
///
/// Control characters in labels (newlines, tabs) are shown as spaces so each
/// result stays on one row. Widths count `char`s, so double-width glyphs
/// (CJK, emoji) still push their row's right border out of line.
pub fn generate_table_report(results: &TestResultSet) -> String {
    let rows: Vec<(String, String, String)> = results
        .iter()
        .map(|r| {
            (
                single_line(r.label()),
                format!("{:.4}", r.elapsed_seconds()),
                format!("{:.4}", r.memory_delta_mb()),
            )
        })
        .collect();

    // Column widths from the widest cell (header included)
    let label_width = rows
        .iter()
        .map(|(label, _, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .max(LABEL_HEADER.len());
    let time_width = rows
        .iter()
        .map(|(_, time, _)| time.len())
        .max()
        .unwrap_or(0)
        .max(TIME_HEADER.len());
    let memory_width = rows
        .iter()
        .map(|(_, _, memory)| memory.len())
        .max()
        .unwrap_or(0)
        .max(MEMORY_HEADER.len());

    let separator = format!(
        "+-{}-+-{}-+-{}-+\n",
        "-".repeat(label_width),
        "-".repeat(time_width),
        "-".repeat(memory_width)
    );

    let mut output = String::new();
    output.push_str(&separator);
    output.push_str(&format!(
        "| {:<lw$} | {:<tw$} | {:<mw$} |\n",
        LABEL_HEADER,
        TIME_HEADER,
        MEMORY_HEADER,
        lw = label_width,
        tw = time_width,
        mw = memory_width
    ));
    output.push_str(&separator);

    for (label, time, memory) in &rows {
        output.push_str(&format!(
            "| {:<lw$} | {:>tw$} | {:>mw$} |\n",
            label,
            time,
            memory,
            lw = label_width,
            tw = time_width,
            mw = memory_width
        ));
    }

    if !rows.is_empty() {
        output.push_str(&separator);
    }

    output
}

fn single_line(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
