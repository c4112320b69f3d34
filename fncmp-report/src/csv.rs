//! CSV Output

use crate::ResultFormatter;
use fncmp_core::TestResultSet;

/// Renders results as CSV rows
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl ResultFormatter for CsvFormatter {
    fn format(&self, results: &TestResultSet) -> String {
        generate_csv_report(results)
    }
}

/// Generate a CSV report with one row per result
pub fn generate_csv_report(results: &TestResultSet) -> String {
    let mut csv = String::from("label,elapsed_seconds,memory_delta_mb,iterations\n");

    for result in results {
        csv.push_str(&format!(
            "{},{:.4},{:.4},{}\n",
            quote(result.label()),
            result.elapsed_seconds(),
            result.memory_delta_mb(),
            result.iterations()
        ));
    }

    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
