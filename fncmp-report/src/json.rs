//! JSON Output

use crate::ResultFormatter;
use fncmp_core::TestResultSet;

/// Renders results as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl ResultFormatter for JsonFormatter {
    fn format(&self, results: &TestResultSet) -> String {
        generate_json_report(results)
            .unwrap_or_else(|e| format!("{{\"error\": {:?}}}", e.to_string()))
    }
}

/// Generate a prettified JSON report.
///
/// Serializes the result set, timestamp included, into machine-readable JSON.
pub fn generate_json_report(results: &TestResultSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
