//! HTML Output

use crate::ResultFormatter;
use fncmp_core::TestResultSet;

/// Renders results as an HTML `<table>`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl ResultFormatter for HtmlFormatter {
    fn format(&self, results: &TestResultSet) -> String {
        generate_html_report(results)
    }
}

/// Format a result set as an HTML table fragment
pub fn generate_html_report(results: &TestResultSet) -> String {
    let mut html = String::new();

    html.push_str("<table class=\"fncmp-results\">\n");
    html.push_str("  <thead>\n");
    html.push_str("    <tr><th>Test</th><th>Time (s)</th><th>Memory (MB)</th></tr>\n");
    html.push_str("  </thead>\n");
    html.push_str("  <tbody>\n");

    for result in results {
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{:.4}</td><td>{:.4}</td></tr>\n",
            escape_html(result.label()),
            result.elapsed_seconds(),
            result.memory_delta_mb()
        ));
    }

    html.push_str("  </tbody>\n");
    html.push_str("</table>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
