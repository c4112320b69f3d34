#![warn(missing_docs)]
//! fncmp Report - Rendering Result Sets
//!
//! Turns a [`TestResultSet`] into display text:
//! - Table (fixed-width, for interactive terminals)
//! - HTML (markup table, for documents and browsers)
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)
//!
//! Every renderer is a pure function of the set it is given.

mod csv;
mod html;
mod json;
mod table;

pub use csv::{CsvFormatter, generate_csv_report};
pub use html::{HtmlFormatter, generate_html_report};
pub use json::{JsonFormatter, generate_json_report};
pub use table::{TableFormatter, generate_table_report};

use fncmp_core::TestResultSet;
use std::fmt;

/// Renders a result set into display text
pub trait ResultFormatter {
    /// Render `results`. Must not depend on anything but its input.
    fn format(&self, results: &TestResultSet) -> String;
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width table for terminals
    Table,
    /// HTML table
    Html,
    /// JSON document
    Json,
    /// CSV rows
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" | "human" => Ok(OutputFormat::Table),
            "html" | "markup" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Formatter chosen for a comparison report.
///
/// The built-in variants cover the shipped renderers; `Custom` carries any
/// caller-supplied [`ResultFormatter`].
pub enum Formatter {
    /// [`TableFormatter`]
    Table,
    /// [`HtmlFormatter`]
    Html,
    /// [`JsonFormatter`]
    Json,
    /// [`CsvFormatter`]
    Csv,
    /// Caller-supplied renderer
    Custom(Box<dyn ResultFormatter>),
}

impl Formatter {
    /// Default formatter for an output context: a table when writing to an
    /// interactive terminal, HTML otherwise.
    pub fn for_context(is_terminal: bool) -> Self {
        if is_terminal {
            Formatter::Table
        } else {
            Formatter::Html
        }
    }

    /// Wrap a caller-supplied renderer
    pub fn custom(formatter: impl ResultFormatter + 'static) -> Self {
        Formatter::Custom(Box::new(formatter))
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Formatter::Table => "table",
            Formatter::Html => "html",
            Formatter::Json => "json",
            Formatter::Csv => "csv",
            Formatter::Custom(_) => "custom",
        }
    }
}

impl From<OutputFormat> for Formatter {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => Formatter::Table,
            OutputFormat::Html => Formatter::Html,
            OutputFormat::Json => Formatter::Json,
            OutputFormat::Csv => Formatter::Csv,
        }
    }
}

impl ResultFormatter for Formatter {
    fn format(&self, results: &TestResultSet) -> String {
        match self {
            Formatter::Table => TableFormatter.format(results),
            Formatter::Html => HtmlFormatter.format(results),
            Formatter::Json => JsonFormatter.format(results),
            Formatter::Csv => CsvFormatter.format(results),
            Formatter::Custom(inner) => inner.format(results),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Formatter").field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fncmp_core::TestRunResult;

    struct LabelsOnly;

    impl ResultFormatter for LabelsOnly {
        fn format(&self, results: &TestResultSet) -> String {
            results
                .iter()
                .map(|r| r.label())
                .collect::<Vec<_>>()
                .join(",")
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("markup".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_context_selection() {
        assert_eq!(Formatter::for_context(true).name(), "table");
        assert_eq!(Formatter::for_context(false).name(), "html");
    }

    #[test]
    fn test_custom_formatter_dispatch() {
        let mut set = TestResultSet::new();
        set.push(TestRunResult::new("a", 0.1, 0.0, 1));
        set.push(TestRunResult::new("b", 0.2, 0.0, 1));

        let formatter = Formatter::custom(LabelsOnly);
        assert_eq!(formatter.name(), "custom");
        assert_eq!(formatter.format(&set), "a,b");
    }

    #[test]
    fn test_builtin_dispatch_matches_direct_call() {
        let mut set = TestResultSet::new();
        set.push(TestRunResult::new("a", 0.1, 0.0, 1));

        assert_eq!(Formatter::Table.format(&set), TableFormatter.format(&set));
        assert_eq!(
            Formatter::from(OutputFormat::Csv).format(&set),
            CsvFormatter.format(&set)
        );
    }
}
