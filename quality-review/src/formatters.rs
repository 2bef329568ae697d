//! Report rendering for profiling results.
//!
//! Three formatters ship with the crate: [`HumanFormatter`] for terminals,
//! [`JsonFormatter`] for programmatic consumption and [`MarkdownFormatter`]
//! for documentation.
//!
//! # Examples
//!
//! ```rust
//! use quality_review::formatters::{HumanFormatter, ReportFormatter};
//! use quality_review::report::ReportTable;
//!
//! let formatter = HumanFormatter::new();
//! let output = formatter.format(&ReportTable::default()).unwrap();
//! assert!(output.contains("0 columns"));
//! ```

use serde_json::Value;

use crate::error::Result;
use crate::report::{ReportRow, ReportTable, REPORT_HEADERS};

/// Headers of the three test columns, hidden when `include_tests` is off.
const TEST_HEADERS: [&str; 3] = [
    "Negative Values Test",
    "Alpha Only Test",
    "Numeric Only Test",
];

const CATEGORICAL_HEADER: &str = "Categorical Values";

/// Configuration options for formatting reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the negative/alpha/numeric test outcomes
    pub include_tests: bool,
    /// Maximum rendered width of the categorical value list (None for unlimited)
    pub max_value_width: Option<usize>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_tests: true,
            max_value_width: None,
        }
    }
}

impl FormatterConfig {
    /// Creates a compact configuration: no test columns and short value lists.
    pub fn minimal() -> Self {
        Self {
            include_tests: false,
            max_value_width: Some(60),
        }
    }

    /// Sets whether to include the test outcome columns.
    pub fn with_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    /// Sets the maximum width of the categorical value list.
    pub fn with_max_value_width(mut self, width: usize) -> Self {
        self.max_value_width = Some(width);
        self
    }

    fn shows(&self, header: &str) -> bool {
        self.include_tests || !TEST_HEADERS.contains(&header)
    }

    fn visible_headers(&self) -> Vec<&'static str> {
        REPORT_HEADERS
            .iter()
            .copied()
            .filter(|header| self.shows(header))
            .collect()
    }

    fn truncate(&self, value: &str) -> String {
        match self.max_value_width {
            Some(width) => match value.char_indices().nth(width) {
                Some((cut, _)) => format!("{}...(truncated)", &value[..cut]),
                None => value.to_string(),
            },
            None => value.to_string(),
        }
    }

    /// A row as (header, rendered value) pairs, filtered and truncated.
    fn cells(&self, row: &ReportRow) -> Vec<(&'static str, String)> {
        REPORT_HEADERS
            .iter()
            .copied()
            .zip(row.to_strings())
            .filter(|(header, _)| self.shows(header))
            .map(|(header, value)| {
                if header == CATEGORICAL_HEADER {
                    (header, self.truncate(&value))
                } else {
                    (header, value)
                }
            })
            .collect()
    }
}

/// Trait for rendering a [`ReportTable`] into an output format.
///
/// # Examples
///
/// ```rust
/// use quality_review::formatters::ReportFormatter;
/// use quality_review::report::ReportTable;
///
/// struct RowCount;
///
/// impl ReportFormatter for RowCount {
///     fn format(&self, report: &ReportTable) -> quality_review::error::Result<String> {
///         Ok(format!("{} rows", report.len()))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Formats a report into a string representation.
    fn format(&self, report: &ReportTable) -> Result<String>;

    /// Formats a report with a custom configuration. The default
    /// implementation ignores the configuration.
    fn format_with_config(&self, report: &ReportTable, _config: &FormatterConfig) -> Result<String> {
        self.format(report)
    }
}

/// Formats the report as a JSON array with one object per column, keyed by
/// the report headers.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &ReportTable) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &ReportTable, config: &FormatterConfig) -> Result<String> {
        let mut value = serde_json::to_value(report)?;
        if let Value::Array(rows) = &mut value {
            for row in rows.iter_mut().filter_map(Value::as_object_mut) {
                if !config.include_tests {
                    for header in TEST_HEADERS {
                        row.remove(header);
                    }
                }
                if let Some(Value::String(values)) = row.get_mut(CATEGORICAL_HEADER) {
                    *values = config.truncate(values);
                }
            }
        }

        let output = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(output)
    }
}

/// Formats the report as aligned plain text, one block per column.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &ReportTable) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &ReportTable, config: &FormatterConfig) -> Result<String> {
        let label_width = config
            .visible_headers()
            .iter()
            .map(|header| header.len())
            .max()
            .unwrap_or(0);

        let mut lines = vec![format!("Data quality report: {} columns", report.len())];
        for row in report {
            lines.push(String::new());
            for (header, value) in config.cells(row) {
                lines.push(format!("  {header:<label_width$}  {value}"));
            }
        }
        lines.push(String::new());
        Ok(lines.join("\n"))
    }
}

/// Formats the report as a GitHub-flavored Markdown table.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a new Markdown formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a new Markdown formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the heading level for the title; 0 omits the title.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.min(6);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &ReportTable) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &ReportTable, config: &FormatterConfig) -> Result<String> {
        let headers = config.visible_headers();
        let mut lines = Vec::with_capacity(report.len() + 4);

        if self.heading_level > 0 {
            let h = "#".repeat(self.heading_level as usize);
            lines.push(format!("{h} Data Quality Report"));
            lines.push(String::new());
        }

        lines.push(format!("| {} |", headers.join(" | ")));
        lines.push(format!("|{}", "---|".repeat(headers.len())));
        for row in report {
            let cells = config
                .cells(row)
                .into_iter()
                .map(|(_, value)| escape_markdown_cell(&value))
                .collect::<Vec<_>>();
            lines.push(format!("| {} |", cells.join(" | ")));
        }
        lines.push(String::new());
        Ok(lines.join("\n"))
    }
}
