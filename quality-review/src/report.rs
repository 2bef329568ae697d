//! The data quality report: one row of metrics and test outcomes per column.
//!
//! Rows keep typed values so callers can inspect them directly; every field
//! also has a fixed display string, which is what [`ReportTable::to_string_rows`],
//! [`ReportTable::to_record_batch`] and the serde representation expose.

use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Serialize, Serializer};

use crate::column::{CellValue, ColumnKind};
use crate::error::{ErrorContext, Result};

/// Placeholder for metrics that do not apply to a column.
pub const NOT_APPLICABLE: &str = "N/A";

/// Rendering of a distinct-value list that exceeded `max_unique_values`.
pub const TRUNCATED_VALUES: &str = "...";

/// Report column headers, in output order.
pub const REPORT_HEADERS: [&str; 14] = [
    "Column Name",
    "Data Type",
    "Num. Populated Values",
    "Num. Null Records",
    "Completeness %",
    "Range Minimum",
    "Range Maximum",
    "Negative Values Test",
    "Minimum String Length",
    "Maximum String Length",
    "Num. Distinct Values",
    "Categorical Values",
    "Alpha Only Test",
    "Numeric Only Test",
];

fn serialize_display<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

fn serialize_or_na<T, S>(value: &Option<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_str(NOT_APPLICABLE),
    }
}

fn serialize_percent<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_percent(*value))
}

/// Formats a fraction as a two-decimal percentage, or `N/A`.
pub fn format_percent(fraction: Option<f64>) -> String {
    match fraction {
        Some(fraction) => format!("{:.2}%", fraction * 100.0),
        None => NOT_APPLICABLE.to_string(),
    }
}

fn display_or_na<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), ToString::to_string)
}

/// Outcome of the sign check on a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeValuesTest {
    /// The check was disabled
    NotTested,
    /// No value below zero
    Pass,
    /// `negatives` values below zero
    Fail { negatives: u64 },
    /// The column is not integer or decimal
    NotApplicable,
}

impl fmt::Display for NegativeValuesTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTested => f.write_str("Not Tested"),
            Self::Pass => f.write_str("Pass"),
            Self::Fail { negatives } => write!(f, "Fail - {negatives} neg. values"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Outcome of the no-digits check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaOnlyTest {
    /// The column was not opted in
    NotTested,
    /// No cell contains a digit
    Pass,
    /// `records` cells contain at least one digit
    Fail { records: u64 },
    /// The column was opted in but is not a string column
    NonStringSkipped,
}

impl fmt::Display for AlphaOnlyTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTested => f.write_str("Not Tested"),
            Self::Pass => f.write_str("Pass"),
            Self::Fail { records } => write!(f, "Fail - {records} records"),
            Self::NonStringSkipped => f.write_str("Non-String Field Skipped"),
        }
    }
}

/// Outcome of the no-letters check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOnlyTest {
    /// The column was not opted in
    NotTested,
    /// No cell contains a letter (always the case for numeric and temporal columns)
    Pass,
    /// `records` cells contain at least one letter
    Fail { records: u64 },
}

impl fmt::Display for NumericOnlyTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTested => f.write_str("Not Tested"),
            Self::Pass => f.write_str("Pass"),
            Self::Fail { records } => write!(f, "Fail - {records} records"),
        }
    }
}

/// Distinct values of a low-cardinality column, or the truncation marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoricalValues {
    /// Every distinct value in first-occurrence order
    Listed(Vec<CellValue>),
    /// More distinct values than `max_unique_values`
    Truncated,
}

impl fmt::Display for CategoricalValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Truncated => f.write_str(TRUNCATED_VALUES),
        }
    }
}

/// Metrics and test outcomes for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Column Name")]
    pub column_name: String,
    #[serde(rename = "Data Type")]
    pub data_type: ColumnKind,
    #[serde(rename = "Num. Populated Values")]
    pub populated: usize,
    #[serde(rename = "Num. Null Records")]
    pub nulls: usize,
    /// Fraction of populated cells; `None` when the column has no cells
    #[serde(rename = "Completeness %", serialize_with = "serialize_percent")]
    pub completeness: Option<f64>,
    #[serde(rename = "Range Minimum", serialize_with = "serialize_or_na")]
    pub range_min: Option<CellValue>,
    #[serde(rename = "Range Maximum", serialize_with = "serialize_or_na")]
    pub range_max: Option<CellValue>,
    #[serde(rename = "Negative Values Test", serialize_with = "serialize_display")]
    pub negative_values_test: NegativeValuesTest,
    #[serde(rename = "Minimum String Length", serialize_with = "serialize_or_na")]
    pub min_string_length: Option<usize>,
    #[serde(rename = "Maximum String Length", serialize_with = "serialize_or_na")]
    pub max_string_length: Option<usize>,
    #[serde(rename = "Num. Distinct Values")]
    pub distinct_count: usize,
    #[serde(rename = "Categorical Values", serialize_with = "serialize_display")]
    pub categorical_values: CategoricalValues,
    #[serde(rename = "Alpha Only Test", serialize_with = "serialize_display")]
    pub alpha_only_test: AlphaOnlyTest,
    #[serde(rename = "Numeric Only Test", serialize_with = "serialize_display")]
    pub numeric_only_test: NumericOnlyTest,
}

impl ReportRow {
    /// Total number of cells the row was computed from.
    pub fn total(&self) -> usize {
        self.populated + self.nulls
    }

    /// Completeness rendered as `NN.NN%` or `N/A`.
    pub fn completeness_display(&self) -> String {
        format_percent(self.completeness)
    }

    /// Every field as its report string, in [`REPORT_HEADERS`] order.
    pub fn to_strings(&self) -> [String; 14] {
        [
            self.column_name.clone(),
            self.data_type.to_string(),
            self.populated.to_string(),
            self.nulls.to_string(),
            self.completeness_display(),
            display_or_na(self.range_min.as_ref()),
            display_or_na(self.range_max.as_ref()),
            self.negative_values_test.to_string(),
            display_or_na(self.min_string_length.as_ref()),
            display_or_na(self.max_string_length.as_ref()),
            self.distinct_count.to_string(),
            self.categorical_values.to_string(),
            self.alpha_only_test.to_string(),
            self.numeric_only_test.to_string(),
        ]
    }
}

/// The complete report, one row per profiled column in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportTable {
    rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Builds the report from its finished rows.
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    /// The rows in table column order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Looks up the row for a column by name.
    pub fn row(&self, column_name: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.column_name == column_name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The report headers.
    pub fn headers(&self) -> &'static [&'static str; 14] {
        &REPORT_HEADERS
    }

    /// Every row rendered to strings.
    pub fn to_string_rows(&self) -> Vec<[String; 14]> {
        self.rows.iter().map(ReportRow::to_strings).collect()
    }

    /// Converts the report into an Arrow record batch of Utf8 columns named
    /// after [`REPORT_HEADERS`].
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = Arc::new(Schema::new(
            REPORT_HEADERS
                .iter()
                .map(|header| Field::new(*header, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        ));
        let rendered = self.to_string_rows();
        let columns = (0..REPORT_HEADERS.len())
            .map(|field| {
                let values = rendered.iter().map(|row| row[field].as_str());
                Arc::new(StringArray::from_iter_values(values)) as ArrayRef
            })
            .collect::<Vec<_>>();

        RecordBatch::try_new(schema, columns).context("Failed to build report record batch")
    }
}

impl IntoIterator for ReportTable {
    type Item = ReportRow;
    type IntoIter = std::vec::IntoIter<ReportRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReportTable {
    type Item = &'a ReportRow;
    type IntoIter = std::slice::Iter<'a, ReportRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
