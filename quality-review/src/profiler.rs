//! The column-by-column data quality profiler.
//!
//! For every column, in table order, the profiler classifies the declared
//! type and then computes, independently:
//!
//! - populated and null counts and the completeness percentage
//! - the range (min/max) for integer, decimal, date and datetime columns
//! - the negative values test for integer and decimal columns
//! - shortest and longest string length for string columns
//! - the distinct count and, below `max_unique_values`, the distinct list
//! - the opt-in alpha-only (no digits) and numeric-only (no letters) tests
//!
//! Opt-in column names are checked against the table before any column is
//! profiled, so a typo fails the whole call instead of silently skipping.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use quality_review::profiler::Profiler;
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Int64, true),
//!     Field::new("name", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![Some(1), Some(2), None])),
//!         Arc::new(StringArray::from(vec!["Al", "Bo", "Al"])),
//!     ],
//! )
//! .unwrap();
//!
//! let profiler = Profiler::builder()
//!     .check_negative(true)
//!     .alpha_only_columns(["name"])
//!     .build();
//! let report = profiler.profile(&batch).unwrap();
//!
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.rows()[0].completeness_display(), "66.67%");
//! assert_eq!(report.rows()[1].categorical_values.to_string(), "[Al, Bo]");
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::checks;
use crate::column::{CellValue, ColumnView, TableView};
use crate::error::{Result, ReviewError};
use crate::{log_column, log_review};
use crate::logging::{truncate_field, LogConfig};
use crate::report::{CategoricalValues, ReportRow, ReportTable};

/// Default cap on the number of distinct values listed per column.
pub const DEFAULT_MAX_UNIQUE_VALUES: usize = 20;

/// Options controlling a profiling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Distinct lists longer than this render as `...`
    pub max_unique_values: usize,
    /// Run the negative values test on integer and decimal columns
    pub check_negative: bool,
    /// Columns opted into the no-digits test
    pub alpha_only_columns: BTreeSet<String>,
    /// Columns opted into the no-letters test
    pub numeric_only_columns: BTreeSet<String>,
    /// Count a null as one distinct value and list it as `null`
    pub null_as_distinct: bool,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            max_unique_values: DEFAULT_MAX_UNIQUE_VALUES,
            check_negative: false,
            alpha_only_columns: BTreeSet::new(),
            numeric_only_columns: BTreeSet::new(),
            null_as_distinct: false,
        }
    }
}

impl ProfileOptions {
    /// Fails with [`ReviewError::UnknownColumn`] for the first opt-in name
    /// that is not one of `column_names`.
    pub fn validate_columns<'a>(&self, column_names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let known: HashSet<&str> = column_names.into_iter().collect();
        let opt_ins = [
            ("alpha_only_columns", &self.alpha_only_columns),
            ("numeric_only_columns", &self.numeric_only_columns),
        ];
        for (option, names) in opt_ins {
            if let Some(missing) = names.iter().find(|name| !known.contains(name.as_str())) {
                return Err(ReviewError::unknown_column(missing.as_str(), option));
            }
        }
        Ok(())
    }
}

/// Progress callback invoked before each column is profiled
pub type ProgressCallback = Arc<dyn Fn(ProfilerProgress) + Send + Sync>;

/// Progress information during profiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilerProgress {
    pub column_index: usize,
    pub total_columns: usize,
    pub column_name: String,
}

/// Builder for [`Profiler`]
#[derive(Default)]
pub struct ProfilerBuilder {
    options: ProfileOptions,
    log_config: LogConfig,
    progress_callback: Option<ProgressCallback>,
}

impl ProfilerBuilder {
    /// Set the distinct-value listing threshold
    pub fn max_unique_values(mut self, max: usize) -> Self {
        self.options.max_unique_values = max;
        self
    }

    /// Enable or disable the negative values test
    pub fn check_negative(mut self, enabled: bool) -> Self {
        self.options.check_negative = enabled;
        self
    }

    /// Opt columns into the no-digits test
    pub fn alpha_only_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .alpha_only_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Opt columns into the no-letters test
    pub fn numeric_only_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .numeric_only_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Treat null as a distinct value
    pub fn null_as_distinct(mut self, enabled: bool) -> Self {
        self.options.null_as_distinct = enabled;
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: ProfileOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Set progress callback
    pub fn progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProfilerProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Build the Profiler
    pub fn build(self) -> Profiler {
        Profiler {
            options: self.options,
            log_config: self.log_config,
            progress_callback: self.progress_callback,
        }
    }
}

/// Produces a [`ReportTable`] from any [`TableView`].
#[derive(Clone, Default)]
pub struct Profiler {
    options: ProfileOptions,
    log_config: LogConfig,
    progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for Profiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("options", &self.options)
            .field("log_config", &self.log_config)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Profiler {
    /// Create a new builder for Profiler
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    /// Create a Profiler with default options
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a Profiler with the given options
    pub fn with_options(options: ProfileOptions) -> Self {
        Self::builder().options(options).build()
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    /// Profiles every column of `table` and returns the report.
    ///
    /// Fails before any column is profiled if the table has duplicate column
    /// names or an opt-in set names a column the table does not have.
    #[instrument(skip_all)]
    pub fn profile(&self, table: &dyn TableView) -> Result<ReportTable> {
        let start_time = Instant::now();
        let columns = table.column_views()?;

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ReviewError::InvalidInput(format!(
                    "Duplicate column name '{}'",
                    column.name()
                )));
            }
        }
        self.options
            .validate_columns(columns.iter().map(|column| column.name()))?;

        log_review!(
            self.log_config,
            columns = columns.len(),
            check_negative = self.options.check_negative,
            max_unique_values = self.options.max_unique_values,
            "Starting data quality review"
        );

        let total_columns = columns.len();
        let rows = columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                self.report_progress(column_index, total_columns, column.name());
                self.profile_column(column.as_ref())
            })
            .collect::<Vec<_>>();

        log_review!(
            self.log_config,
            columns = total_columns,
            time_ms = start_time.elapsed().as_millis() as u64,
            "Completed data quality review"
        );

        Ok(ReportTable::new(rows))
    }

    /// Profiles a single column. Opt-in membership is looked up by the
    /// column's name; unknown names are not checked here.
    pub fn profile_column(&self, column: &dyn ColumnView) -> ReportRow {
        let name = column.name();
        let kind = column.kind();

        let total = column.count_total();
        let nulls = column.count_null();
        let populated = total.saturating_sub(nulls);
        let completeness = (total > 0).then(|| populated as f64 / total as f64);

        let (range_min, range_max) = if kind.is_ordered() {
            (column.min(), column.max())
        } else {
            (None, None)
        };

        let negative_values_test = checks::negative_values_test(column, self.options.check_negative);
        let (min_string_length, max_string_length) = checks::string_lengths(column).unzip();

        let distinct: Vec<CellValue> = column
            .distinct_ordered()
            .into_iter()
            .filter(|cell| self.options.null_as_distinct || !cell.is_null())
            .collect();
        let distinct_count = distinct.len();
        let categorical_values = if distinct_count <= self.options.max_unique_values {
            CategoricalValues::Listed(distinct)
        } else {
            CategoricalValues::Truncated
        };

        let alpha_only_test =
            checks::alpha_only_test(column, self.options.alpha_only_columns.contains(name));
        let numeric_only_test =
            checks::numeric_only_test(column, self.options.numeric_only_columns.contains(name));

        log_column!(
            self.log_config,
            column = name,
            data_type = %kind,
            populated,
            nulls,
            distinct = distinct_count,
            categorical = %truncate_field(&categorical_values.to_string(), self.log_config.max_field_length),
            "Profiled column"
        );

        ReportRow {
            column_name: name.to_string(),
            data_type: kind,
            populated,
            nulls,
            completeness,
            range_min,
            range_max,
            negative_values_test,
            min_string_length,
            max_string_length,
            distinct_count,
            categorical_values,
            alpha_only_test,
            numeric_only_test,
        }
    }

    /// Report progress to callback if configured
    fn report_progress(&self, column_index: usize, total_columns: usize, column_name: &str) {
        if let Some(callback) = &self.progress_callback {
            callback(ProfilerProgress {
                column_index,
                total_columns,
                column_name: column_name.to_string(),
            });
        }
    }
}

/// Profiles `table` with `options`.
pub fn profile(table: &dyn TableView, options: &ProfileOptions) -> Result<ReportTable> {
    Profiler::with_options(options.clone()).profile(table)
}
