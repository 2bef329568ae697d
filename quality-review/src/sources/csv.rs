//! CSV file source.

use std::sync::Arc;

use arrow::datatypes::Schema;
use async_trait::async_trait;
use datafusion::prelude::{CsvReadOptions, SessionContext};
use tracing::{info, instrument};

use super::{ensure_file, extension_of, DataSource};
use crate::error::{Result, ReviewError};

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Schema to use (if None, will be inferred)
    pub schema: Option<Arc<Schema>>,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
    /// File extension DataFusion should accept; taken from the path when None
    pub file_extension: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            schema: None,
            schema_infer_max_records: 1000,
            file_extension: None,
        }
    }
}

/// A CSV file data source with schema inference.
///
/// Column types come from DataFusion's inference, so a column of whole
/// numbers profiles as `integer` and ISO dates profile as `date`.
///
/// # Examples
///
/// ```rust,no_run
/// use quality_review::sources::{CsvOptions, CsvSource};
///
/// # fn example() -> quality_review::error::Result<()> {
/// let source = CsvSource::new("data/users.csv")?;
///
/// let options = CsvOptions {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// let source = CsvSource::with_options("data/users.tsv", options)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: String,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source from a single file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<String>, options: CsvOptions) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(ReviewError::Configuration(
                "CSV path must not be empty".to_string(),
            ));
        }
        Ok(Self { path, options })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    fn file_extension(&self) -> String {
        self.options
            .file_extension
            .clone()
            .or_else(|| extension_of(&self.path))
            .unwrap_or_else(|| ".csv".to_string())
    }
}

#[async_trait]
impl DataSource for CsvSource {
    #[instrument(skip(self, ctx), fields(
        table.name = %table_name,
        source.type = "csv",
        csv.delimiter = self.options.delimiter,
        csv.has_header = self.options.has_header
    ))]
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        ensure_file("CSV", &self.path)?;

        let file_extension = self.file_extension();
        let mut read_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .schema_infer_max_records(self.options.schema_infer_max_records)
            .file_extension(&file_extension);
        if let Some(schema) = &self.options.schema {
            read_options = read_options.schema(schema);
        }

        ctx.register_csv(table_name, &self.path, read_options)
            .await?;

        info!(
            table.name = %table_name,
            source.path = %self.path,
            "Registered CSV data source"
        );
        Ok(())
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path)
    }
}
