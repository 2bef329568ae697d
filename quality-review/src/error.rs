//! Error types for the quality-review library.
//!
//! Every fallible operation returns [`ReviewError`] through the crate-wide
//! [`Result`] alias. Per-column problems that the report can express (empty
//! columns, tests that do not apply to a column's type) are not errors; they
//! surface as sentinels such as `N/A` in the report row.

use thiserror::Error;

/// The main error type for the quality-review library.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The table handed to the profiler is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A column named in an opt-in test set does not exist in the table.
    #[error("Column '{column}' named in {option} not found in table")]
    UnknownColumn {
        /// The missing column name
        column: String,
        /// The option that referenced it (e.g. `alpha_only_columns`)
        option: String,
    },

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV", "Parquet")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ReviewError>`.
pub type Result<T> = std::result::Result<T, ReviewError>;

impl ReviewError {
    /// Creates an unknown column error for the given option name.
    pub fn unknown_column(column: impl Into<String>, option: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
            option: option.into(),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }
}

impl From<serde_json::Error> for ReviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ReviewError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            ReviewError::Internal(inner) => ReviewError::Internal(format!("{}: {inner}", f())),
            other => ReviewError::Internal(format!("{}: {other}", f())),
        })
    }
}
