//! Parquet file source.

use async_trait::async_trait;
use datafusion::prelude::{ParquetReadOptions, SessionContext};
use tracing::{info, instrument};

use super::{ensure_file, extension_of, DataSource};
use crate::error::{Result, ReviewError};

/// A single Parquet file. The schema is read from the file footer.
#[derive(Debug, Clone)]
pub struct ParquetSource {
    path: String,
}

impl ParquetSource {
    /// Creates a new Parquet source from a single file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(ReviewError::Configuration(
                "Parquet path must not be empty".to_string(),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl DataSource for ParquetSource {
    #[instrument(skip(self, ctx), fields(table_name = %table_name, source_type = "parquet"))]
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        ensure_file("Parquet", &self.path)?;

        let file_extension = extension_of(&self.path).unwrap_or_else(|| ".parquet".to_string());
        let options = ParquetReadOptions {
            file_extension: &file_extension,
            ..Default::default()
        };
        ctx.register_parquet(table_name, &self.path, options)
            .await?;

        info!(
            table.name = %table_name,
            source.path = %self.path,
            "Registered Parquet data source"
        );
        Ok(())
    }

    fn description(&self) -> String {
        format!("Parquet file: {}", self.path)
    }
}
