//! File-backed tables for the profiler.
//!
//! Sources register a file with a DataFusion [`SessionContext`]; the table is
//! then collected into a single in-memory [`RecordBatch`] and profiled.
//!
//! # Example
//!
//! ```rust,no_run
//! use quality_review::profiler::Profiler;
//! use quality_review::sources::{profile_source, CsvSource};
//!
//! # async fn example() -> quality_review::error::Result<()> {
//! let source = CsvSource::new("data/customers.csv")?;
//! let report = profile_source(&source, &Profiler::new()).await?;
//! println!("{} columns profiled", report.len());
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use tracing::instrument;

use crate::error::{Result, ReviewError};
use crate::log_data_op;
use crate::profiler::Profiler;
use crate::report::ReportTable;

mod csv;
mod parquet;

pub use csv::{CsvOptions, CsvSource};
pub use parquet::ParquetSource;

/// Table name used by [`profile_source`] for its private context.
pub const SOURCE_TABLE_NAME: &str = "review_source";

/// A file that can be registered as a table with a DataFusion context.
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Registers this source with `ctx` under `table_name`.
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()>;

    /// Returns a human-readable description of this data source.
    fn description(&self) -> String;
}

/// File extension of `path` with its leading dot, e.g. `.tsv`.
pub(crate) fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}

/// Fails with a data source error unless `path` names an existing file.
pub(crate) fn ensure_file(source_type: &str, path: &str) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(ReviewError::data_source(
            source_type,
            format!("Not a file: {path}"),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ReviewError::data_source(
            source_type,
            format!("File not found: {path}"),
        )),
        Err(e) => Err(ReviewError::data_source_with_source(
            source_type,
            format!("Cannot access {path}"),
            Box::new(e),
        )),
    }
}

/// Collects every batch of a registered table into one record batch.
#[instrument(skip(ctx))]
pub async fn collect_table(ctx: &SessionContext, table_name: &str) -> Result<RecordBatch> {
    let df = ctx.table(table_name).await?;
    let logical_schema = df.schema().inner().clone();
    let batches = df.collect().await?;

    let schema = batches
        .first()
        .map(RecordBatch::schema)
        .unwrap_or(logical_schema);
    Ok(concat_batches(&schema, &batches)?)
}

/// Collects `table_name` from `ctx` and profiles it.
#[instrument(skip(ctx, profiler))]
pub async fn profile_table(
    ctx: &SessionContext,
    table_name: &str,
    profiler: &Profiler,
) -> Result<ReportTable> {
    let batch = collect_table(ctx, table_name).await?;
    log_data_op!(
        profiler.log_config(),
        table = table_name,
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "Collected table for review"
    );
    profiler.profile(&batch)
}

/// Registers `source` with a fresh context and profiles it.
pub async fn profile_source(source: &dyn DataSource, profiler: &Profiler) -> Result<ReportTable> {
    let ctx = SessionContext::new();
    log_data_op!(
        profiler.log_config(),
        source = %source.description(),
        "Registering data source"
    );
    source.register(&ctx, SOURCE_TABLE_NAME).await?;
    profile_table(&ctx, SOURCE_TABLE_NAME, profiler).await
}
