//! # quality-review - Column Profiling for Rust
//!
//! quality-review produces a per-column data quality report for a tabular
//! dataset: completeness, value ranges, string lengths, distinct values and
//! a few rule checks (no negative numbers, no digits, no letters). It reads
//! Arrow record batches directly and uses DataFusion to load CSV and Parquet
//! files.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use quality_review::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("amount", DataType::Int64, true),
//!     Field::new("code", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![Some(-5), Some(10), None])),
//!         Arc::new(StringArray::from(vec!["AB", "C1", "DE"])),
//!     ],
//! )?;
//!
//! let report = Profiler::builder()
//!     .check_negative(true)
//!     .alpha_only_columns(["code"])
//!     .build()
//!     .profile(&batch)?;
//!
//! println!("{}", HumanFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Report columns
//!
//! Every input column yields one [`report::ReportRow`] with the fields named
//! in [`report::REPORT_HEADERS`]. Metrics that do not apply to a column's
//! type render as `N/A`, and opt-in tests that were not requested render as
//! `Not Tested`.
//!
//! ## Files
//!
//! ```rust,no_run
//! use quality_review::prelude::*;
//! use quality_review::sources::{profile_source, ParquetSource};
//!
//! # async fn example() -> Result<()> {
//! let source = ParquetSource::new("data/orders.parquet")?;
//! let report = profile_source(&source, &Profiler::new()).await?;
//! println!("{}", JsonFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`column`**: the `ColumnView`/`TableView` capability traits and the Arrow adapter
//! - **`checks`**: sign, string length and digit/letter composition checks
//! - **`profiler`**: the profiler, its options and builder
//! - **`report`**: report rows, outcome types and rendering to strings or Arrow
//! - **`sources`**: CSV and Parquet sources registered through DataFusion
//! - **`formatters`**: human, JSON and Markdown renderers
//! - **`logging`**: profiler log configuration and subscriber setup

pub mod checks;
pub mod column;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod profiler;
pub mod report;
pub mod sources;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
