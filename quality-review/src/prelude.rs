//! Prelude for commonly used types and traits in quality-review.

pub use crate::column::{CellValue, ColumnKind, ColumnView, TableView};
pub use crate::error::{ErrorContext, Result, ReviewError};
pub use crate::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
pub use crate::logging::LogConfig;
pub use crate::profiler::{ProfileOptions, Profiler, ProfilerBuilder};
pub use crate::report::{ReportRow, ReportTable};
pub use crate::sources::DataSource;
