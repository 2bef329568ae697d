//! Profiles a CSV file and prints the human-readable report.
//!
//! Run with a path to profile your own file:
//!
//! ```text
//! cargo run --example profile_csv -- data/customers.csv
//! ```
//!
//! Without an argument a small sample file is written to a temp directory.

use std::error::Error;
use std::io::Write;

use quality_review::formatters::{HumanFormatter, ReportFormatter};
use quality_review::logging::setup::{init_logging, LoggingConfig};
use quality_review::profiler::Profiler;
use quality_review::sources::{profile_source, CsvOptions, CsvSource};
use tracing::info;

const SAMPLE_CSV: &str = "\
order_id,customer,zip,amount,ordered_on
1001,Alice,02139,25.50,2024-03-01
1002,Bob,10001,-4.00,2024-03-02
1003,,94105,13.75,2024-03-02
1004,Dana,SW1A,99.99,
1005,Eve2,60601,0.00,2024-03-05
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging(LoggingConfig::default())?;

    let mut sample = None;
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            let mut file = tempfile::NamedTempFile::with_suffix(".csv")?;
            file.write_all(SAMPLE_CSV.as_bytes())?;
            let path = file.path().display().to_string();
            sample = Some(file);
            path
        }
    };

    let delimiter = if path.ends_with(".tsv") { b'\t' } else { b',' };
    let source = CsvSource::with_options(
        path.as_str(),
        CsvOptions {
            delimiter,
            ..Default::default()
        },
    )?;

    let profiler = Profiler::builder()
        .check_negative(true)
        .alpha_only_columns(["customer"])
        .numeric_only_columns(["zip"])
        .build();

    info!(path = %path, "Profiling CSV file");
    let report = profile_source(&source, &profiler).await?;
    println!("{}", HumanFormatter::new().format(&report)?);

    drop(sample);
    Ok(())
}
