//! Profiles an in-memory Arrow record batch.

use std::error::Error;

use quality_review::logging::LogConfig;
use quality_review::profiler::Profiler;
use quality_review::test_fixtures::create_customers_batch;

fn main() -> Result<(), Box<dyn Error>> {
    let batch = create_customers_batch()?;

    let profiler = Profiler::builder()
        .max_unique_values(5)
        .check_negative(true)
        .alpha_only_columns(["name", "tier"])
        .numeric_only_columns(["postal_code"])
        .log_config(LogConfig::verbose())
        .progress_callback(|progress| {
            println!(
                "[{}/{}] {}",
                progress.column_index + 1,
                progress.total_columns,
                progress.column_name
            );
        })
        .build();

    let report = profiler.profile(&batch)?;

    println!();
    for row in &report {
        println!(
            "{:<12} {:<9} completeness={:<8} range=[{}, {}] distinct={} values={}",
            row.column_name,
            row.data_type,
            row.completeness_display(),
            row.range_min.as_ref().map_or("N/A".to_string(), ToString::to_string),
            row.range_max.as_ref().map_or("N/A".to_string(), ToString::to_string),
            row.distinct_count,
            row.categorical_values,
        );
    }

    let failures = report
        .rows()
        .iter()
        .filter(|row| {
            [
                row.negative_values_test.to_string(),
                row.alpha_only_test.to_string(),
                row.numeric_only_test.to_string(),
            ]
            .iter()
            .any(|outcome| outcome.starts_with("Fail"))
        })
        .map(|row| row.column_name.as_str())
        .collect::<Vec<_>>();
    println!("\nColumns with failing tests: {failures:?}");

    Ok(())
}
