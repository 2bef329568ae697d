//! Renders one report with each of the bundled formatters.

use std::error::Error;

use quality_review::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use quality_review::profiler::Profiler;
use quality_review::sources::profile_table;
use quality_review::test_fixtures::create_customers_context;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let ctx = create_customers_context()?;
    let profiler = Profiler::builder().check_negative(true).build();
    let report = profile_table(&ctx, "customers", &profiler).await?;

    println!("=== Human ===");
    println!("{}", HumanFormatter::new().format(&report)?);

    println!("=== Human (minimal) ===");
    println!(
        "{}",
        HumanFormatter::with_config(FormatterConfig::minimal()).format(&report)?
    );

    println!("=== JSON ===");
    println!("{}", JsonFormatter::new().format(&report)?);

    println!("=== Markdown ===");
    println!("{}", MarkdownFormatter::new().format(&report)?);

    let batch = report.to_record_batch()?;
    println!(
        "Report as Arrow: {} rows x {} columns",
        batch.num_rows(),
        batch.num_columns()
    );

    Ok(())
}
