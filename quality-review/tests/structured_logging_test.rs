//! Integration tests for structured logging during a review.

use std::sync::{Arc, Mutex};

use quality_review::logging::LogConfig;
use quality_review::profiler::Profiler;
use quality_review::sources::profile_table;
use quality_review::test_fixtures::{create_customers_context, create_id_name_batch};

/// Test helper to capture structured logs
struct LogCapture {
    logs: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn captured_logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let s = String::from_utf8_lossy(buf).to_string();
        self.logs.lock().unwrap().push(s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn json_subscriber(capture: &LogCapture, filter: &str) -> impl tracing::Subscriber + Send + Sync {
    let logs = capture.logs.clone();
    tracing_subscriber::fmt()
        .json()
        .with_writer(move || LogCapture { logs: logs.clone() })
        .with_env_filter(filter)
        .finish()
}

#[test]
fn test_review_start_and_completion_events() {
    let capture = LogCapture::new();
    let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "info"));

    let batch = create_id_name_batch().unwrap();
    Profiler::new().profile(&batch).unwrap();

    let logs = capture.captured_logs();
    let joined = logs.join("");
    assert!(joined.contains("Starting data quality review"));
    assert!(joined.contains("Completed data quality review"));
    assert!(joined.contains("\"columns\":2"));

    for line in joined.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("log lines are JSON");
    }
}

#[test]
fn test_column_details_only_when_enabled() {
    let batch = create_id_name_batch().unwrap();

    let capture = LogCapture::new();
    {
        let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "debug"));
        Profiler::new().profile(&batch).unwrap();
    }
    assert!(!capture.captured_logs().join("").contains("Profiled column"));

    let capture = LogCapture::new();
    {
        let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "debug"));
        Profiler::builder()
            .log_config(LogConfig::verbose())
            .build()
            .profile(&batch)
            .unwrap();
    }
    let joined = capture.captured_logs().join("");
    assert!(joined.contains("Profiled column"));
    assert!(joined.contains("\"column\":\"name\""));
    assert!(joined.contains("\"data_type\":\"string\""));
}

#[tokio::test]
async fn test_data_operation_events() {
    let capture = LogCapture::new();
    let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "info"));

    let ctx = create_customers_context().unwrap();
    profile_table(&ctx, "customers", &Profiler::new())
        .await
        .unwrap();

    let joined = capture.captured_logs().join("");
    assert!(joined.contains("Collected table for review"));
    assert!(joined.contains("\"rows\":6"));
}

#[tokio::test]
async fn test_production_config_silences_data_operations() {
    let capture = LogCapture::new();
    let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "info"));

    let ctx = create_customers_context().unwrap();
    let profiler = Profiler::builder()
        .log_config(LogConfig::production())
        .build();
    profile_table(&ctx, "customers", &profiler).await.unwrap();

    let joined = capture.captured_logs().join("");
    assert!(!joined.contains("Collected table for review"));
}

#[test]
fn test_base_level_gates_review_events() {
    let batch = create_id_name_batch().unwrap();

    let capture = LogCapture::new();
    {
        let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "info"));
        Profiler::builder()
            .log_config(LogConfig::production())
            .build()
            .profile(&batch)
            .unwrap();
    }
    let joined = capture.captured_logs().join("");
    assert!(!joined.contains("Starting data quality review"));
    assert!(!joined.contains("Completed data quality review"));

    let capture = LogCapture::new();
    {
        let _guard = tracing::subscriber::set_default(json_subscriber(&capture, "info"));
        Profiler::builder()
            .log_config(LogConfig::balanced())
            .build()
            .profile(&batch)
            .unwrap();
    }
    assert!(capture
        .captured_logs()
        .join("")
        .contains("Starting data quality review"));
}
