//! Common record batches for profiling tests and demos.
//!
//! Available to downstream crates through the `test-utils` feature.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, Date32Array, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::*;

use crate::error::Result;

/// Days from 1970-01-01 to 2024-01-01.
const DAYS_TO_2024: i32 = 19_723;

/// Microseconds from the epoch to 2024-01-01T00:00:00.
const MICROS_TO_2024: i64 = 1_704_067_200_000_000;

const MICROS_PER_HOUR: i64 = 3_600_000_000;

/// The two-column table `id: [1, 2, null]`, `name: ["Al", "Bo", "Al"]`.
pub fn create_id_name_batch() -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, true),
        Field::new("name", DataType::Utf8, true),
    ]));

    Ok(RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![Some(1), Some(2), None])),
            Arc::new(StringArray::from(vec!["Al", "Bo", "Al"])),
        ],
    )?)
}

/// A customer table covering every column kind, with nulls sprinkled in.
///
/// Columns: `customer_id` (integer), `name` (string), `postal_code`
/// (string of digits), `balance` (decimal, one negative), `signup_date`
/// (date), `last_login` (datetime) and `tier` (low-cardinality string).
pub fn create_customers_batch() -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("customer_id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, true),
        Field::new("postal_code", DataType::Utf8, true),
        Field::new("balance", DataType::Float64, true),
        Field::new("signup_date", DataType::Date32, true),
        Field::new(
            "last_login",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            true,
        ),
        Field::new("tier", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![101, 102, 103, 104, 105, 106])),
        Arc::new(StringArray::from(vec![
            Some("Alice"),
            Some("Bob"),
            None,
            Some("Dana"),
            Some("Eve2"),
            Some("Frank"),
        ])),
        Arc::new(StringArray::from(vec![
            Some("10001"),
            Some("94105"),
            Some("60601"),
            None,
            Some("02139"),
            Some("SW1A"),
        ])),
        Arc::new(Float64Array::from(vec![
            Some(120.5),
            Some(0.0),
            Some(-15.25),
            Some(980.0),
            None,
            Some(42.0),
        ])),
        Arc::new(Date32Array::from(vec![
            Some(DAYS_TO_2024),
            Some(DAYS_TO_2024 + 31),
            Some(DAYS_TO_2024 - 365),
            None,
            Some(DAYS_TO_2024 + 100),
            Some(DAYS_TO_2024 + 2),
        ])),
        Arc::new(TimestampMicrosecondArray::from(vec![
            Some(MICROS_TO_2024 + 9 * MICROS_PER_HOUR),
            None,
            Some(MICROS_TO_2024 + 30 * MICROS_PER_HOUR),
            Some(MICROS_TO_2024 - MICROS_PER_HOUR),
            Some(MICROS_TO_2024),
            None,
        ])),
        Arc::new(StringArray::from(vec![
            Some("gold"),
            Some("silver"),
            Some("gold"),
            Some("bronze"),
            None,
            Some("silver"),
        ])),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// A single string column holding `distinct` different values, each twice.
pub fn create_categorical_batch(distinct: usize) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![Field::new(
        "category",
        DataType::Utf8,
        false,
    )]));
    let values = (0..distinct * 2)
        .map(|i| format!("cat_{:03}", i % distinct.max(1)))
        .collect::<Vec<_>>();

    Ok(RecordBatch::try_new(
        schema,
        vec![Arc::new(StringArray::from(values))],
    )?)
}

/// Registers `batch` as an in-memory table named `table_name`.
pub fn create_context_with_batch(table_name: &str, batch: RecordBatch) -> Result<SessionContext> {
    let ctx = SessionContext::new();
    let table = MemTable::try_new(batch.schema(), vec![vec![batch]])?;
    ctx.register_table(table_name, Arc::new(table))?;
    Ok(ctx)
}

/// A context with the customer table registered as `customers`.
pub fn create_customers_context() -> Result<SessionContext> {
    create_context_with_batch("customers", create_customers_batch()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::collect_table;

    #[test]
    fn test_customers_batch_shape() {
        let batch = create_customers_batch().unwrap();
        assert_eq!(batch.num_columns(), 7);
        assert_eq!(batch.num_rows(), 6);
    }

    #[test]
    fn test_categorical_batch() {
        let batch = create_categorical_batch(5).unwrap();
        assert_eq!(batch.num_rows(), 10);
    }

    #[tokio::test]
    async fn test_customers_context_round_trip() {
        let ctx = create_customers_context().unwrap();
        let batch = collect_table(&ctx, "customers").await.unwrap();
        assert_eq!(batch.num_rows(), 6);
        assert_eq!(batch.schema().field(4).name(), "signup_date");
    }
}
