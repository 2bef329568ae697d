//! [`ColumnView`] and [`TableView`] over Arrow arrays and record batches.

use std::sync::Arc;

use arrow::array::{new_null_array, Array, ArrayRef, AsArray, StringArray};
use arrow::buffer::NullBuffer;
use arrow::compute::cast;
use arrow::datatypes::*;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use super::{CellValue, ColumnKind, ColumnView, TableView};
use crate::error::Result;

/// Maps an Arrow data type to its column classification.
///
/// Dictionary-encoded columns classify by their value type.
pub fn classify(data_type: &DataType) -> ColumnKind {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnKind::Integer,
        DataType::Float16
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal32(_, _)
        | DataType::Decimal64(_, _)
        | DataType::Decimal128(_, _)
        | DataType::Decimal256(_, _) => ColumnKind::Decimal,
        DataType::Timestamp(_, _) => ColumnKind::DateTime,
        DataType::Date32 | DataType::Date64 => ColumnKind::Date,
        DataType::Dictionary(_, value_type) => classify(value_type),
        _ => ColumnKind::String,
    }
}

/// A column backed by an Arrow array.
///
/// Dictionary arrays are unpacked on construction, and string-classified
/// arrays that are not already UTF-8 (booleans, times, binary, nested types)
/// are rendered through Arrow's display formatter so every later check sees
/// the same text a user would.
#[derive(Debug, Clone)]
pub struct ArrowColumn<'a> {
    name: &'a str,
    kind: ColumnKind,
    array: ArrayRef,
    nulls: Option<NullBuffer>,
}

impl<'a> ArrowColumn<'a> {
    /// Creates a view over `array` named `name`.
    pub fn new(name: &'a str, array: &ArrayRef) -> Result<Self> {
        let array = match array.data_type() {
            DataType::Dictionary(_, value_type) => cast(array, value_type)?,
            _ => Arc::clone(array),
        };
        let kind = classify(array.data_type());
        let array = match (kind, array.data_type()) {
            (ColumnKind::String, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View) => {
                array
            }
            (ColumnKind::String, _) => render_utf8(array.as_ref())?,
            _ => array,
        };
        let nulls = array.logical_nulls();

        Ok(Self {
            name,
            kind,
            array,
            nulls,
        })
    }

    /// The underlying (possibly unpacked or rendered) array.
    pub fn array(&self) -> &ArrayRef {
        &self.array
    }

    fn is_null(&self, index: usize) -> bool {
        self.nulls.as_ref().is_some_and(|nulls| nulls.is_null(index))
    }

    /// Reads one non-null cell. Temporal values chrono cannot represent yield `None`.
    fn cell(&self, index: usize) -> Option<CellValue> {
        let array = self.array.as_ref();
        let value = match array.data_type() {
            DataType::Int8 => integer::<Int8Type>(array, index),
            DataType::Int16 => integer::<Int16Type>(array, index),
            DataType::Int32 => integer::<Int32Type>(array, index),
            DataType::Int64 => integer::<Int64Type>(array, index),
            DataType::UInt8 => integer::<UInt8Type>(array, index),
            DataType::UInt16 => integer::<UInt16Type>(array, index),
            DataType::UInt32 => integer::<UInt32Type>(array, index),
            DataType::UInt64 => integer::<UInt64Type>(array, index),
            DataType::Float16 => {
                CellValue::Decimal(array.as_primitive::<Float16Type>().value(index).to_f64())
            }
            DataType::Float32 => {
                CellValue::Decimal(f64::from(array.as_primitive::<Float32Type>().value(index)))
            }
            DataType::Float64 => CellValue::Decimal(array.as_primitive::<Float64Type>().value(index)),
            DataType::Decimal32(_, scale) => {
                let raw = array.as_primitive::<Decimal32Type>().value(index);
                CellValue::Decimal(f64::from(raw) / 10f64.powi(i32::from(*scale)))
            }
            DataType::Decimal64(_, scale) => {
                let raw = array.as_primitive::<Decimal64Type>().value(index);
                CellValue::Decimal(raw as f64 / 10f64.powi(i32::from(*scale)))
            }
            DataType::Decimal128(_, scale) => {
                let raw = array.as_primitive::<Decimal128Type>().value(index);
                CellValue::Decimal(raw as f64 / 10f64.powi(i32::from(*scale)))
            }
            DataType::Decimal256(_, scale) => {
                let raw = array.as_primitive::<Decimal256Type>().value(index);
                let raw = raw.to_string().parse::<f64>().ok()?;
                CellValue::Decimal(raw / 10f64.powi(i32::from(*scale)))
            }
            DataType::Timestamp(TimeUnit::Second, _) => CellValue::DateTime(
                array
                    .as_primitive::<TimestampSecondType>()
                    .value_as_datetime(index)?,
            ),
            DataType::Timestamp(TimeUnit::Millisecond, _) => CellValue::DateTime(
                array
                    .as_primitive::<TimestampMillisecondType>()
                    .value_as_datetime(index)?,
            ),
            DataType::Timestamp(TimeUnit::Microsecond, _) => CellValue::DateTime(
                array
                    .as_primitive::<TimestampMicrosecondType>()
                    .value_as_datetime(index)?,
            ),
            DataType::Timestamp(TimeUnit::Nanosecond, _) => CellValue::DateTime(
                array
                    .as_primitive::<TimestampNanosecondType>()
                    .value_as_datetime(index)?,
            ),
            DataType::Date32 => {
                CellValue::Date(array.as_primitive::<Date32Type>().value_as_date(index)?)
            }
            DataType::Date64 => {
                CellValue::Date(array.as_primitive::<Date64Type>().value_as_date(index)?)
            }
            DataType::Utf8 => CellValue::String(array.as_string::<i32>().value(index).to_string()),
            DataType::LargeUtf8 => {
                CellValue::String(array.as_string::<i64>().value(index).to_string())
            }
            DataType::Utf8View => {
                CellValue::String(array.as_string_view().value(index).to_string())
            }
            // Every other type was rendered to Utf8 in `new`
            _ => return None,
        };
        Some(value)
    }
}

fn integer<T>(array: &dyn Array, index: usize) -> CellValue
where
    T: ArrowPrimitiveType,
    T::Native: Into<i128>,
{
    CellValue::Integer(array.as_primitive::<T>().value(index).into())
}

fn render_utf8(array: &dyn Array) -> std::result::Result<ArrayRef, ArrowError> {
    let nulls = array.logical_nulls();
    if nulls.as_ref().map_or(0, NullBuffer::null_count) == array.len() {
        return Ok(new_null_array(&DataType::Utf8, array.len()));
    }
    let formatter = ArrayFormatter::try_new(array, &FormatOptions::default())?;
    let rendered = (0..array.len())
        .map(|index| {
            if nulls.as_ref().is_some_and(|nulls| nulls.is_null(index)) {
                Ok(None)
            } else {
                formatter.value(index).try_to_string().map(Some)
            }
        })
        .collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(Arc::new(StringArray::from(rendered)))
}

impl ColumnView for ArrowColumn<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> ColumnKind {
        self.kind
    }

    fn count_total(&self) -> usize {
        self.array.len()
    }

    fn count_null(&self) -> usize {
        self.nulls.as_ref().map_or(0, NullBuffer::null_count)
    }

    fn iter_cells(&self) -> Box<dyn Iterator<Item = CellValue> + '_> {
        Box::new((0..self.array.len()).filter_map(move |index| {
            if self.is_null(index) {
                Some(CellValue::Null)
            } else {
                self.cell(index)
            }
        }))
    }
}

impl TableView for RecordBatch {
    fn column_views(&self) -> Result<Vec<Box<dyn ColumnView + '_>>> {
        self.schema_ref()
            .fields()
            .iter()
            .zip(self.columns())
            .map(|(field, array)| {
                let column = ArrowColumn::new(field.name(), array)?;
                Ok(Box::new(column) as Box<dyn ColumnView + '_>)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{
        BooleanArray, Date32Array, DictionaryArray, Float64Array, Int32Array, NullArray,
        TimestampMillisecondArray,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_classification_precedence() {
        assert_eq!(classify(&DataType::Int16), ColumnKind::Integer);
        assert_eq!(classify(&DataType::UInt64), ColumnKind::Integer);
        assert_eq!(classify(&DataType::Float32), ColumnKind::Decimal);
        assert_eq!(classify(&DataType::Decimal128(10, 2)), ColumnKind::Decimal);
        assert_eq!(
            classify(&DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))),
            ColumnKind::DateTime
        );
        assert_eq!(classify(&DataType::Date64), ColumnKind::Date);
        assert_eq!(classify(&DataType::Boolean), ColumnKind::String);
        assert_eq!(classify(&DataType::Utf8), ColumnKind::String);
        assert_eq!(
            classify(&DataType::Dictionary(
                Box::new(DataType::Int8),
                Box::new(DataType::Int64)
            )),
            ColumnKind::Integer
        );
    }

    #[test]
    fn test_integer_cells_and_nulls() {
        let array: ArrayRef = Arc::new(Int32Array::from(vec![Some(5), None, Some(-2)]));
        let column = ArrowColumn::new("n", &array).unwrap();

        assert_eq!(column.count_total(), 3);
        assert_eq!(column.count_null(), 1);
        assert_eq!(
            column.iter_non_null().collect::<Vec<_>>(),
            vec![CellValue::Integer(5), CellValue::Integer(-2)]
        );
        assert_eq!(column.min(), Some(CellValue::Integer(-2)));
        assert_eq!(column.max(), Some(CellValue::Integer(5)));
    }

    #[test]
    fn test_decimal128_scale() {
        let array: ArrayRef = Arc::new(
            arrow::array::Decimal128Array::from(vec![12345, -50])
                .with_precision_and_scale(10, 2)
                .unwrap(),
        );
        let column = ArrowColumn::new("price", &array).unwrap();
        assert_eq!(column.kind(), ColumnKind::Decimal);
        assert_eq!(column.max(), Some(CellValue::Decimal(123.45)));
        assert_eq!(column.min(), Some(CellValue::Decimal(-0.5)));
    }

    #[test]
    fn test_narrow_decimal_kinds() {
        let array: ArrayRef = Arc::new(
            arrow::array::Decimal64Array::from(vec![-500, 12345])
                .with_precision_and_scale(10, 2)
                .unwrap(),
        );
        let column = ArrowColumn::new("amount", &array).unwrap();
        assert_eq!(column.kind(), ColumnKind::Decimal);
        assert_eq!(column.min(), Some(CellValue::Decimal(-5.0)));
        assert_eq!(column.max(), Some(CellValue::Decimal(123.45)));
        assert_eq!(
            crate::checks::negative_values_test(&column, true),
            crate::report::NegativeValuesTest::Fail { negatives: 1 }
        );

        let array: ArrayRef = Arc::new(
            arrow::array::Decimal32Array::from(vec![Some(250), None])
                .with_precision_and_scale(5, 1)
                .unwrap(),
        );
        let column = ArrowColumn::new("rate", &array).unwrap();
        assert_eq!(classify(&DataType::Decimal32(5, 1)), ColumnKind::Decimal);
        assert_eq!(column.max(), Some(CellValue::Decimal(25.0)));
        assert_eq!(column.count_null(), 1);
    }

    #[test]
    fn test_temporal_cells() {
        let dates: ArrayRef = Arc::new(Date32Array::from(vec![19_723, 0]));
        let column = ArrowColumn::new("d", &dates).unwrap();
        assert_eq!(column.kind(), ColumnKind::Date);
        assert_eq!(
            column.min(),
            Some(CellValue::Date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()))
        );

        let stamps: ArrayRef = Arc::new(TimestampMillisecondArray::from(vec![0, 86_400_000]));
        let column = ArrowColumn::new("ts", &stamps).unwrap();
        assert_eq!(column.kind(), ColumnKind::DateTime);
        assert_eq!(column.max().unwrap().to_string(), "1970-01-02 00:00:00");
    }

    #[test]
    fn test_boolean_rendered_as_text() {
        let array: ArrayRef = Arc::new(BooleanArray::from(vec![Some(true), None, Some(false)]));
        let column = ArrowColumn::new("flag", &array).unwrap();
        assert_eq!(column.kind(), ColumnKind::String);
        assert_eq!(column.count_null(), 1);
        assert_eq!(
            column.iter_non_null().collect::<Vec<_>>(),
            vec![
                CellValue::String("true".into()),
                CellValue::String("false".into())
            ]
        );
    }

    #[test]
    fn test_dictionary_unpacked() {
        let dict: DictionaryArray<Int8Type> = vec!["a", "b", "a"].into_iter().collect();
        let array: ArrayRef = Arc::new(dict);
        let column = ArrowColumn::new("tag", &array).unwrap();
        assert_eq!(column.kind(), ColumnKind::String);
        assert_eq!(
            column.distinct_ordered(),
            vec![CellValue::String("a".into()), CellValue::String("b".into())]
        );
    }

    #[test]
    fn test_null_array_counts_every_cell() {
        let array: ArrayRef = Arc::new(NullArray::new(4));
        let column = ArrowColumn::new("empty", &array).unwrap();
        assert_eq!(column.kind(), ColumnKind::String);
        assert_eq!(column.count_null(), 4);
        assert_eq!(column.iter_non_null().count(), 0);
    }

    #[test]
    fn test_record_batch_table_view() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Int32, false),
            Field::new("b", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1, 2])),
                Arc::new(Float64Array::from(vec![None, Some(0.5)])),
            ],
        )
        .unwrap();

        let views = batch.column_views().unwrap();
        let names: Vec<&str> = views.iter().map(|view| view.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(views[1].kind(), ColumnKind::Decimal);
    }
}
