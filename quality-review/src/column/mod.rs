//! Read-only column access for the profiler.
//!
//! The profiler never talks to a table library directly. It reads columns
//! through the [`ColumnView`] capability trait and tables through
//! [`TableView`], so any storage that can hand out typed cells can be
//! profiled. The [`arrow`] submodule provides the adapter for Arrow
//! `RecordBatch`es, which is also what the DataFusion sources collect into.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use quality_review::column::{arrow::ArrowColumn, ColumnKind, ColumnView};
//!
//! let values: ArrayRef = Arc::new(Int64Array::from(vec![Some(3), None, Some(-1)]));
//! let column = ArrowColumn::new("delta", &values).unwrap();
//!
//! assert_eq!(column.kind(), ColumnKind::Integer);
//! assert_eq!(column.count_null(), 1);
//! assert_eq!(column.min().unwrap().to_string(), "-1");
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

pub mod arrow;

/// Coarse classification of a column, derived from its declared value type.
///
/// Variants are listed in classification precedence: a declared type is
/// checked against integer first, then decimal, datetime, date, and anything
/// left over is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Signed or unsigned integers of any width
    Integer,
    /// Floating point and fixed-point decimal numbers
    Decimal,
    /// Timestamps, with or without a time zone
    DateTime,
    /// Calendar dates
    Date,
    /// Everything else, read as text
    String,
}

impl ColumnKind {
    /// Returns true for integer and decimal columns.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }

    /// Returns true for kinds with a natural ordering used for range metrics.
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::String)
    }

    /// The label used in report rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell read from a column.
///
/// Equality and hashing treat decimals by their bit pattern after folding
/// `-0.0` into `0.0` and every NaN into one canonical NaN, so a column of
/// NaNs has exactly one distinct value.
#[derive(Debug, Clone)]
pub enum CellValue {
    /// A missing value
    Null,
    /// Any integer width widened to `i128`
    Integer(i128),
    /// Floats and fixed-point decimals as `f64`
    Decimal(f64),
    /// Timestamp as wall-clock time (UTC for zoned columns)
    DateTime(NaiveDateTime),
    /// Calendar date
    Date(NaiveDate),
    /// Text, or the display rendering of a non-text value
    String(String),
}

impl CellValue {
    /// Returns true if this cell is [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text of a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the value is strictly below zero. Non-numeric cells never are.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(v) => *v < 0,
            Self::Decimal(v) => *v < 0.0,
            _ => false,
        }
    }

    /// Orders two cells of the same variant. Mixed variants and NaN are unordered.
    pub fn ordering(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => a.partial_cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn is_orderable(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Decimal(v) => !v.is_nan(),
            _ => true,
        }
    }

    fn decimal_bits(v: f64) -> u64 {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else if v == 0.0 {
            0.0f64.to_bits()
        } else {
            v.to_bits()
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => Self::decimal_bits(*a) == Self::decimal_bits(*b),
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Integer(v) => v.hash(state),
            Self::Decimal(v) => Self::decimal_bits(*v).hash(state),
            Self::DateTime(v) => v.hash(state),
            Self::Date(v) => v.hash(state),
            Self::String(v) => v.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Integer(v) => write!(f, "{v}"),
            // Whole decimals keep one fractional digit so 2.0 does not read as an integer
            Self::Decimal(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Integer(v) => match i64::try_from(*v) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => serializer.serialize_str(&v.to_string()),
            },
            Self::Decimal(v) => serializer.serialize_f64(*v),
            Self::DateTime(_) | Self::Date(_) => serializer.serialize_str(&self.to_string()),
            Self::String(v) => serializer.serialize_str(v),
        }
    }
}

/// Read-only access to one column of a table.
///
/// Implementors must provide the cell iterator and metadata; the remaining
/// operations have default implementations in terms of [`ColumnView::iter_cells`]
/// that adapters may override with faster native kernels.
pub trait ColumnView {
    /// The column name.
    fn name(&self) -> &str;

    /// The classification of the column's declared type.
    fn kind(&self) -> ColumnKind;

    /// Total number of cells, null or not.
    fn count_total(&self) -> usize;

    /// Every cell in row order, with [`CellValue::Null`] for missing values.
    fn iter_cells(&self) -> Box<dyn Iterator<Item = CellValue> + '_>;

    /// Number of null cells.
    fn count_null(&self) -> usize {
        self.iter_cells().filter(CellValue::is_null).count()
    }

    /// Non-null cells in row order.
    fn iter_non_null(&self) -> Box<dyn Iterator<Item = CellValue> + '_> {
        Box::new(self.iter_cells().filter(|cell| !cell.is_null()))
    }

    /// Smallest non-null value, or `None` for string columns and columns
    /// without an orderable value.
    fn min(&self) -> Option<CellValue> {
        extreme(self, Ordering::Less)
    }

    /// Largest non-null value, or `None` for string columns and columns
    /// without an orderable value.
    fn max(&self) -> Option<CellValue> {
        extreme(self, Ordering::Greater)
    }

    /// Distinct cells in first-occurrence order. A null, if present, appears
    /// once at the position of the first null cell.
    fn distinct_ordered(&self) -> Vec<CellValue> {
        let mut seen = HashSet::new();
        self.iter_cells()
            .filter(|cell| seen.insert(cell.clone()))
            .collect()
    }
}

fn extreme<C: ColumnView + ?Sized>(column: &C, wanted: Ordering) -> Option<CellValue> {
    if !column.kind().is_ordered() {
        return None;
    }
    column
        .iter_non_null()
        .filter(CellValue::is_orderable)
        .fold(None, |best, cell| match best {
            Some(current) if cell.ordering(&current) != Some(wanted) => Some(current),
            _ => Some(cell),
        })
}

/// An ordered collection of named columns.
pub trait TableView {
    /// Views over every column, in table order.
    fn column_views(&self) -> Result<Vec<Box<dyn ColumnView + '_>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecColumn {
        kind: ColumnKind,
        cells: Vec<CellValue>,
    }

    impl ColumnView for VecColumn {
        fn name(&self) -> &str {
            "test"
        }

        fn kind(&self) -> ColumnKind {
            self.kind
        }

        fn count_total(&self) -> usize {
            self.cells.len()
        }

        fn iter_cells(&self) -> Box<dyn Iterator<Item = CellValue> + '_> {
            Box::new(self.cells.iter().cloned())
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ColumnKind::Integer.to_string(), "integer");
        assert_eq!(ColumnKind::DateTime.to_string(), "datetime");
        assert!(ColumnKind::Decimal.is_numeric());
        assert!(!ColumnKind::Date.is_numeric());
        assert!(ColumnKind::Date.is_ordered());
        assert!(!ColumnKind::String.is_ordered());
    }

    #[test]
    fn test_decimal_display_keeps_fraction() {
        assert_eq!(CellValue::Decimal(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Decimal(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Decimal(f64::NAN).to_string(), "NaN");
        assert_eq!(CellValue::Null.to_string(), "null");
    }

    #[test]
    fn test_nan_and_signed_zero_equality() {
        assert_eq!(CellValue::Decimal(f64::NAN), CellValue::Decimal(f64::NAN));
        assert_eq!(CellValue::Decimal(-0.0), CellValue::Decimal(0.0));
        assert_ne!(CellValue::Integer(1), CellValue::Decimal(1.0));
    }

    #[test]
    fn test_default_min_max_skip_nulls_and_nan() {
        let column = VecColumn {
            kind: ColumnKind::Decimal,
            cells: vec![
                CellValue::Decimal(f64::NAN),
                CellValue::Null,
                CellValue::Decimal(3.5),
                CellValue::Decimal(-1.25),
            ],
        };
        assert_eq!(column.min(), Some(CellValue::Decimal(-1.25)));
        assert_eq!(column.max(), Some(CellValue::Decimal(3.5)));
        assert_eq!(column.count_null(), 1);
    }

    #[test]
    fn test_min_max_gated_for_strings() {
        let column = VecColumn {
            kind: ColumnKind::String,
            cells: vec![CellValue::String("b".into()), CellValue::String("a".into())],
        };
        assert_eq!(column.min(), None);
        assert_eq!(column.max(), None);
    }

    #[test]
    fn test_distinct_first_occurrence_order() {
        let column = VecColumn {
            kind: ColumnKind::Integer,
            cells: vec![
                CellValue::Integer(3),
                CellValue::Null,
                CellValue::Integer(1),
                CellValue::Integer(3),
                CellValue::Null,
            ],
        };
        assert_eq!(
            column.distinct_ordered(),
            vec![CellValue::Integer(3), CellValue::Null, CellValue::Integer(1)]
        );
    }

    #[test]
    fn test_serialize_cells() {
        let json = serde_json::to_string(&vec![
            CellValue::Null,
            CellValue::Integer(7),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,7,"2024-02-29"]"#);
    }
}
