//! Per-column rule checks: the sign check, string lengths and the
//! digit/letter composition checks.
//!
//! Composition checks count cells, not matches: a cell with several runs of
//! digits still counts once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::column::{ColumnKind, ColumnView};
use crate::report::{AlphaOnlyTest, NegativeValuesTest, NumericOnlyTest};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\d+").expect("Hard-coded regex pattern should be valid")
});

static LETTER_RUN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\p{Alphabetic}+").expect("Hard-coded regex pattern should be valid")
});

/// Returns true if `value` contains at least one decimal digit.
pub fn contains_digit(value: &str) -> bool {
    DIGIT_RUN.is_match(value)
}

/// Returns true if `value` contains at least one alphabetic character.
pub fn contains_letter(value: &str) -> bool {
    LETTER_RUN.is_match(value)
}

/// Counts non-null string cells for which `predicate` holds.
pub fn count_matching_cells(column: &dyn ColumnView, predicate: impl Fn(&str) -> bool) -> u64 {
    column
        .iter_non_null()
        .filter(|cell| cell.as_str().is_some_and(&predicate))
        .count() as u64
}

/// Sign check for integer and decimal columns.
pub fn negative_values_test(column: &dyn ColumnView, check_negative: bool) -> NegativeValuesTest {
    if !column.kind().is_numeric() {
        return NegativeValuesTest::NotApplicable;
    }
    if !check_negative {
        return NegativeValuesTest::NotTested;
    }

    let negatives = column.iter_non_null().filter(|cell| cell.is_negative()).count() as u64;
    if negatives == 0 {
        NegativeValuesTest::Pass
    } else {
        NegativeValuesTest::Fail { negatives }
    }
}

/// Shortest and longest character count over non-null cells of a string
/// column. `None` for other kinds and for columns without a value.
pub fn string_lengths(column: &dyn ColumnView) -> Option<(usize, usize)> {
    if column.kind() != ColumnKind::String {
        return None;
    }
    column
        .iter_non_null()
        .filter_map(|cell| cell.as_str().map(|s| s.chars().count()))
        .fold(None, |bounds, len| match bounds {
            None => Some((len, len)),
            Some((min, max)) => Some((min.min(len), max.max(len))),
        })
}

/// No-digits check for an opted-in column.
pub fn alpha_only_test(column: &dyn ColumnView, opted_in: bool) -> AlphaOnlyTest {
    if !opted_in {
        return AlphaOnlyTest::NotTested;
    }
    if column.kind() != ColumnKind::String {
        return AlphaOnlyTest::NonStringSkipped;
    }

    match count_matching_cells(column, contains_digit) {
        0 => AlphaOnlyTest::Pass,
        records => AlphaOnlyTest::Fail { records },
    }
}

/// No-letters check for an opted-in column. Numeric and temporal columns
/// cannot hold letters and pass without a scan.
pub fn numeric_only_test(column: &dyn ColumnView, opted_in: bool) -> NumericOnlyTest {
    if !opted_in {
        return NumericOnlyTest::NotTested;
    }
    if column.kind() != ColumnKind::String {
        return NumericOnlyTest::Pass;
    }

    match count_matching_cells(column, contains_letter) {
        0 => NumericOnlyTest::Pass,
        records => NumericOnlyTest::Fail { records },
    }
}
