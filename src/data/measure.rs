use std::collections::BTreeSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::data::{QueryResult, QueryRow};

/// Uppercase country name to measure value, in query row order.
pub type MeasureMap = IndexMap<String, f64>;

/// Column used when the first row offers no finite numeric cell.
const DEFAULT_MEASURE_COLUMN: usize = 1;

/// Result of one Measure Binding pass.
///
/// `valid_rows` always equals `values.len()`. A row whose uppercase name is
/// already mapped overwrites the earlier value and counts in
/// `duplicate_rows` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureExtraction {
    pub values: MeasureMap,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub duplicate_rows: usize,
    /// `None` when the query carries no measure at all.
    pub measure_column: Option<usize>,
}

impl MeasureExtraction {
    #[must_use]
    pub fn has_measure(&self) -> bool {
        self.measure_column.is_some()
    }
}

/// Extracts per-country values from a query result.
///
/// Never fails: a missing result or missing measure metadata gives an empty
/// extraction, and unusable rows are counted as invalid and skipped.
#[must_use]
pub fn extract_measure(query: Option<&QueryResult>) -> MeasureExtraction {
    let Some(query) = query else {
        return MeasureExtraction::default();
    };
    if query.measure_info.is_empty() {
        return MeasureExtraction::default();
    }

    let column = detect_measure_column(&query.rows);
    let grand_total = query.grand_total.filter(|value| value.is_finite());
    let mut extraction = MeasureExtraction {
        measure_column: Some(column),
        ..MeasureExtraction::default()
    };

    for row in &query.rows {
        let name = row.dimension().and_then(|cell| cell.usable_text());
        let value = row
            .cells
            .get(column)
            .and_then(|cell| cell.finite_number())
            .or(grand_total);
        match (name, value) {
            (Some(name), Some(value)) => {
                match extraction.values.insert(name.to_uppercase(), value) {
                    Some(_) => extraction.duplicate_rows += 1,
                    None => extraction.valid_rows += 1,
                }
            }
            _ => extraction.invalid_rows += 1,
        }
    }

    debug!(
        column,
        valid_rows = extraction.valid_rows,
        invalid_rows = extraction.invalid_rows,
        duplicate_rows = extraction.duplicate_rows,
        "extracted measure values"
    );
    extraction
}

/// First column after the dimension whose first-row cell holds a finite
/// number.
#[must_use]
pub fn detect_measure_column(rows: &[QueryRow]) -> usize {
    rows.first()
        .and_then(|row| {
            row.cells
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, cell)| cell.finite_number().is_some())
                .map(|(index, _)| index)
        })
        .unwrap_or(DEFAULT_MEASURE_COLUMN)
}

/// Number of distinct values after rounding to three decimals.
#[must_use]
pub fn distinct_value_count(values: &MeasureMap) -> usize {
    values
        .values()
        .map(|value| OrderedFloat((value * 1000.0).round() / 1000.0))
        .collect::<BTreeSet<_>>()
        .len()
}

/// `(min, max)` over the map, `None` when empty.
#[must_use]
pub fn value_extent(values: &MeasureMap) -> Option<(f64, f64)> {
    values.values().fold(None, |extent, &value| match extent {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

#[cfg(test)]
mod tests {
    use super::{detect_measure_column, distinct_value_count, extract_measure, value_extent};
    use crate::data::{MeasureMap, QueryCell, QueryResult, SelectionState};

    fn country(name: &str) -> QueryCell {
        QueryCell::dimension(name, SelectionState::Other)
    }

    #[test]
    fn detects_first_numeric_column_after_dimension() {
        let query = QueryResult::new()
            .with_measure("Sales")
            .with_row(vec![country("Chile"), QueryCell::label("n/a"), QueryCell::number(3.0)]);
        assert_eq!(detect_measure_column(&query.rows), 2);
        assert_eq!(detect_measure_column(&[]), 1);

        let extraction = extract_measure(Some(&query));
        assert_eq!(extraction.values.get("CHILE"), Some(&3.0));
    }

    #[test]
    fn no_measure_metadata_is_empty_not_error() {
        let query = QueryResult::new().with_row(vec![country("Chile"), QueryCell::number(3.0)]);
        let extraction = extract_measure(Some(&query));
        assert!(extraction.values.is_empty());
        assert!(!extraction.has_measure());
        assert!(!extract_measure(None).has_measure());
    }

    #[test]
    fn grand_total_fills_rows_without_values() {
        let query = QueryResult::new()
            .with_measure("Sales")
            .with_grand_total(42.0)
            .with_row(vec![country("Chile"), QueryCell::number(3.0)])
            .with_row(vec![country("Peru")]);
        let extraction = extract_measure(Some(&query));
        assert_eq!(extraction.values.get("PERU"), Some(&42.0));
        assert_eq!(extraction.invalid_rows, 0);
    }

    #[test]
    fn unusable_rows_are_counted_not_mapped() {
        let query = QueryResult::new()
            .with_measure("Sales")
            .with_row(vec![country("Chile"), QueryCell::number(3.0)])
            .with_row(vec![country("  "), QueryCell::number(4.0)])
            .with_row(vec![country("Peru"), QueryCell::number(5.0)])
            .with_row(vec![country("Bolivia"), QueryCell::label("n/a")]);
        let extraction = extract_measure(Some(&query));
        assert_eq!(extraction.values.len(), 2);
        assert_eq!(extraction.valid_rows, 2);
        assert_eq!(extraction.invalid_rows, 2);
        assert_eq!(extraction.duplicate_rows, 0);
    }

    #[test]
    fn case_variants_of_one_name_keep_the_last_value() {
        let query = QueryResult::new()
            .with_measure("Sales")
            .with_row(vec![country("France"), QueryCell::number(1.0)])
            .with_row(vec![country("Chile"), QueryCell::number(2.0)])
            .with_row(vec![country("FRANCE"), QueryCell::number(7.0)]);
        let extraction = extract_measure(Some(&query));
        assert_eq!(extraction.values.get("FRANCE"), Some(&7.0));
        assert_eq!(extraction.valid_rows, extraction.values.len());
        assert_eq!(extraction.valid_rows, 2);
        assert_eq!(extraction.duplicate_rows, 1);
        assert_eq!(extraction.invalid_rows, 0);
    }

    #[test]
    fn distinct_count_rounds_to_three_decimals() {
        let values: MeasureMap = [("A".to_owned(), 1.0001), ("B".to_owned(), 1.0002)]
            .into_iter()
            .collect();
        assert_eq!(distinct_value_count(&values), 1);
        assert_eq!(value_extent(&values).map(|(min, _)| min), Some(1.0001));
        assert_eq!(value_extent(&MeasureMap::new()), None);
    }
}
