use indexmap::IndexMap;

use super::filter::FilteredView;
use super::model::{CellValue, Column};
use crate::error::{DashboardError, Result};

/// How the rows of a frequency table are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyOrder {
    /// Ascending by value (numeric axes).
    Natural,
    /// The order values first appear in the view.
    Discovery,
}

/// Count occurrences of each distinct value of `column` over `view`.
///
/// Values are grouped by exact equality, never bucketed. Counts sum to
/// `view.len()`; an empty view gives an empty table.
pub fn frequency_table(
    view: &FilteredView<'_>,
    column: Column,
    order: FrequencyOrder,
) -> Vec<(CellValue, usize)> {
    let mut counts: IndexMap<CellValue, usize> = IndexMap::new();
    for rec in view.rows() {
        *counts.entry(rec.value(column)).or_insert(0) += 1;
    }

    let mut table: Vec<(CellValue, usize)> = counts.into_iter().collect();
    match order {
        FrequencyOrder::Discovery => {}
        FrequencyOrder::Natural => table.sort_by(|a, b| a.0.cmp(&b.0)),
    }
    table
}

/// Project every row of `view` to an `(x, y)` point, in row order.
///
/// No sorting, aggregation or deduplication: one point per row.
pub fn scatter_series(view: &FilteredView<'_>, x: Column, y: Column) -> Result<Vec<[f64; 2]>> {
    for col in [x, y] {
        if !col.is_numeric() {
            return Err(DashboardError::NotNumeric(col));
        }
    }
    Ok(view
        .rows()
        .filter_map(|rec| Some([rec.number(x)?, rec.number(y)?]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterSelection, apply_filter};
    use crate::data::model::fixtures::{table, ten_workers, worker};

    #[test]
    fn test_ages_natural_order() {
        let table = table(vec![
            worker("IT", "City", 42, 1),
            worker("IT", "City", 17, 1),
            worker("IT", "City", 42, 1),
            worker("IT", "City", 30, 1),
        ]);
        let view = FilteredView::all(&table);
        assert_eq!(
            frequency_table(&view, Column::Age, FrequencyOrder::Natural),
            vec![
                (CellValue::Integer(17), 1),
                (CellValue::Integer(30), 1),
                (CellValue::Integer(42), 2),
            ]
        );
    }

    #[test]
    fn test_locations_discovery_order() {
        let table = ten_workers();
        let view = FilteredView::all(&table);
        let counts = frequency_table(&view, Column::LocationType, FrequencyOrder::Discovery);
        let keys: Vec<String> = counts.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["City", "Town", "Village"]);
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 10);
    }

    #[test]
    fn test_counts_sum_to_view_len_for_every_column() {
        let table = ten_workers();
        for selection in [
            FilterSelection::default(),
            FilterSelection::new(["IT"]),
            FilterSelection::new(["Retail"]),
        ] {
            let view = apply_filter(&table, &selection);
            for col in Column::ALL {
                let counts = frequency_table(&view, col, FrequencyOrder::Natural);
                assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), view.len());
                if col.is_numeric() {
                    assert!(counts.windows(2).all(|w| w[0].0 <= w[1].0));
                }
            }
        }
    }

    #[test]
    fn test_nan_and_signed_zero_grouping() {
        let rows = [f64::NAN, f64::NAN, 0.0, -0.0]
            .into_iter()
            .map(|score| {
                let mut w = worker("IT", "City", 30, 1);
                w.productivity_score = score;
                w
            })
            .collect();
        let table = table(rows);
        let view = FilteredView::all(&table);
        let counts = frequency_table(&view, Column::ProductivityScore, FrequencyOrder::Natural);

        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0], (CellValue::Float(-0.0), 1));
        assert_eq!(counts[1], (CellValue::Float(0.0), 1));
        assert_eq!(counts[2], (CellValue::Float(f64::NAN), 2));
    }

    #[test]
    fn test_empty_view_gives_empty_table() {
        let table = ten_workers();
        let view = apply_filter(&table, &FilterSelection::new(["Finance"]));
        assert!(frequency_table(&view, Column::Age, FrequencyOrder::Natural).is_empty());
        assert!(scatter_series(&view, Column::FocusTimeMinutes, Column::ProductivityScore)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_scatter_one_point_per_row() {
        let table = ten_workers();
        let view = apply_filter(&table, &FilterSelection::new(["IT"]));
        let points =
            scatter_series(&view, Column::CalendarScheduledUsage, Column::ProductivityScore)
                .unwrap();
        assert_eq!(points.len(), view.len());
        // Rows 0, 3, 6, 8 are IT; duplicates (age 42 twice) are kept.
        assert_eq!(points[0], [4.2, 82.0]);
        assert_eq!(points[1], [3.0, 70.0]);
        assert_eq!(points[2], [4.2, 82.0]);
    }

    #[test]
    fn test_scatter_rejects_categorical() {
        let table = ten_workers();
        let view = FilteredView::all(&table);
        assert!(matches!(
            scatter_series(&view, Column::LocationType, Column::ProductivityScore),
            Err(DashboardError::NotNumeric(Column::LocationType))
        ));
    }
}
