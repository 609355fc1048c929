use std::collections::BTreeSet;

use super::model::{WorkerRecord, WorkerTable};

// ---------------------------------------------------------------------------
// Filter predicate: which industry sectors are selected
// ---------------------------------------------------------------------------

/// Selected `industry_sector` values. Empty means "no filter" (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    sectors: BTreeSet<String>,
}

impl FilterSelection {
    #[cfg(test)]
    pub fn new<I, S>(sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSelection {
            sectors: sectors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn contains(&self, sector: &str) -> bool {
        self.sectors.contains(sector)
    }

    /// Add or remove a single sector.
    pub fn toggle(&mut self, sector: &str) {
        if !self.sectors.remove(sector) {
            self.sectors.insert(sector.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sectors.iter().map(String::as_str)
    }

    /// Whether a worker passes: everything passes an empty selection.
    pub fn matches(&self, record: &WorkerRecord) -> bool {
        self.sectors.is_empty() || self.sectors.contains(&record.industry_sector)
    }
}

// ---------------------------------------------------------------------------
// Filtered view: a row subset of a shared table
// ---------------------------------------------------------------------------

/// Rows of `table` that passed a selection, in table order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a WorkerTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over every row of `table`.
    pub fn all(table: &'a WorkerTable) -> Self {
        FilteredView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    /// View over precomputed row indices (as cached by the app state).
    pub fn from_indices(table: &'a WorkerTable, indices: Vec<usize>) -> Self {
        FilteredView { table, indices }
    }

    pub fn table(&self) -> &'a WorkerTable {
        self.table
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a WorkerRecord> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.records[i])
    }

    pub fn get(&self, n: usize) -> Option<&'a WorkerRecord> {
        self.indices.get(n).map(|&i| &self.table.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows of `table` that pass `selection`.
///
/// * Empty selection → every row
/// * Otherwise → rows whose `industry_sector` is selected; selected values
///   absent from the table simply match nothing
pub fn apply_filter<'a>(table: &'a WorkerTable, selection: &FilterSelection) -> FilteredView<'a> {
    if selection.is_empty() {
        return FilteredView::all(table);
    }
    let indices = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::ten_workers;

    #[test]
    fn test_scenario_it_retail_finance() {
        let table = ten_workers();
        assert_eq!(apply_filter(&table, &FilterSelection::new(["IT"])).len(), 4);
        assert_eq!(apply_filter(&table, &FilterSelection::default()).len(), 10);
        assert_eq!(apply_filter(&table, &FilterSelection::new(["Finance"])).len(), 0);
    }

    #[test]
    fn test_empty_selection_is_whole_table() {
        let table = ten_workers();
        let view = apply_filter(&table, &FilterSelection::default());
        let rows: Vec<_> = view.rows().cloned().collect();
        assert_eq!(rows, table.records);
    }

    #[test]
    fn test_rows_are_selected_subset_in_order() {
        let table = ten_workers();
        let selection = FilterSelection::new(["Retail", "Finance"]);
        let view = apply_filter(&table, &selection);
        assert_eq!(view.len(), 6);
        assert!(view.rows().all(|r| selection.contains(&r.industry_sector)));
        assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_larger_selection_never_shrinks() {
        let table = ten_workers();
        let sectors = ["IT", "Retail", "Finance"];
        let mut smaller = FilterSelection::default();
        let mut larger = FilterSelection::default();
        for s in sectors {
            larger.toggle(s);
            assert!(
                smaller.is_empty()
                    || apply_filter(&table, &smaller).len() <= apply_filter(&table, &larger).len()
            );
            smaller.toggle(s);
        }
        let it = apply_filter(&table, &FilterSelection::new(["IT"])).len();
        let both = apply_filter(&table, &FilterSelection::new(["IT", "Retail"])).len();
        assert!(it <= both);
    }

    #[test]
    fn test_toggle() {
        let mut selection = FilterSelection::default();
        selection.toggle("IT");
        assert!(selection.contains("IT"));
        selection.toggle("IT");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_filter_does_not_touch_table() {
        let table = ten_workers();
        let before = table.clone();
        let _ = apply_filter(&table, &FilterSelection::new(["IT"]));
        assert_eq!(table, before);
    }
}
