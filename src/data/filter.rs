use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, FilterColumn, Listing, ListingTable};

// ---------------------------------------------------------------------------
// Filter predicate: which distinct values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps filter column → set of selected values.
/// A column that is absent or whose set is empty selects nothing.
pub type FilterState = BTreeMap<FilterColumn, BTreeSet<CellValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(table: &ListingTable) -> FilterState {
    FilterColumn::ALL
        .iter()
        .map(|&col| (col, table.distinct(col).iter().cloned().collect()))
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current selection
// ---------------------------------------------------------------------------

/// A borrowed subset of a [`ListingTable`], in table order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a ListingTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// The whole table, unfiltered.
    pub fn all(table: &'a ListingTable) -> Self {
        FilteredView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn table(&self) -> &'a ListingTable {
        self.table
    }

    /// Positions of the visible rows in the table.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.listings[i])
    }

    /// The first `n` visible listings.
    pub fn head(&self, n: usize) -> Vec<&'a Listing> {
        self.iter().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows that pass all three column filters.
///
/// A listing passes a column filter when:
/// * The filter set for that column is empty or absent → nothing selected → fails
/// * The set covers every distinct value → passes (no effective filter)
/// * The listing's value for that column is in the selected set → passes
pub fn filter<'a>(table: &'a ListingTable, filters: &FilterState) -> FilteredView<'a> {
    let mut active = Vec::with_capacity(FilterColumn::ALL.len());
    for col in FilterColumn::ALL {
        let selected = match filters.get(&col) {
            Some(selected) if !selected.is_empty() => selected,
            // Nothing selected for this column → hide everything
            _ => {
                return FilteredView {
                    table,
                    indices: Vec::new(),
                }
            }
        };
        let all_vals = table.distinct(col);
        if all_vals.iter().all(|v| selected.contains(v)) {
            continue; // everything selected, no filtering needed
        }
        active.push((col, selected));
    }

    let indices = table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| {
            active
                .iter()
                .all(|(col, selected)| selected.contains(&listing.filter_value(*col)))
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    const SAMPLE: &str = "\
title,make,condition,year,price
A,Toyota,Foreign Used,2015,3000000
B,Honda,Locally Used,2018,2000000
C,Toyota,Locally Used,2018,2500000
D,Lexus,Foreign Used,2010,6000000
E,Honda,New,2022,9000000
";

    fn table() -> ListingTable {
        load_from_reader(SAMPLE.as_bytes()).unwrap()
    }

    fn select(state: &mut FilterState, col: FilterColumn, values: Vec<CellValue>) {
        state.insert(col, values.into_iter().collect());
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn test_default_selection_is_identity() {
        let table = table();
        let view = filter(&table, &init_filter_state(&table));
        assert_eq!(view.indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_column_selection_selects_nothing() {
        let table = table();
        for col in FilterColumn::ALL {
            let mut state = init_filter_state(&table);
            state.insert(col, BTreeSet::new());
            assert!(filter(&table, &state).is_empty(), "{col:?}");

            let mut state = init_filter_state(&table);
            state.remove(&col);
            assert!(filter(&table, &state).is_empty(), "{col:?} absent");
        }
    }

    #[test]
    fn test_filters_are_conjunctive_and_keep_order() {
        let table = table();
        let mut state = init_filter_state(&table);
        select(&mut state, FilterColumn::Make, vec![s("Toyota"), s("Honda")]);
        select(&mut state, FilterColumn::Year, vec![CellValue::Integer(2018), CellValue::Integer(2022)]);

        let view = filter(&table, &state);
        assert_eq!(view.indices(), &[1, 2, 4]);

        select(&mut state, FilterColumn::Condition, vec![s("Locally Used")]);
        let view = filter(&table, &state);
        let titles: Vec<&str> = view.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
        for listing in view.iter() {
            assert!(listing.make == "Toyota" || listing.make == "Honda");
            assert_eq!(listing.condition, "Locally Used");
            assert!(listing.year == 2018 || listing.year == 2022);
        }
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let table = table();
        let mut state = init_filter_state(&table);
        select(&mut state, FilterColumn::Condition, vec![s("Salvage")]);
        assert!(filter(&table, &state).is_empty());
    }

    #[test]
    fn test_head_truncates() {
        let table = table();
        let view = FilteredView::all(&table);
        assert_eq!(view.head(2).len(), 2);
        assert_eq!(view.head(10).len(), 5);
    }
}
