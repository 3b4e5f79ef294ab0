use crate::color::ColorMap;
use crate::dashboard::{render, Dashboard};
use crate::data::filter::{init_filter_state, FilterState};
use crate::data::model::{CellValue, FilterColumn, ListingTable};
use crate::error::EmptyResultError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Listings loaded at startup, never mutated afterwards.
    pub table: ListingTable,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Result of the last render pass.
    pub dashboard: Result<Dashboard, EmptyResultError>,

    /// Colours of the condition categories (scatter, box plot, sidebar).
    pub condition_colors: ColorMap,
}

impl AppState {
    /// Ingest the loaded table with every filter value selected.
    pub fn new(table: ListingTable) -> Self {
        let filters = init_filter_state(&table);
        let dashboard = render(&table, &filters);
        let condition_colors = ColorMap::for_table(&table, FilterColumn::Condition);
        Self {
            table,
            filters,
            dashboard,
            condition_colors,
        }
    }

    /// Re-run the render pass after a filter change.
    pub fn refilter(&mut self) {
        self.dashboard = render(&self.table, &self.filters);
    }

    /// Number of listings passing the current filters.
    pub fn visible(&self) -> usize {
        self.dashboard.as_ref().map(|d| d.visible).unwrap_or(0)
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &CellValue) {
        let selected = self.filters.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        let all_vals = self.table.distinct(column).iter().cloned().collect();
        self.filters.insert(column, all_vals);
        self.refilter();
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filters.insert(column, Default::default());
        self.refilter();
    }
}
