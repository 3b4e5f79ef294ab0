use serde::Serialize;

use crate::charts::{self, DashboardCharts};
use crate::data::filter::{filter, FilterState};
use crate::data::metrics::{summarize, SummaryMetrics};
use crate::data::model::{Listing, ListingTable};
use crate::error::EmptyResultError;

/// Rows shown in the data preview table.
pub const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// One render pass: selection → metrics, charts, preview
// ---------------------------------------------------------------------------

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub visible: usize,
    pub metrics: SummaryMetrics,
    pub charts: DashboardCharts,
    /// First [`PREVIEW_ROWS`] visible listings.
    pub preview: Vec<Listing>,
}

/// Filter the table and derive every dashboard element from the result.
///
/// Pure apart from logging; the whole pass fails with [`EmptyResultError`]
/// when the selection leaves no rows.
pub fn render(table: &ListingTable, selection: &FilterState) -> Result<Dashboard, EmptyResultError> {
    let view = filter(table, selection);
    log::debug!("render pass: {} of {} listings visible", view.len(), table.len());

    let metrics = summarize(&view).inspect_err(|e| log::warn!("{e}"))?;

    let charts = DashboardCharts {
        make_count: charts::make_count_bar(&view),
        avg_price_by_make: charts::avg_price_by_make_bar(&view),
        price_by_condition: charts::price_by_condition_box(&view),
        year_histogram: charts::year_histogram(&view),
        year_vs_price: charts::year_price_scatter(&view),
        correlation: charts::correlation_heatmap(&view)?,
    };

    let preview = view.head(PREVIEW_ROWS).into_iter().cloned().collect();

    Ok(Dashboard {
        visible: view.len(),
        metrics,
        charts,
        preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::init_filter_state;
    use crate::data::loader::load_from_reader;
    use crate::data::model::{CellValue, FilterColumn};

    fn table(rows: usize) -> ListingTable {
        let mut csv = String::from("title,make,condition,year,price\n");
        for i in 0..rows {
            let make = if i % 3 == 0 { "Toyota" } else { "Honda" };
            let condition = if i % 2 == 0 { "Foreign Used" } else { "Locally Used" };
            csv.push_str(&format!("car {i},{make},{condition},{},{}\n", 2005 + i % 15, 1_000_000 + i * 10_000));
        }
        load_from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_preview_is_first_ten_rows() {
        let table = table(25);
        let dashboard = render(&table, &init_filter_state(&table)).unwrap();

        assert_eq!(dashboard.visible, 25);
        assert_eq!(dashboard.metrics.count, 25);
        assert_eq!(dashboard.preview.len(), PREVIEW_ROWS);
        assert_eq!(dashboard.preview[0].title, "car 0");
        assert_eq!(dashboard.preview[9].title, "car 9");
    }

    #[test]
    fn test_render_is_idempotent() {
        let table = table(12);
        let mut selection = init_filter_state(&table);
        selection.insert(
            FilterColumn::Make,
            [CellValue::String("Honda".into())].into_iter().collect(),
        );

        let first = render(&table, &selection).unwrap();
        let second = render(&table, &selection).unwrap();
        assert_eq!(first, second);
        assert!(first.preview.iter().all(|l| l.make == "Honda"));
    }

    #[test]
    fn test_empty_selection_fails_the_pass() {
        let table = table(5);
        let mut selection = init_filter_state(&table);
        selection.insert(FilterColumn::Year, Default::default());

        let err = render(&table, &selection).unwrap_err();
        assert_eq!(err.what, "summary metrics");
    }
}
