use std::collections::{BTreeMap, HashMap};

use super::stats::{box_summary, histogram, pearson};
use super::{BarDatum, ChartKind, ChartSpec, ScatterSeries};
use crate::data::filter::FilteredView;
use crate::data::model::Listing;
use crate::error::EmptyResultError;

/// Number of bins in the manufacturing-year histogram.
pub const HISTOGRAM_BINS: usize = 30;

fn spec(title: &str, x_label: &str, y_label: &str, show_legend: bool, kind: ChartKind) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        show_legend,
        kind,
    }
}

/// Group listings by a text key, keeping groups in first-appearance order.
fn group_by<'a, T>(
    view: &FilteredView<'a>,
    key: impl Fn(&'a Listing) -> &'a str,
    value: impl Fn(&'a Listing) -> T,
) -> Vec<(&'a str, Vec<T>)> {
    let mut groups: Vec<(&'a str, Vec<T>)> = Vec::new();
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    for listing in view.iter() {
        let k = key(listing);
        let idx = *slot.entry(k).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(value(listing));
    }
    groups
}

// ---------------------------------------------------------------------------
// 1. Count of cars by make
// ---------------------------------------------------------------------------

/// One bar per make, tallest first; equal counts keep first-appearance order.
pub fn make_count_bar(view: &FilteredView<'_>) -> ChartSpec {
    let mut bars: Vec<BarDatum> = group_by(view, |l| l.make.as_str(), |_| ())
        .into_iter()
        .map(|(make, rows)| BarDatum {
            label: make.to_string(),
            value: rows.len() as f64,
        })
        .collect();
    // stable sort
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));

    spec("Count of Cars by Make", "Make", "Count", false, ChartKind::Bar { bars })
}

// ---------------------------------------------------------------------------
// 2. Average price by make
// ---------------------------------------------------------------------------

/// One bar per make in alphabetical order, height = mean price.
pub fn avg_price_by_make_bar(view: &FilteredView<'_>) -> ChartSpec {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for listing in view.iter() {
        let entry = sums.entry(listing.make.as_str()).or_insert((0.0, 0));
        entry.0 += listing.price;
        entry.1 += 1;
    }
    let bars = sums
        .into_iter()
        .map(|(make, (total, n))| BarDatum {
            label: make.to_string(),
            value: total / n as f64,
        })
        .collect();

    spec(
        "Average Price by Make",
        "Make",
        "Average Price (₦)",
        false,
        ChartKind::Bar { bars },
    )
}

// ---------------------------------------------------------------------------
// 3. Price distribution by condition
// ---------------------------------------------------------------------------

pub fn price_by_condition_box(view: &FilteredView<'_>) -> ChartSpec {
    let boxes = group_by(view, |l| l.condition.as_str(), |l| l.price)
        .into_iter()
        .filter_map(|(condition, prices)| box_summary(condition, &prices))
        .collect();

    spec(
        "Price Distribution by Car Condition",
        "Condition",
        "Price (₦)",
        false,
        ChartKind::Box { boxes },
    )
}

// ---------------------------------------------------------------------------
// 4. Manufacturing year histogram
// ---------------------------------------------------------------------------

pub fn year_histogram(view: &FilteredView<'_>) -> ChartSpec {
    let years: Vec<f64> = view.iter().map(|l| l.year as f64).collect();
    let bins = histogram(&years, HISTOGRAM_BINS);

    spec(
        "Distribution of Car Manufacturing Year",
        "Year",
        "count",
        false,
        ChartKind::Histogram { bins },
    )
}

// ---------------------------------------------------------------------------
// 5. Year vs price, coloured by condition
// ---------------------------------------------------------------------------

pub fn year_price_scatter(view: &FilteredView<'_>) -> ChartSpec {
    let series = group_by(view, |l| l.condition.as_str(), |l| [l.year as f64, l.price])
        .into_iter()
        .map(|(condition, points)| ScatterSeries {
            key: condition.to_string(),
            points,
        })
        .collect();

    spec(
        "Year vs Price (Colored by Condition)",
        "Year",
        "Price (₦)",
        true,
        ChartKind::Scatter {
            color_by: "condition".to_string(),
            series,
        },
    )
}

// ---------------------------------------------------------------------------
// 6. Correlation heatmap of numeric columns
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation of every numeric column.
///
/// Pairs where either cell is null are skipped per column pair. Cells with no
/// defined correlation (constant column, fewer than two pairs) are `None`.
pub fn correlation_heatmap(view: &FilteredView<'_>) -> Result<ChartSpec, EmptyResultError> {
    if view.is_empty() {
        return Err(EmptyResultError::new("correlation heatmap"));
    }
    let labels = view.table().numeric_columns();
    if labels.len() < 2 {
        return Err(EmptyResultError::new("correlation heatmap"));
    }

    let columns: Vec<Vec<Option<f64>>> = labels
        .iter()
        .map(|col| view.iter().map(|l| l.numeric(col)).collect())
        .collect();

    let cells = columns
        .iter()
        .map(|a| {
            columns
                .iter()
                .map(|b| {
                    let pairs: Vec<(f64, f64)> = a
                        .iter()
                        .zip(b)
                        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                        .collect();
                    pearson(&pairs)
                })
                .collect()
        })
        .collect();

    Ok(spec(
        "Correlation Heatmap of Numeric Fields",
        "",
        "",
        false,
        ChartKind::Heatmap { labels, cells },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::BoxGroup;
    use crate::data::filter::{filter, init_filter_state};
    use crate::data::loader::load_from_reader;
    use crate::data::model::{FilterColumn, ListingTable};

    const SAMPLE: &str = "\
title,make,condition,year,price,mileage
a,Toyota,Foreign Used,2015,3000000,90000
b,Honda,Locally Used,2018,2000000,60000
c,Honda,Foreign Used,2012,1500000,
d,Lexus,New,2022,9000000,10
e,Toyota,Locally Used,2010,1000000,150000
";

    fn table() -> ListingTable {
        load_from_reader(SAMPLE.as_bytes()).unwrap()
    }

    fn bars(spec: &ChartSpec) -> Vec<(String, f64)> {
        match &spec.kind {
            ChartKind::Bar { bars } => bars.iter().map(|b| (b.label.clone(), b.value)).collect(),
            other => panic!("expected bar chart, got {other:?}"),
        }
    }

    #[test]
    fn test_make_count_sorted_by_count_then_first_seen() {
        let table = table();
        let chart = make_count_bar(&FilteredView::all(&table));
        assert_eq!(
            bars(&chart),
            vec![
                ("Toyota".to_string(), 2.0),
                ("Honda".to_string(), 2.0),
                ("Lexus".to_string(), 1.0)
            ]
        );
        assert_eq!(chart.title, "Count of Cars by Make");
        assert!(!chart.show_legend);
    }

    #[test]
    fn test_avg_price_by_make_is_alphabetical() {
        let table = table();
        let chart = avg_price_by_make_bar(&FilteredView::all(&table));
        assert_eq!(
            bars(&chart),
            vec![
                ("Honda".to_string(), 1_750_000.0),
                ("Lexus".to_string(), 9_000_000.0),
                ("Toyota".to_string(), 2_000_000.0)
            ]
        );
        assert_eq!(chart.y_label, "Average Price (₦)");
    }

    #[test]
    fn test_box_per_condition_in_first_seen_order() {
        let table = table();
        let chart = price_by_condition_box(&FilteredView::all(&table));
        let ChartKind::Box { boxes } = &chart.kind else {
            panic!("expected box chart");
        };
        let labels: Vec<&str> = boxes.iter().map(|b: &BoxGroup| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Foreign Used", "Locally Used", "New"]);
        assert_eq!(boxes[0].median, 2_250_000.0);
        assert_eq!(boxes[2].min, 9_000_000.0);
    }

    #[test]
    fn test_histogram_has_thirty_bins() {
        let table = table();
        let chart = year_histogram(&FilteredView::all(&table));
        let ChartKind::Histogram { bins } = &chart.kind else {
            panic!("expected histogram");
        };
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
    }

    #[test]
    fn test_scatter_groups_points_by_condition() {
        let table = table();
        let chart = year_price_scatter(&FilteredView::all(&table));
        let ChartKind::Scatter { color_by, series } = &chart.kind else {
            panic!("expected scatter");
        };
        assert_eq!(color_by, "condition");
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].key, "Foreign Used");
        assert_eq!(series[0].points, vec![[2015.0, 3_000_000.0], [2012.0, 1_500_000.0]]);
        assert_eq!(series.iter().map(|s| s.points.len()).sum::<usize>(), 5);
    }

    #[test]
    fn test_heatmap_is_square_with_unit_diagonal() {
        let table = table();
        let chart = correlation_heatmap(&FilteredView::all(&table)).unwrap();
        let ChartKind::Heatmap { labels, cells } = &chart.kind else {
            panic!("expected heatmap");
        };
        assert_eq!(labels, &vec!["year", "price", "mileage"]);
        assert_eq!(cells.len(), 3);
        for (i, row) in cells.iter().enumerate() {
            assert_eq!(row.len(), 3);
            let diag = row[i].unwrap();
            assert!((diag - 1.0).abs() < 1e-9);
            for (j, cell) in row.iter().enumerate() {
                assert_eq!(*cell, cells[j][i]);
            }
        }
        // newer cars cost more in this sample
        assert!(cells[0][1].unwrap() > 0.0);
    }

    #[test]
    fn test_empty_view() {
        let table = table();
        let mut state = init_filter_state(&table);
        state.insert(FilterColumn::Make, Default::default());
        let view = filter(&table, &state);

        assert!(make_count_bar(&view).is_empty());
        assert!(avg_price_by_make_bar(&view).is_empty());
        assert!(price_by_condition_box(&view).is_empty());
        assert!(year_histogram(&view).is_empty());
        assert!(year_price_scatter(&view).is_empty());
        assert_eq!(
            correlation_heatmap(&view).unwrap_err(),
            EmptyResultError::new("correlation heatmap")
        );
    }

    #[test]
    fn test_single_row_heatmap_cells_are_undefined() {
        let table = table();
        let mut state = init_filter_state(&table);
        state.insert(
            FilterColumn::Make,
            [crate::data::model::CellValue::String("Lexus".into())]
                .into_iter()
                .collect(),
        );
        let chart = correlation_heatmap(&filter(&table, &state)).unwrap();
        let ChartKind::Heatmap { cells, .. } = &chart.kind else {
            panic!("expected heatmap");
        };
        assert!(cells.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_heatmap_skips_missing_markers() {
        let csv = "\
title,make,condition,year,price,mileage,engine
Camry,Toyota,Foreign Used,2015,3000000,90000,
Accord,Honda,Locally Used,2018,2000000,N/A,
RX 350,Lexus,Foreign Used,2010,4500000,140000,
Corolla,Toyota,Locally Used,2012,1800000,NaN,
Sienna,Toyota,Locally Used,2008,2100000,200000,
";
        let table = load_from_reader(csv.as_bytes()).unwrap();
        let chart = correlation_heatmap(&FilteredView::all(&table)).unwrap();
        let ChartKind::Heatmap { labels, cells } = &chart.kind else {
            panic!("expected heatmap");
        };

        assert_eq!(labels, &vec!["year", "price", "mileage", "engine"]);
        for i in 0..3 {
            for j in 0..3 {
                let r = cells[i][j].unwrap();
                assert!(r.is_finite() && r.abs() <= 1.0 + 1e-9);
            }
        }
        // mileage falls as year rises over the three complete rows
        assert!(cells[0][2].unwrap() < 0.0);
        assert!(cells[3].iter().all(Option::is_none));
        assert!(cells.iter().all(|row| row[3].is_none()));
    }
}
