use std::collections::BTreeSet;

use jiji_dashboard::charts::ChartKind;
use jiji_dashboard::data::filter::{filter, init_filter_state, FilterState};
use jiji_dashboard::data::loader::load_from_reader;
use jiji_dashboard::data::metrics::summarize;
use jiji_dashboard::data::model::{CellValue, FilterColumn, ListingTable};
use jiji_dashboard::state::AppState;
use jiji_dashboard::{charts, render, EmptyResultError};

const TWO_CARS: &str = "\
title,make,condition,year,price
Toyota Camry 2015,Toyota,Foreign Used,2015,3000000
Honda Accord 2018,Honda,Locally Used,2018,2000000
";

const LOT: &str = "\
title,make,condition,year,price,mileage
Toyota Camry 2015,Toyota,Foreign Used,2015,3000000,90000
Honda Accord 2018,Honda,Locally Used,2018,2000000,60000
Lexus RX 350 2010,Lexus,foreign used,2010,4500000,140000
Toyota Corolla 2012,Toyota,Locally Used,2012,1800000,120000
Kia Rio 2023,Kia,Brand New,2023,12000000,
Honda Civic 2016,Honda,Foreign Used,2016,2600000,70000
Toyota Sienna 2008,Toyota,Locally Used,2008,2100000,200000
";

fn load(csv: &str) -> ListingTable {
    load_from_reader(csv.as_bytes()).unwrap()
}

fn only(values: &[CellValue]) -> BTreeSet<CellValue> {
    values.iter().cloned().collect()
}

fn s(v: &str) -> CellValue {
    CellValue::String(v.to_string())
}

#[test]
fn two_car_scenario_with_default_selection() {
    let table = load(TWO_CARS);
    let dashboard = render(&table, &init_filter_state(&table)).unwrap();

    assert_eq!(dashboard.metrics.count, 2);
    assert_eq!(dashboard.metrics.avg_price, 2_500_000);
    assert_eq!(dashboard.metrics.mode_make, "Toyota");
    assert_eq!(dashboard.metrics.pct_foreign_used, 50.0);
    assert_eq!(dashboard.preview.len(), 2);
}

#[test]
fn restricting_make_to_honda() {
    let table = load(TWO_CARS);
    let mut selection = init_filter_state(&table);
    selection.insert(FilterColumn::Make, only(&[s("Honda")]));

    let view = filter(&table, &selection);
    assert_eq!(view.len(), 1);
    assert_eq!(view.head(1)[0].make, "Honda");

    let metrics = summarize(&view).unwrap();
    assert_eq!(metrics.count, 1);
    assert_eq!(metrics.pct_foreign_used, 0.0);
}

#[test]
fn unmatched_condition_empties_everything() {
    let table = load(TWO_CARS);
    let mut selection = init_filter_state(&table);
    selection.insert(FilterColumn::Condition, only(&[s("Salvage")]));

    let view = filter(&table, &selection);
    assert!(view.is_empty());
    assert!(summarize(&view).is_err());
    assert!(charts::correlation_heatmap(&view).is_err());
    assert_eq!(
        render(&table, &selection).unwrap_err(),
        EmptyResultError::new("summary metrics")
    );
}

#[test]
fn header_only_file_renders_the_no_data_state() {
    let table = load("title,make,condition,year,price\n");
    assert!(table.is_empty());

    let selection = init_filter_state(&table);
    assert_eq!(selection.len(), FilterColumn::ALL.len());
    assert!(selection.values().all(|values| values.is_empty()));
    assert!(filter(&table, &selection).is_empty());
    assert_eq!(
        render(&table, &selection).unwrap_err(),
        EmptyResultError::new("summary metrics")
    );

    let state = AppState::new(table);
    assert!(state.dashboard.is_err());
    assert_eq!(state.visible(), 0);
}

#[test]
fn default_selection_is_identity() {
    let table = load(LOT);
    let view = filter(&table, &init_filter_state(&table));
    assert_eq!(view.indices(), (0..table.len()).collect::<Vec<_>>().as_slice());
}

/// Every combination of one make, one condition and a set of years.
#[test]
fn filtered_rows_satisfy_every_predicate() {
    let table = load(LOT);
    let years = table.distinct(FilterColumn::Year).to_vec();

    for make in table.distinct(FilterColumn::Make) {
        for condition in table.distinct(FilterColumn::Condition) {
            for split in 0..=years.len() {
                let mut selection: FilterState = init_filter_state(&table);
                selection.insert(FilterColumn::Make, only(std::slice::from_ref(make)));
                selection.insert(FilterColumn::Condition, only(std::slice::from_ref(condition)));
                selection.insert(FilterColumn::Year, only(&years[..split]));

                let view = filter(&table, &selection);
                let mut last = None;
                for (&idx, listing) in view.indices().iter().zip(view.iter()) {
                    assert_eq!(&table.listings[idx], listing);
                    assert_eq!(&listing.filter_value(FilterColumn::Make), make);
                    assert_eq!(&listing.filter_value(FilterColumn::Condition), condition);
                    assert!(years[..split].contains(&listing.filter_value(FilterColumn::Year)));
                    if let Some(prev) = last {
                        assert!(prev < idx, "table order lost");
                    }
                    last = Some(idx);
                }

                match summarize(&view) {
                    Ok(m) => {
                        assert!(!view.is_empty());
                        assert!((0.0..=100.0).contains(&m.pct_foreign_used));
                        let mean = view.iter().map(|l| l.price).sum::<f64>() / view.len() as f64;
                        assert!((m.avg_price as f64 - mean).abs() <= 0.5);
                    }
                    Err(_) => assert!(view.is_empty()),
                }
            }
        }
    }
}

#[test]
fn foreign_used_match_ignores_case() {
    let table = load(LOT);
    let dashboard = render(&table, &init_filter_state(&table)).unwrap();
    // Camry, RX 350 (lower-case), Civic
    assert_eq!(dashboard.metrics.pct_foreign_used, 42.86);
    assert_eq!(dashboard.metrics.mode_make, "Toyota");
}

#[test]
fn charts_follow_the_selection() {
    let table = load(LOT);
    let mut selection = init_filter_state(&table);
    selection.insert(FilterColumn::Make, only(&[s("Toyota"), s("Honda")]));
    let dashboard = render(&table, &selection).unwrap();

    let ChartKind::Bar { bars } = &dashboard.charts.make_count.kind else {
        panic!("expected bars");
    };
    let counts: Vec<(&str, f64)> = bars.iter().map(|b| (b.label.as_str(), b.value)).collect();
    assert_eq!(counts, vec![("Toyota", 3.0), ("Honda", 2.0)]);

    let ChartKind::Scatter { series, .. } = &dashboard.charts.year_vs_price.kind else {
        panic!("expected scatter");
    };
    assert_eq!(series.iter().map(|s| s.points.len()).sum::<usize>(), 5);

    let ChartKind::Heatmap { labels, .. } = &dashboard.charts.correlation.kind else {
        panic!("expected heatmap");
    };
    assert_eq!(labels, &["year", "price", "mileage"]);
}

#[test]
fn dashboard_serializes_to_json() {
    let table = load(TWO_CARS);
    let dashboard = render(&table, &init_filter_state(&table)).unwrap();
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["metrics"]["mode_make"], "Toyota");
    assert_eq!(json["charts"]["year_histogram"]["kind"]["type"], "histogram");
    assert_eq!(json["preview"][1]["make"], "Honda");
}
