use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};

use crate::charts::{ChartKind, ChartSpec};
use crate::color::{heat_color, ColorMap};
use crate::dashboard::Dashboard;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Chart grid (three rows of two)
// ---------------------------------------------------------------------------

/// Render the six dashboard charts, two per row, each under its sub-heading.
pub fn chart_rows(ui: &mut Ui, dashboard: &Dashboard, colors: &ColorMap) {
    let c = &dashboard.charts;
    let rows = [
        [
            ("Bar chart of Count of cars by make", &c.make_count),
            ("Bar chart of average price by make", &c.avg_price_by_make),
        ],
        [
            ("Boxplot of price distribution by condition", &c.price_by_condition),
            ("Histogram distribution of year", &c.year_histogram),
        ],
        [
            ("Scatter plot of year vs price (colored by condition)", &c.year_vs_price),
            ("Correlation heatmap of numeric fields", &c.correlation),
        ],
    ];

    for (r, row) in rows.into_iter().enumerate() {
        ui.columns(2, |cols: &mut [Ui]| {
            for (i, (ui, (heading, spec))) in cols.iter_mut().zip(row).enumerate() {
                ui.strong(heading);
                chart(ui, &format!("chart_{r}_{i}"), spec, colors);
            }
        });
        ui.separator();
    }
}

/// Draw a single [`ChartSpec`] with egui_plot.
pub fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec, colors: &ColorMap) {
    ui.label(RichText::new(&spec.title).size(15.0));

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true);
    if spec.show_legend {
        plot = plot.legend(Legend::default());
    }

    match &spec.kind {
        ChartKind::Bar { bars } => {
            let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
            let bars: Vec<Bar> = bars
                .iter()
                .enumerate()
                .map(|(i, b)| Bar::new(i as f64, b.value).name(&b.label).width(0.7))
                .collect();
            plot.x_axis_formatter(category_formatter(labels))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
                });
        }
        ChartKind::Box { boxes } => {
            let labels: Vec<String> = boxes.iter().map(|b| b.label.clone()).collect();
            plot.x_axis_formatter(category_formatter(labels))
                .show(ui, |plot_ui| {
                    for (i, b) in boxes.iter().enumerate() {
                        let color = colors.color_for(&b.label);
                        let spread = BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker);
                        let elem = BoxElem::new(i as f64, spread)
                            .name(&b.label)
                            .box_width(0.5)
                            .whisker_width(0.3)
                            .stroke(Stroke::new(1.5, color))
                            .fill(color.gamma_multiply(0.3));
                        plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&b.label));

                        let outliers: Vec<[f64; 2]> = b.outliers.iter().map(|&y| [i as f64, y]).collect();
                        if !outliers.is_empty() {
                            plot_ui.points(
                                Points::new(PlotPoints::from(outliers))
                                    .radius(2.5)
                                    .color(color),
                            );
                        }
                    }
                });
        }
        ChartKind::Histogram { bins } => {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|b| {
                    Bar::new((b.start + b.end) / 2.0, b.count as f64)
                        .width(b.end - b.start)
                        .name(format!("{:.1} – {:.1}", b.start, b.end))
                })
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
            });
        }
        ChartKind::Scatter { series, .. } => {
            plot.show(ui, |plot_ui| {
                for s in series {
                    plot_ui.points(
                        Points::new(PlotPoints::from(s.points.clone()))
                            .radius(3.0)
                            .color(colors.color_for(&s.key))
                            .name(&s.key),
                    );
                }
            });
        }
        ChartKind::Heatmap { labels, cells } => {
            heatmap(ui, plot, labels, cells);
        }
    }
}

// ---------------------------------------------------------------------------
// Heatmap: one coloured square per cell, value annotated
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, plot: Plot, labels: &[String], cells: &[Vec<Option<f64>>]) {
    // Row 0 is drawn on top, so rows go down the negative y axis.
    let row_labels = labels.to_vec();
    let row_formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        category_label(&row_labels, -mark.value)
    };

    plot.x_axis_formatter(category_formatter(labels.to_vec()))
        .y_axis_formatter(row_formatter)
        .data_aspect(1.0)
        .show_grid(false)
        .show(ui, |plot_ui| {
            for (r, row) in cells.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    let (x, y) = (c as f64, -(r as f64));
                    let square = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(square))
                            .fill_color(heat_color(*cell))
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );

                    let text = match cell {
                        Some(v) => format!("{v:.2}"),
                        None => "n/a".to_string(),
                    };
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(text).color(Color32::BLACK),
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Label integer grid marks with category names, leave the others blank.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| category_label(&labels, mark.value)
}

fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
