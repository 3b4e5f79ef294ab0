use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::dashboard::Dashboard;
use crate::data::metrics::{format_naira, format_percent};
use crate::data::model::{CellValue, FilterColumn, Listing};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

enum FilterAction {
    Toggle(FilterColumn, CellValue),
    All(FilterColumn),
    None(FilterColumn),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Filters");
    ui.label(RichText::new("Fine-tune the dashboard using the filters below.").weak());
    ui.separator();

    let mut action = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in FilterColumn::ALL {
                let all_values = state.table.distinct(col);
                let selected = state.filters.get(&col);

                // Show count of selected / total in the header
                let n_selected = selected.map(|s| s.len()).unwrap_or(0);
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", col.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                action = Some(FilterAction::All(col));
                            }
                            if ui.small_button("None").clicked() {
                                action = Some(FilterAction::None(col));
                            }
                        });

                        for val in all_values {
                            let label = val.to_string();
                            let mut text = RichText::new(&label);
                            if col == state.condition_colors.column {
                                text = text.color(state.condition_colors.color_for(&label));
                            }

                            let mut checked = selected.is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, text).changed() {
                                action = Some(FilterAction::Toggle(col, val.clone()));
                            }
                        }
                    });
            }
        });

    // One widget changes per frame at most; re-render only when it did.
    match action {
        Some(FilterAction::Toggle(col, val)) => state.toggle_filter_value(col, &val),
        Some(FilterAction::All(col)) => state.select_all(col),
        Some(FilterAction::None(col)) => state.select_none(col),
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} listings loaded, {} visible",
            state.table.len(),
            state.visible()
        ));

        if let Err(e) = &state.dashboard {
            ui.separator();
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – header, KPI tiles, charts, preview
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Car Ads in Nigeria (jiji)");
    ui.label(RichText::new("A strategic overview of car ads in nigeria (jiji)").weak());
    ui.separator();

    let dashboard = match &state.dashboard {
        Ok(d) => d,
        Err(_) => {
            ui.add_space(40.0);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading("No data for this selection");
                ui.label("Select at least one make, condition and year in the sidebar.");
            });
            return;
        }
    };

    metric_tiles(ui, dashboard);
    ui.separator();
    plot::chart_rows(ui, dashboard, &state.condition_colors);
    ui.separator();

    ui.heading("Data Preview");
    preview_table(ui, &state.table.column_names, &dashboard.preview);
}

fn metric_tiles(ui: &mut Ui, dashboard: &Dashboard) {
    let m = &dashboard.metrics;
    let tiles = [
        ("Total number of car listings", m.count.to_string()),
        ("Average car price (₦)", format_naira(m.avg_price)),
        ("Most common car make", m.mode_make.clone()),
        ("Percentage of Foreign Used cars (%)", format_percent(m.pct_foreign_used)),
    ];

    ui.columns(tiles.len(), |cols: &mut [Ui]| {
        for (ui, (label, value)) in cols.iter_mut().zip(tiles) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(label).weak());
                ui.label(RichText::new(value).size(26.0).strong());
            });
        }
    });
}

fn preview_table(ui: &mut Ui, columns: &[String], rows: &[Listing]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(20.0, |mut header| {
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for listing in rows {
                body.row(18.0, |mut row| {
                    for name in columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(listing.get(name).to_string());
                        });
                    }
                });
            }
        });
}
