use std::path::Path;

use anyhow::{anyhow, Context};
use eframe::egui;

use jiji_dashboard::app::DashboardApp;
use jiji_dashboard::data::loader::{load_csv, DATASET_PATH};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let table = match load_csv(Path::new(DATASET_PATH)) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load {DATASET_PATH}: {e}");
            return Err(e).with_context(|| format!("loading {DATASET_PATH}"));
        }
    };
    log::info!(
        "Loaded {} listings with columns {:?}",
        table.len(),
        table.column_names
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Used Cars In Nigeria (jiji)",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(table)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
