use std::path::Path;

use anyhow::{Context, Result};

use jiji_dashboard::data::filter::init_filter_state;
use jiji_dashboard::data::loader::{load_csv, DATASET_PATH};
use jiji_dashboard::render;

/// Run one render pass with every filter value selected and print it as JSON.
fn main() -> Result<()> {
    env_logger::init();

    let table = load_csv(Path::new(DATASET_PATH)).with_context(|| format!("loading {DATASET_PATH}"))?;
    log::info!("Loaded {} listings", table.len());

    let dashboard = render(&table, &init_filter_state(&table))?;
    let json = serde_json::to_string_pretty(&dashboard).context("serializing dashboard")?;
    println!("{json}");
    Ok(())
}
