//! Interactive dashboard over used-car listings scraped from jiji.ng.
//!
//! The data, chart and render layers are toolkit independent; `app`, `state`
//! and `ui` wire them into an eframe window.

pub mod app;
pub mod charts;
pub mod color;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use dashboard::{render, Dashboard};
pub use error::{DataLoadError, EmptyResultError};
