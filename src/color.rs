use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{CellValue, FilterColumn, ListingTable};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

const COLD: [u8; 3] = [33, 102, 172];
const HOT: [u8; 3] = [178, 24, 43];

/// Diverging blue → white → red scale for correlations in `[-1, 1]`.
/// Undefined cells are light gray.
pub fn heat_color(value: Option<f64>) -> Color32 {
    let Some(v) = value else {
        return Color32::LIGHT_GRAY;
    };
    let t = v.clamp(-1.0, 1.0) as f32;
    let (to, t) = if t < 0.0 { (COLD, -t) } else { (HOT, t) };
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(
        lerp(255, to[0]),
        lerp(255, to[1]),
        lerp(255, to[2]),
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
///
/// Built once from the full table so a category keeps its colour however the
/// filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: FilterColumn,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given column from its distinct values.
    pub fn new(column: FilterColumn, distinct: &[CellValue]) -> Self {
        let palette = generate_palette(distinct.len());
        let mapping: BTreeMap<String, Color32> = distinct
            .iter()
            .zip(palette)
            .map(|(v, c)| (v.to_string(), c))
            .collect();

        ColorMap {
            column,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn for_table(table: &ListingTable, column: FilterColumn) -> Self {
        Self::new(column, table.distinct(column))
    }

    /// Look up the colour for a category label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
