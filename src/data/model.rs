use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a non-required column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the pandas dtypes a CSV column can take.
/// Filter selections live in `BTreeSet`s, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Markers `pandas.read_csv` reads as missing by default.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw CSV field the way `pandas.read_csv` would.
    ///
    /// Numbers and booleans may carry surrounding blanks; text is kept as is.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() || NA_TOKENS.contains(&t) {
            return CellValue::Null;
        }
        if let Ok(i) = t.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = t.parse::<f64>() {
            if f.is_nan() {
                return CellValue::Null;
            }
            return CellValue::Float(f);
        }
        match t {
            "True" | "TRUE" | "true" => CellValue::Bool(true),
            "False" | "FALSE" | "false" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }

    /// Interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// FilterColumn – the three columns the sidebar can filter on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Make,
    Condition,
    Year,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 3] = [FilterColumn::Make, FilterColumn::Condition, FilterColumn::Year];

    /// Column name in the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            FilterColumn::Make => "make",
            FilterColumn::Condition => "condition",
            FilterColumn::Year => "year",
        }
    }

    /// Widget label in the sidebar.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Make => "Car Make",
            FilterColumn::Condition => "Car Condition",
            FilterColumn::Year => "Car Year",
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the CSV
// ---------------------------------------------------------------------------

/// A single car advertisement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub title: String,
    pub make: String,
    pub condition: String,
    pub year: i64,
    /// Asking price in Naira.
    pub price: f64,
    /// Any further columns of the file: column_name → value.
    #[serde(flatten)]
    pub extra: BTreeMap<String, CellValue>,
}

impl Listing {
    /// The value this listing holds for a filterable column.
    pub fn filter_value(&self, column: FilterColumn) -> CellValue {
        match column {
            FilterColumn::Make => CellValue::String(self.make.clone()),
            FilterColumn::Condition => CellValue::String(self.condition.clone()),
            FilterColumn::Year => CellValue::Integer(self.year),
        }
    }

    /// Look up any column by its header name.
    pub fn get(&self, column: &str) -> CellValue {
        match column {
            "title" => CellValue::String(self.title.clone()),
            "make" => CellValue::String(self.make.clone()),
            "condition" => CellValue::String(self.condition.clone()),
            "year" => CellValue::Integer(self.year),
            "price" => CellValue::Float(self.price),
            other => self.extra.get(other).cloned().unwrap_or(CellValue::Null),
        }
    }

    /// Numeric view of a column, `None` for nulls and non-numeric cells.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "year" => Some(self.year as f64),
            "price" => Some(self.price),
            other => self.extra.get(other).and_then(CellValue::as_f64),
        }
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct ListingTable {
    /// All listings in file order.
    pub listings: Vec<Listing>,
    /// Header columns in file order.
    pub column_names: Vec<String>,
    /// For each filterable column its distinct values in first-appearance order.
    pub unique_values: BTreeMap<FilterColumn, Vec<CellValue>>,
}

impl ListingTable {
    /// Build column indices from the loaded listings.
    pub fn from_listings(listings: Vec<Listing>, column_names: Vec<String>) -> Self {
        let unique_values = FilterColumn::ALL
            .iter()
            .map(|&col| {
                let mut seen = HashSet::new();
                let values: Vec<CellValue> = listings
                    .iter()
                    .map(|l| l.filter_value(col))
                    .filter(|v| seen.insert(v.clone()))
                    .collect();
                (col, values)
            })
            .collect();

        ListingTable {
            listings,
            column_names,
            unique_values,
        }
    }

    /// Columns pandas would report as numeric, in header order.
    ///
    /// `year` and `price` always qualify; an extra column qualifies when every
    /// non-null cell is an integer or a float, so an all-missing column counts
    /// (pandas reads it as float64).
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|col| match col.as_str() {
                "year" | "price" => true,
                "title" | "make" | "condition" => false,
                other => {
                    self.listings
                        .iter()
                        .filter_map(|l| l.extra.get(other))
                        .filter(|v| !v.is_null())
                        .all(|v| v.as_f64().is_some())
                }
            })
            .cloned()
            .collect()
    }

    /// Distinct values of a filterable column, in first-appearance order.
    pub fn distinct(&self, column: FilterColumn) -> &[CellValue] {
        self.unique_values
            .get(&column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
