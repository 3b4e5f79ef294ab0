use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::model::{CellValue, Listing, ListingTable};
use crate::error::DataLoadError;

/// Location of the pre-cleaned listings file, relative to the working directory.
pub const DATASET_PATH: &str = "cleaned_jiji_car_dataset.csv";

/// Columns every listings file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["title", "make", "condition", "year", "price"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the listings table from a comma-delimited file with a header row.
pub fn load_csv(path: &Path) -> Result<ListingTable, DataLoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// Parse listings from any reader.
///
/// The header must name at least `title, make, condition, year, price`; any
/// other columns are kept as dynamically typed cells. Text is stored exactly
/// as written; only numeric fields tolerate surrounding blanks.
pub fn load_from_reader<R: Read>(reader: R) -> Result<ListingTable, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    let index = ColumnIndex::new(&headers)?;

    let mut listings = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        listings.push(index.parse_record(&record, row_no)?);
    }

    Ok(ListingTable::from_listings(listings, headers))
}

// ---------------------------------------------------------------------------
// Header → field positions
// ---------------------------------------------------------------------------

struct ColumnIndex {
    title: usize,
    make: usize,
    condition: usize,
    year: usize,
    price: usize,
    extra: Vec<(usize, String)>,
}

impl ColumnIndex {
    fn new(headers: &[String]) -> Result<Self, DataLoadError> {
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DataLoadError::MissingColumn(name))
        };

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !REQUIRED_COLUMNS.contains(&h.as_str()))
            .map(|(i, h)| (i, h.clone()))
            .collect();

        Ok(ColumnIndex {
            title: position("title")?,
            make: position("make")?,
            condition: position("condition")?,
            year: position("year")?,
            price: position("price")?,
            extra,
        })
    }

    fn parse_record(&self, record: &StringRecord, row: usize) -> Result<Listing, DataLoadError> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let invalid = |column: &'static str, value: &str| DataLoadError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        };

        let make = field(self.make);
        if make.is_empty() {
            return Err(invalid("make", make));
        }
        let condition = field(self.condition);
        if condition.is_empty() {
            return Err(invalid("condition", condition));
        }

        let raw_year = field(self.year).trim();
        let year = parse_year(raw_year).ok_or_else(|| invalid("year", raw_year))?;

        let raw_price = field(self.price).trim();
        let price = raw_price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| invalid("price", raw_price))?;

        let extra: BTreeMap<String, CellValue> = self
            .extra
            .iter()
            .map(|(idx, name)| (name.clone(), CellValue::parse(field(*idx))))
            .collect();

        Ok(Listing {
            title: field(self.title).to_string(),
            make: make.to_string(),
            condition: condition.to_string(),
            year,
            price,
            extra,
        })
    }
}

/// Years may have been written as floats (`2015.0`) by the cleaning step.
fn parse_year(s: &str) -> Option<i64> {
    if let Ok(y) = s.parse::<i64>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}
