use thiserror::Error;

/// Failure to turn the listings file into a [`ListingTable`](crate::data::model::ListingTable).
/// Fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// A filter combination left no rows, so the named result is undefined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no data for this selection ({what} is undefined)")]
pub struct EmptyResultError {
    pub what: &'static str,
}

impl EmptyResultError {
    pub fn new(what: &'static str) -> Self {
        Self { what }
    }
}
