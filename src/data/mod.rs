/// Data layer: core types, loading, filtering and summary metrics.
///
/// Architecture:
/// ```text
///  cleaned_jiji_car_dataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ListingTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable  │  Vec<Listing>, distinct values per filter column
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply per-column selections → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ metrics   │  count / mean price / mode make / % foreign used
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod metrics;
