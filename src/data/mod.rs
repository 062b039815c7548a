/// Data layer: table model, station/pollutant catalog, loading, row selection.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  polars CSV / Parquet reader → AirQualityTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ AirQualityTable │  DataFrame, column-existence checks, summary
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  station predicate → LazyFrame
///   └──────────┘
/// ```

pub mod catalog;
pub mod filter;
pub mod loader;
pub mod model;
