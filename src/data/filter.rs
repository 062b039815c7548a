use polars::prelude::*;

use super::catalog::{STATION_COLUMN, Station};
use super::model::AirQualityTable;

// ---------------------------------------------------------------------------
// Row selection: which rows a report looks at
// ---------------------------------------------------------------------------

/// Predicate for rows recorded at `station`.
///
/// Matches the station name exactly; missing cells never match. Callers
/// guard on the column existing first.
pub fn at_station(station: Station) -> Expr {
    col(STATION_COLUMN)
        .cast(DataType::String)
        .eq(lit(station.name()))
}

/// Lazy query over the rows recorded at `station`.
pub fn station_rows(table: &AirQualityTable, station: Station) -> LazyFrame {
    table.lazy().filter(at_station(station))
}
