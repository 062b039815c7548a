//! The four dashboard reports.
//!
//! Every report first checks that the columns it reads exist; a missing
//! column turns the report into a [`ReportError`] instead of partial output.
//! Reports only read the table and own the tables they return.

pub mod aggregate;
pub mod correlation;
pub mod export;

use polars::prelude::PolarsError;

use crate::data::catalog::{
    CORRELATION_COLUMNS, POLLUTANT_COLUMNS, Pollutant, STATION_COLUMN, Station, YEAR_COLUMN,
};
use crate::data::filter::station_rows;
use crate::data::model::AirQualityTable;

use aggregate::{GroupedMeans, grouped_means};
use correlation::CorrelationMatrix;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("Column(s) not found in the dataset: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Could not compute the report: {0}")]
    Query(String),
}

impl From<PolarsError> for ReportError {
    fn from(e: PolarsError) -> Self {
        log::error!("Report query failed: {e}");
        ReportError::Query(e.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

fn require(table: &AirQualityTable, columns: &[&str]) -> ReportResult<()> {
    let missing = table.missing_columns(columns);
    if missing.is_empty() {
        Ok(())
    } else {
        log::warn!("Report skipped, missing columns {missing:?}");
        Err(ReportError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Yearly mean of one pollutant at one station (year ascending).
pub fn pollutant_yearly_trend(
    table: &AirQualityTable,
    pollutant: Pollutant,
    station: Station,
) -> ReportResult<GroupedMeans> {
    require(table, &[YEAR_COLUMN, STATION_COLUMN, pollutant.column()])?;
    let rows = station_rows(table, station);
    Ok(grouped_means(rows, YEAR_COLUMN, &[pollutant.column()])?)
}

/// Yearly mean of all six pollutants at one station.
pub fn station_yearly_trend(
    table: &AirQualityTable,
    station: Station,
) -> ReportResult<GroupedMeans> {
    let mut required = vec![YEAR_COLUMN, STATION_COLUMN];
    required.extend(POLLUTANT_COLUMNS);
    require(table, &required)?;
    let rows = station_rows(table, station);
    Ok(grouped_means(rows, YEAR_COLUMN, &POLLUTANT_COLUMNS)?)
}

/// Correlation between dew point, temperature, PM2.5 and PM10.
pub fn correlation_report(table: &AirQualityTable) -> ReportResult<CorrelationMatrix> {
    require(table, &CORRELATION_COLUMNS)?;
    Ok(CorrelationMatrix::compute(table, &CORRELATION_COLUMNS)?)
}

/// Mean of every pollutant per station, over all rows.
pub fn station_summary(table: &AirQualityTable) -> ReportResult<GroupedMeans> {
    let mut required = vec![STATION_COLUMN];
    required.extend(POLLUTANT_COLUMNS);
    require(table, &required)?;
    Ok(grouped_means(table.lazy(), STATION_COLUMN, &POLLUTANT_COLUMNS)?)
}

// ---------------------------------------------------------------------------
// Selection and report set
// ---------------------------------------------------------------------------

/// The user's choices that parameterise the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Pollutant for the single-pollutant trend.
    pub pollutant: Pollutant,
    /// Fixed station of the single-pollutant trend.
    pub trend_station: Station,
    /// Station for the all-pollutant trend.
    pub station: Station,
}

/// All four reports for one table and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub pollutant_trend: ReportResult<GroupedMeans>,
    pub station_trend: ReportResult<GroupedMeans>,
    pub correlation: ReportResult<CorrelationMatrix>,
    pub station_summary: ReportResult<GroupedMeans>,
}

impl Reports {
    pub fn compute(table: &AirQualityTable, selection: &Selection) -> Self {
        Reports {
            pollutant_trend: pollutant_yearly_trend(
                table,
                selection.pollutant,
                selection.trend_station,
            ),
            station_trend: station_yearly_trend(table, selection.station),
            correlation: correlation_report(table),
            station_summary: station_summary(table),
        }
    }

    /// Recompute only the report driven by the pollutant selector.
    pub fn refresh_pollutant_trend(&mut self, table: &AirQualityTable, selection: &Selection) {
        self.pollutant_trend =
            pollutant_yearly_trend(table, selection.pollutant, selection.trend_station);
    }

    /// Recompute only the report driven by the station selector.
    pub fn refresh_station_trend(&mut self, table: &AirQualityTable, selection: &Selection) {
        self.station_trend = station_yearly_trend(table, selection.station);
    }
}
