use polars::prelude::*;

use super::catalog::STATION_COLUMN;

// ---------------------------------------------------------------------------
// AirQualityTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded measurement table. Read-only once built; reports run lazy
/// queries over clones of the underlying frame.
#[derive(Debug, Clone)]
pub struct AirQualityTable {
    frame: DataFrame,
}

impl AirQualityTable {
    pub fn from_frame(frame: DataFrame) -> Self {
        AirQualityTable { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// A lazy query over the whole table.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Names from `required` that the table does not have, in the given order.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Size figures for the status bar, computed once per load.
    pub fn summary(&self) -> DatasetSummary {
        let stations = self
            .frame
            .column(STATION_COLUMN)
            .and_then(|column| column.drop_nulls().n_unique())
            .ok();
        DatasetSummary {
            rows: self.len(),
            columns: self.frame.width(),
            stations,
        }
    }
}

impl Default for AirQualityTable {
    fn default() -> Self {
        Self::from_frame(DataFrame::empty())
    }
}

/// Row, column and distinct-station counts of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    /// `None` when the table has no `station` column.
    pub stations: Option<usize>,
}
