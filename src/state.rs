use std::path::PathBuf;

use crate::data::catalog::{Pollutant, Station};
use crate::data::model::{AirQualityTable, DatasetSummary};
use crate::report::{Reports, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Reports are recomputed by the setters, never per frame: each selector
/// refreshes only the report it drives, loading a table refreshes all four.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<AirQualityTable>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Size figures of `dataset` for the top bar (cached).
    pub summary: Option<DatasetSummary>,

    /// Current dropdown choices.
    pub selection: Selection,

    /// Reports for `dataset` under `selection` (cached).
    pub reports: Option<Reports>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(selection: Selection) -> Self {
        Self {
            dataset: None,
            source: None,
            summary: None,
            selection,
            reports: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and compute every report.
    pub fn set_dataset(&mut self, dataset: AirQualityTable, source: Option<PathBuf>) {
        self.reports = Some(Reports::compute(&dataset, &self.selection));
        self.summary = Some(dataset.summary());
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
    }

    /// Change the pollutant and refresh its yearly trend.
    pub fn set_pollutant(&mut self, pollutant: Pollutant) {
        if self.selection.pollutant == pollutant {
            return;
        }
        self.selection.pollutant = pollutant;
        if let (Some(ds), Some(reports)) = (&self.dataset, &mut self.reports) {
            reports.refresh_pollutant_trend(ds, &self.selection);
        }
    }

    /// Change the analysed station and refresh its all-pollutant trend.
    pub fn set_station(&mut self, station: Station) {
        if self.selection.station == station {
            return;
        }
        self.selection.station = station;
        if let (Some(ds), Some(reports)) = (&self.dataset, &mut self.reports) {
            reports.refresh_station_trend(ds, &self.selection);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::station_yearly_trend;
    use crate::report::tests::sample_table;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.status_message = Some("Error: earlier failure".into());
        state.set_dataset(sample_table(), Some(PathBuf::from("air_quality.csv")));
        state
    }

    #[test]
    fn loading_computes_all_reports_and_clears_status() {
        let state = loaded();
        let reports = state.reports.as_ref().unwrap();
        assert!(reports.pollutant_trend.is_ok());
        assert!(reports.station_trend.is_ok());
        assert!(reports.correlation.is_ok());
        assert!(reports.station_summary.is_ok());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn loading_caches_the_dataset_summary() {
        let state = loaded();
        let summary = state.summary.unwrap();
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.columns, 11);
        assert_eq!(summary.stations, Some(2));
    }

    #[test]
    fn pollutant_change_refreshes_only_its_trend() {
        let mut state = loaded();
        let before = state.reports.clone().unwrap();

        state.set_pollutant(Pollutant::No2);

        let after = state.reports.as_ref().unwrap();
        assert_eq!(state.selection.pollutant, Pollutant::No2);
        assert_eq!(after.pollutant_trend.as_ref().unwrap().value_columns, vec!["NO2"]);
        assert_eq!(after.station_trend, before.station_trend);
        assert_eq!(after.station_summary, before.station_summary);
    }

    #[test]
    fn station_change_refreshes_only_its_trend() {
        let mut state = loaded();
        let before = state.reports.clone().unwrap();

        state.set_station(Station::Dongsi);

        let after = state.reports.as_ref().unwrap();
        let table = sample_table();
        assert_eq!(after.station_trend, station_yearly_trend(&table, Station::Dongsi));
        assert_eq!(after.pollutant_trend, before.pollutant_trend);
    }

    #[test]
    fn selection_changes_without_dataset_are_kept() {
        let mut state = AppState::default();
        state.set_station(Station::Huairou);
        state.set_pollutant(Pollutant::Co);
        assert!(state.reports.is_none());

        state.set_dataset(sample_table(), None);
        let reports = state.reports.as_ref().unwrap();
        assert_eq!(reports.pollutant_trend.as_ref().unwrap().value_columns, vec!["CO"]);
        assert!(reports.station_trend.as_ref().unwrap().is_empty());
    }
}
