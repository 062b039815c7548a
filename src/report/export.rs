use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use super::{ReportResult, Reports, Selection};

/// Serialize a report, or `{"error": "..."}` when it could not be computed.
fn outcome<T: Serialize>(result: &ReportResult<T>) -> Result<JsonValue> {
    Ok(match result {
        Ok(report) => serde_json::to_value(report)?,
        Err(e) => json!({ "error": e.to_string() }),
    })
}

/// Build the JSON document for a selection and its reports.
///
/// ```json
/// {
///   "selection": { "pollutant": "PM2.5", "trend_station": "Aotizhongxin", "station": "Dongsi" },
///   "pollutant_trend": { "key_column": "year", "value_columns": ["PM2.5"], "rows": [...] },
///   "station_trend": { ... },
///   "correlation": { "labels": [...], "values": [[1.0, ...], ...] },
///   "station_summary": { "error": "Column(s) not found in the dataset: station" }
/// }
/// ```
pub fn to_json(selection: &Selection, reports: &Reports) -> Result<JsonValue> {
    Ok(json!({
        "selection": {
            "pollutant": selection.pollutant,
            "trend_station": selection.trend_station,
            "station": selection.station,
        },
        "pollutant_trend": outcome(&reports.pollutant_trend)?,
        "station_trend": outcome(&reports.station_trend)?,
        "correlation": outcome(&reports.correlation)?,
        "station_summary": outcome(&reports.station_summary)?,
    }))
}

/// Write the pretty-printed JSON document to `path`.
pub fn write_json(path: &Path, selection: &Selection, reports: &Reports) -> Result<()> {
    let doc = to_json(selection, reports)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &doc)
        .context("writing report JSON")?;
    log::info!("Exported reports to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{Pollutant, Station};
    use crate::report::tests::sample_table;

    #[test]
    fn document_carries_selection_and_reports() {
        let table = sample_table();
        let selection = Selection {
            pollutant: Pollutant::Pm10,
            trend_station: Station::Aotizhongxin,
            station: Station::Dongsi,
        };
        let doc = to_json(&selection, &Reports::compute(&table, &selection)).unwrap();

        assert_eq!(doc["selection"]["pollutant"], "PM10");
        assert_eq!(doc["selection"]["station"], "Dongsi");
        assert_eq!(doc["pollutant_trend"]["value_columns"], json!(["PM10"]));
        assert_eq!(doc["pollutant_trend"]["rows"][0]["key"], 2013);
        assert_eq!(doc["pollutant_trend"]["rows"][0]["means"], json!([1.5]));
        assert_eq!(doc["station_summary"]["rows"][1]["key"], "Dongsi");
        // Dongsi has no PM2.5 reading in 2015.
        assert_eq!(doc["station_trend"]["rows"][1]["key"], 2015);
        assert_eq!(doc["station_trend"]["rows"][1]["means"][0], JsonValue::Null);
        assert_eq!(doc["station_trend"]["rows"][1]["means"][1], 5.0);
        assert_eq!(doc["correlation"]["values"][0][0], 1.0);
    }

    #[test]
    fn failed_reports_export_their_error() {
        let table = crate::data::model::AirQualityTable::default();
        let selection = Selection::default();
        let doc = to_json(&selection, &Reports::compute(&table, &selection)).unwrap();

        let message = doc["correlation"]["error"].as_str().unwrap();
        assert!(message.contains("DEWP"));
        assert!(doc["station_trend"]["error"].is_string());
    }

    #[test]
    fn write_json_creates_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");
        let table = sample_table();
        let selection = Selection::default();

        write_json(&path, &selection, &Reports::compute(&table, &selection)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["selection"]["trend_station"], "Aotizhongxin");
    }
}
