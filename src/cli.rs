//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::data::catalog::{Pollutant, Station};
use crate::report::Selection;

/// Air Quality Dashboard - yearly pollutant trends, correlations and
/// per-station averages for a monitoring-station dataset.
///
/// Examples:
///   air-quality-dashboard
///   air-quality-dashboard --data PRSA_all.csv --station Dongsi
///   air-quality-dashboard --pollutant NO2 --export reports.json
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dataset to load at startup (.csv or .parquet)
    #[arg(short, long, value_name = "PATH", default_value = "air_quality.csv", env = "AIRQ_DATA")]
    pub data: PathBuf,

    /// Initially selected pollutant (PM2.5, PM10, SO2, NO2, CO, O3)
    #[arg(short, long, default_value = "PM2.5")]
    pub pollutant: Pollutant,

    /// Initially selected station for the all-pollutant trend
    #[arg(short, long, default_value = "Aotizhongxin")]
    pub station: Station,

    /// Station used by the single-pollutant yearly trend
    #[arg(long, default_value = "Aotizhongxin")]
    pub trend_station: Station,

    /// Write the reports as JSON to PATH and exit without opening a window
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl Args {
    pub fn selection(&self) -> Selection {
        Selection {
            pollutant: self.pollutant,
            trend_station: self.trend_station,
            station: self.station,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard_defaults() {
        let args = Args::try_parse_from(["air-quality-dashboard"]).unwrap();
        assert_eq!(args.selection(), Selection::default());
        assert!(args.export.is_none());
    }

    #[test]
    fn selection_flags_are_parsed() {
        let args = Args::try_parse_from([
            "air-quality-dashboard",
            "--data",
            "prsa.parquet",
            "--pollutant",
            "no2",
            "--station",
            "Tiantan",
            "--trend-station",
            "Wanliu",
            "--export",
            "out.json",
        ])
        .unwrap();

        assert_eq!(args.data, PathBuf::from("prsa.parquet"));
        assert_eq!(
            args.selection(),
            Selection {
                pollutant: Pollutant::No2,
                trend_station: Station::Wanliu,
                station: Station::Tiantan,
            }
        );
        assert_eq!(args.export, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn unknown_station_is_rejected() {
        assert!(Args::try_parse_from(["air-quality-dashboard", "--station", "Shanghai"]).is_err());
    }
}
