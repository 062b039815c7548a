use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Fixed column sets
// ---------------------------------------------------------------------------

pub const YEAR_COLUMN: &str = "year";
pub const STATION_COLUMN: &str = "station";

/// The six pollutant concentration columns, in display order.
pub const POLLUTANT_COLUMNS: [&str; 6] = ["PM2.5", "PM10", "SO2", "NO2", "CO", "O3"];

/// Columns compared by the correlation report.
pub const CORRELATION_COLUMNS: [&str; 4] = ["DEWP", "TEMP", "PM2.5", "PM10"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown pollutant '{0}' (expected one of: PM2.5, PM10, SO2, NO2, CO, O3)")]
    UnknownPollutant(String),
    #[error("unknown station '{0}'")]
    UnknownStation(String),
}

// ---------------------------------------------------------------------------
// Pollutant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Pollutant {
    #[default]
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column holding this pollutant's measurements.
    pub fn column(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Pollutant {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Pollutant::ALL
            .into_iter()
            .find(|p| p.column().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownPollutant(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

/// The twelve monitoring sites of the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Station {
    #[default]
    Aotizhongxin,
    Changping,
    Dingling,
    Dongsi,
    Guanyuan,
    Gucheng,
    Huairou,
    Nongzhanguan,
    Shunyi,
    Tiantan,
    Wanliu,
    Wanshouxigong,
}

impl Station {
    pub const ALL: [Station; 12] = [
        Station::Aotizhongxin,
        Station::Changping,
        Station::Dingling,
        Station::Dongsi,
        Station::Guanyuan,
        Station::Gucheng,
        Station::Huairou,
        Station::Nongzhanguan,
        Station::Shunyi,
        Station::Tiantan,
        Station::Wanliu,
        Station::Wanshouxigong,
    ];

    /// Name as it appears in the `station` column.
    pub fn name(self) -> &'static str {
        match self {
            Station::Aotizhongxin => "Aotizhongxin",
            Station::Changping => "Changping",
            Station::Dingling => "Dingling",
            Station::Dongsi => "Dongsi",
            Station::Guanyuan => "Guanyuan",
            Station::Gucheng => "Gucheng",
            Station::Huairou => "Huairou",
            Station::Nongzhanguan => "Nongzhanguan",
            Station::Shunyi => "Shunyi",
            Station::Tiantan => "Tiantan",
            Station::Wanliu => "Wanliu",
            Station::Wanshouxigong => "Wanshouxigong",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Station {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Station::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownStation(s.to_string()))
    }
}
