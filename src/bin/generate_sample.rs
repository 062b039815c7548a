use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const STATIONS: [&str; 12] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Gucheng",
    "Huairou",
    "Nongzhanguan",
    "Shunyi",
    "Tiantan",
    "Wanliu",
    "Wanshouxigong",
];
const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const YEARS: std::ops::RangeInclusive<i64> = 2013..=2017;
const DAYS: [i64; 4] = [1, 8, 15, 22];
const HOURS: [i64; 4] = [0, 6, 12, 18];
/// Share of pollutant readings left empty.
const MISSING_RATE: f64 = 0.02;

/// Minimal deterministic PRNG (xoshiro256**)
struct SampleRng {
    state: [u64; 4],
}

impl SampleRng {
    fn seeded(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for slot in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SampleRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.state;
        let out = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);
        out
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller normal sample.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// A positive reading, or `None` at [`MISSING_RATE`].
    fn reading(&mut self, mean: f64, std_dev: f64) -> Option<f64> {
        if self.unit() < MISSING_RATE {
            return None;
        }
        Some((self.normal(mean, std_dev).max(mean * 0.05) * 10.0).round() / 10.0)
    }
}

/// Columnar sample table, one entry per measurement.
#[derive(Default)]
struct Sample {
    no: Vec<i64>,
    year: Vec<i64>,
    month: Vec<i64>,
    day: Vec<i64>,
    hour: Vec<i64>,
    /// PM2.5, PM10, SO2, NO2, CO, O3
    pollutants: [Vec<Option<f64>>; 6],
    temp: Vec<f64>,
    pres: Vec<f64>,
    dewp: Vec<f64>,
    rain: Vec<f64>,
    wd: Vec<&'static str>,
    wspm: Vec<f64>,
    station: Vec<&'static str>,
}

const POLLUTANT_NAMES: [&str; 6] = ["PM2.5", "PM10", "SO2", "NO2", "CO", "O3"];

fn generate(rng: &mut SampleRng) -> Sample {
    let mut sample = Sample::default();
    let mut no = 0;

    for (station_idx, &station) in STATIONS.iter().enumerate() {
        // Suburban stations run cleaner than the city centre.
        let site = 0.75 + 0.05 * station_idx as f64;
        for year in YEARS {
            // Slow improvement over the years.
            let trend = 1.0 - 0.06 * (year - 2013) as f64;
            for month in 1..=12 {
                let season = (2.0 * std::f64::consts::PI * (month as f64 - 7.0) / 12.0).cos();
                let winter = (1.0 - season) / 2.0;
                for &day in &DAYS {
                    for &hour in &HOURS {
                        no += 1;
                        let temp = 13.0 + 15.0 * season + rng.normal(0.0, 3.0);
                        let dewp = temp - 8.0 - 6.0 * winter + rng.normal(0.0, 2.5);
                        let pm25_mean = (45.0 + 70.0 * winter) * site * trend;

                        sample.no.push(no);
                        sample.year.push(year);
                        sample.month.push(month);
                        sample.day.push(day);
                        sample.hour.push(hour);
                        let means = [
                            (pm25_mean, pm25_mean * 0.5),
                            (pm25_mean * 1.3, pm25_mean * 0.5),
                            (4.0 + 25.0 * winter * trend, 5.0),
                            (35.0 + 25.0 * winter, 10.0),
                            ((700.0 + 1400.0 * winter) * site * trend, 300.0),
                            (20.0 + 90.0 * (1.0 - winter), 20.0),
                        ];
                        for (column, (mean, sd)) in sample.pollutants.iter_mut().zip(means) {
                            column.push(rng.reading(mean, sd));
                        }
                        sample.temp.push((temp * 10.0).round() / 10.0);
                        sample.pres.push((1012.0 - 12.0 * season + rng.normal(0.0, 3.0)).round());
                        sample.dewp.push((dewp * 10.0).round() / 10.0);
                        let rain = if rng.unit() < 0.05 {
                            (rng.unit() * 40.0).round() / 10.0
                        } else {
                            0.0
                        };
                        sample.rain.push(rain);
                        sample.wd.push(WIND_DIRECTIONS[(rng.next_u64() % 8) as usize]);
                        sample.wspm.push((rng.unit() * 40.0).round() / 10.0);
                        sample.station.push(station);
                    }
                }
            }
        }
    }
    sample
}

fn write_csv(sample: &Sample, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    let mut header = vec!["No", "year", "month", "day", "hour"];
    header.extend(POLLUTANT_NAMES);
    header.extend(["TEMP", "PRES", "DEWP", "RAIN", "wd", "WSPM", "station"]);
    writer.write_record(&header)?;

    for i in 0..sample.no.len() {
        let mut record = vec![
            sample.no[i].to_string(),
            sample.year[i].to_string(),
            sample.month[i].to_string(),
            sample.day[i].to_string(),
            sample.hour[i].to_string(),
        ];
        record.extend(
            sample
                .pollutants
                .iter()
                .map(|col| col[i].map_or_else(|| "NA".to_string(), |v| v.to_string())),
        );
        record.extend([
            sample.temp[i].to_string(),
            sample.pres[i].to_string(),
            sample.dewp[i].to_string(),
            sample.rain[i].to_string(),
            sample.wd[i].to_string(),
            sample.wspm[i].to_string(),
            sample.station[i].to_string(),
        ]);
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(sample: &Sample, path: &str) -> Result<()> {
    let int = |name: &str, values: &[i64]| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Int64, false),
            Arc::new(Int64Array::from(values.to_vec())) as ArrayRef,
        )
    };
    let float = |name: &str, values: &[f64]| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Float64, false),
            Arc::new(Float64Array::from(values.to_vec())) as ArrayRef,
        )
    };
    let text = |name: &str, values: &[&str]| -> (Field, ArrayRef) {
        (
            Field::new(name, DataType::Utf8, false),
            Arc::new(StringArray::from(values.to_vec())) as ArrayRef,
        )
    };

    let mut columns = vec![
        int("No", &sample.no),
        int("year", &sample.year),
        int("month", &sample.month),
        int("day", &sample.day),
        int("hour", &sample.hour),
    ];
    for (name, values) in POLLUTANT_NAMES.iter().zip(&sample.pollutants) {
        columns.push((
            Field::new(*name, DataType::Float64, true),
            Arc::new(Float64Array::from(values.clone())) as ArrayRef,
        ));
    }
    columns.extend([
        float("TEMP", &sample.temp),
        float("PRES", &sample.pres),
        float("DEWP", &sample.dewp),
        float("RAIN", &sample.rain),
        text("wd", &sample.wd),
        float("WSPM", &sample.wspm),
        text("station", &sample.station),
    ]);

    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = SampleRng::seeded(42);
    let sample = generate(&mut rng);

    write_csv(&sample, "air_quality.csv")?;
    write_parquet(&sample, "air_quality.parquet")?;

    log::info!(
        "Wrote {} measurements ({} stations, {}-{}) to air_quality.csv and air_quality.parquet",
        sample.no.len(),
        STATIONS.len(),
        YEARS.start(),
        YEARS.end()
    );
    Ok(())
}
