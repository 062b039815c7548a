use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::*;

use super::model::AirQualityTable;

/// Cell texts that mean "no measurement".
const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "-nan", "NULL", "null", "None", "#N/A",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a measurement table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one measurement per row (the usual export)
/// * `.parquet` – flat columns of ints, floats and strings
pub fn load_file(path: &Path) -> Result<AirQualityTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one measurement per row.
///
/// ```text
/// No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station
/// 1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin
/// ```
///
/// Column types are inferred over the whole file so a late decimal value
/// still makes the column floating point.
fn load_csv(path: &Path) -> Result<AirQualityTable> {
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|&t| t.into()).collect());

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context("opening CSV")?
        .finish()
        .context("parsing CSV")?;

    Ok(AirQualityTable::from_frame(frame))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), as well as `generate_sample`.
fn load_parquet(path: &Path) -> Result<AirQualityTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let frame = ParquetReader::new(file)
        .finish()
        .context("reading parquet file")?;
    Ok(AirQualityTable::from_frame(frame))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType as ArrowType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn ints(frame: &DataFrame, name: &str) -> Vec<Option<i64>> {
        let column = frame.column(name).unwrap();
        column.i64().unwrap().into_iter().collect()
    }

    fn floats(frame: &DataFrame, name: &str) -> Vec<Option<f64>> {
        let column = frame.column(name).unwrap();
        column.f64().unwrap().into_iter().collect()
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_columns_get_inferred_types() {
        let file = write_temp(
            ".csv",
            "No,year,PM2.5,wd,station\n\
             1,2013,4,NNW,Aotizhongxin\n\
             2,2013,NA,N,Aotizhongxin\n\
             3,2014,7.5,,Dongsi\n",
        );
        let table = load_file(file.path()).unwrap();
        let frame = table.frame();

        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), vec!["No", "year", "PM2.5", "wd", "station"]);

        assert_eq!(ints(frame, "year"), vec![Some(2013), Some(2013), Some(2014)]);
        assert_eq!(floats(frame, "PM2.5"), vec![Some(4.0), None, Some(7.5)]);

        let wd = frame.column("wd").unwrap().str().unwrap();
        assert_eq!(wd.get(0), Some("NNW"));
        assert_eq!(wd.get(2), None);
    }

    #[test]
    fn null_tokens_are_missing_in_every_column() {
        let file = write_temp(".csv", "SO2,CO\nNaN,null\n5,#N/A\nN/A,300\n");
        let table = load_file(file.path()).unwrap();
        let frame = table.frame();

        assert_eq!(frame.column("SO2").unwrap().null_count(), 2);
        assert_eq!(frame.column("CO").unwrap().null_count(), 2);
    }

    #[test]
    fn ragged_csv_row_is_an_error() {
        let file = write_temp(".csv", "year,station\n2013,Dongsi,extra\n");
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn parquet_columns_map_to_table_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("year", ArrowType::Int64, false),
            Field::new("PM10", ArrowType::Float64, true),
            Field::new("station", ArrowType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2015, 2016])),
                Arc::new(Float64Array::from(vec![Some(12.0), None])),
                Arc::new(StringArray::from(vec![Some("Wanliu"), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        let frame = table.frame();
        assert_eq!(table.len(), 2);

        assert_eq!(ints(frame, "year"), vec![Some(2015), Some(2016)]);
        assert_eq!(floats(frame, "PM10"), vec![Some(12.0), None]);
        let station = frame.column("station").unwrap().str().unwrap();
        assert_eq!(station.get(0), Some("Wanliu"));
        assert_eq!(station.get(1), None);
    }
}
