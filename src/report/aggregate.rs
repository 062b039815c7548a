use std::fmt;

use polars::prelude::*;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Grouped-mean table
// ---------------------------------------------------------------------------

/// Value of the grouping column for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl GroupKey {
    /// Numeric view of the key, used for plot axes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GroupKey::Integer(i) => Some(*i as f64),
            GroupKey::Float(v) => Some(*v),
            GroupKey::Text(_) => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Integer(i) => write!(f, "{i}"),
            GroupKey::Float(v) => write!(f, "{v}"),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}

/// One group: its key and the mean of each value column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub key: GroupKey,
    pub means: Vec<Option<f64>>,
}

/// Result of a group-by/mean: rows ordered by ascending key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMeans {
    pub key_column: String,
    pub value_columns: Vec<String>,
    pub rows: Vec<GroupRow>,
}

impl GroupedMeans {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(key, mean)` points of one value column, skipping missing means and
    /// non-numeric keys. Used for the charts.
    pub fn series(&self, column_idx: usize) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .filter_map(|r| Some([r.key.as_f64()?, r.means.get(column_idx).copied()??]))
            .collect()
    }
}

/// A column read as floats: non-numeric cells and NaN become null.
pub fn numeric(name: &str) -> Expr {
    col(name).cast(DataType::Float64).fill_nan(lit(NULL))
}

/// Group the rows of `rows` by `key_column` and average each of
/// `value_columns` independently, nulls skipped.
///
/// Rows whose key is missing are dropped. A group with no present values in
/// a column gets a `None` mean for it.
pub fn grouped_means(
    rows: LazyFrame,
    key_column: &str,
    value_columns: &[&str],
) -> PolarsResult<GroupedMeans> {
    let aggs: Vec<Expr> = value_columns
        .iter()
        .map(|&name| numeric(name).mean().alias(name))
        .collect();

    let out = rows
        .filter(col(key_column).is_not_null())
        .group_by([col(key_column)])
        .agg(aggs)
        .sort([key_column], SortMultipleOptions::default())
        .collect()?;

    let keys = group_keys(out.column(key_column)?)?;
    let mut means = vec![Vec::with_capacity(value_columns.len()); keys.len()];
    for &name in value_columns {
        let column = out.column(name)?.cast(&DataType::Float64)?;
        for (row, mean) in means.iter_mut().zip(column.f64()?) {
            row.push(mean);
        }
    }

    Ok(GroupedMeans {
        key_column: key_column.to_string(),
        value_columns: value_columns.iter().map(|c| c.to_string()).collect(),
        rows: keys
            .into_iter()
            .zip(means)
            .map(|(key, means)| GroupRow { key, means })
            .collect(),
    })
}

/// Read the key column of an aggregated frame. Keys are never null here.
fn group_keys(column: &Column) -> PolarsResult<Vec<GroupKey>> {
    let dtype = column.dtype();
    if dtype.is_integer() {
        let keys = column.cast(&DataType::Int64)?;
        let keys = keys.i64()?.into_iter().flatten();
        Ok(keys.map(GroupKey::Integer).collect())
    } else if dtype.is_float() {
        let keys = column.cast(&DataType::Float64)?;
        let keys = keys.f64()?.into_iter().flatten();
        Ok(keys.map(GroupKey::Float).collect())
    } else {
        let keys = column.cast(&DataType::String)?;
        Ok(keys
            .str()?
            .into_iter()
            .flatten()
            .map(|s| GroupKey::Text(s.to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> LazyFrame {
        df!(
            "year" => [Some(2014i64), Some(2013), Some(2014), None, Some(2013)],
            "PM10" => [Some(10.0), Some(4.0), Some(20.0), Some(99.0), None],
            "CO" => [None, Some(300.0), Some(f64::NAN), Some(1.0), Some(500.0)],
            "wd" => ["N", "NE", "E", "S", "W"],
        )
        .unwrap()
        .lazy()
    }

    #[test]
    fn groups_are_sorted_and_missing_keys_dropped() {
        let g = grouped_means(frame(), "year", &["PM10", "CO"]).unwrap();

        assert_eq!(g.value_columns, vec!["PM10", "CO"]);
        assert_eq!(
            g.rows,
            vec![
                GroupRow {
                    key: GroupKey::Integer(2013),
                    means: vec![Some(4.0), Some(400.0)],
                },
                GroupRow {
                    key: GroupKey::Integer(2014),
                    means: vec![Some(15.0), None],
                },
            ]
        );
    }

    #[test]
    fn only_filtered_rows_contribute() {
        let rows = frame().filter(col("PM10").gt(lit(15.0)));
        let g = grouped_means(rows, "year", &["PM10"]).unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(g.rows[0].means, vec![Some(20.0)]);
    }

    #[test]
    fn text_values_average_to_missing() {
        let g = grouped_means(frame(), "year", &["wd"]).unwrap();
        assert!(g.rows.iter().all(|r| r.means == vec![None]));
    }

    #[test]
    fn text_keys_sort_alphabetically() {
        let rows = df!(
            "station" => ["Wanliu", "Dongsi", "Wanliu"],
            "O3" => [1.0, 2.0, 3.0],
        )
        .unwrap()
        .lazy();
        let g = grouped_means(rows, "station", &["O3"]).unwrap();
        let keys: Vec<_> = g.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["Dongsi", "Wanliu"]);
        assert_eq!(g.rows[1].means, vec![Some(2.0)]);
    }

    #[test]
    fn series_skips_missing_means() {
        let g = grouped_means(frame(), "year", &["PM10", "CO"]).unwrap();
        assert_eq!(g.series(0), vec![[2013.0, 4.0], [2014.0, 15.0]]);
        assert_eq!(g.series(1), vec![[2013.0, 400.0]]);
    }
}
