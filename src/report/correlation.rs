use polars::prelude::*;
use serde::Serialize;

use super::aggregate::numeric;
use crate::data::model::AirQualityTable;

/// Symmetric Pearson correlation matrix over a fixed set of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` × `labels.len()`. `None` where undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Pairwise-complete correlation of the named columns.
    ///
    /// The diagonal is 1.0. Off-diagonal entries use only the rows where both
    /// cells are present; fewer than two such rows or zero variance leaves the
    /// entry undefined. Coefficients are clamped to [-1, 1].
    pub fn compute(table: &AirQualityTable, columns: &[&str]) -> PolarsResult<Self> {
        let n = columns.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();

        let mut values = vec![vec![None; n]; n];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = Some(1.0);
        }

        if !pairs.is_empty() {
            let exprs: Vec<Expr> = pairs
                .iter()
                .map(|&(i, j)| {
                    let name = pair_name(i, j);
                    pair_correlation(columns[i], columns[j]).alias(name)
                })
                .collect();
            let out = table.lazy().select(exprs).collect()?;

            for &(i, j) in &pairs {
                let r = out
                    .column(&pair_name(i, j))?
                    .cast(&DataType::Float64)?
                    .f64()?
                    .get(0)
                    .filter(|r| r.is_finite())
                    .map(|r| r.clamp(-1.0, 1.0));
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            labels: columns.iter().map(|c| c.to_string()).collect(),
            values,
        })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }
}

fn pair_name(i: usize, j: usize) -> String {
    format!("r_{i}_{j}")
}

/// Pearson coefficient over the rows where both columns are present.
fn pair_correlation(a: &str, b: &str) -> Expr {
    let both = numeric(a).is_not_null().and(numeric(b).is_not_null());
    pearson_corr(numeric(a).filter(both.clone()), numeric(b).filter(both))
}
