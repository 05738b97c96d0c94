//! An in-memory table of named numeric columns.
//!
//! Rows are observations (one student per row in the reference survey),
//! columns are named variables (adjective ratings). The table is rectangular
//! by construction and is the single source from which every derived
//! artifact (standardized matrix, cluster assignments) is recomputed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::info;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, s};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    records: Array2<f64>,
}

/// Descriptive statistics for one variable, in the shape of pandas'
/// `describe()` output (sample standard deviation, interpolated quartiles).
#[derive(Clone, Debug, PartialEq)]
pub struct VariableSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Dataset {
    /// Builds a dataset from column names and a records matrix with one
    /// column per name.
    pub fn new(names: Vec<String>, records: Array2<f64>) -> Result<Self> {
        if names.len() != records.ncols() {
            return Err(Error::format(
                1,
                format!(
                    "{} column names for {} columns of data",
                    names.len(),
                    records.ncols()
                ),
            ));
        }
        if records.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        Ok(Dataset { names, records })
    }

    /// Reads a comma-delimited file with a header row naming the variables.
    ///
    /// Every cell below the header must parse as `f64`. Rows with a field
    /// count different from the header are rejected with the offending line
    /// number in the error.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_access(path, e))?;
        let dataset = Self::from_reader(file)?;
        info!(
            "loaded {} observations of {} variables from {}",
            dataset.n_observations(),
            dataset.n_variables(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reads a comma-delimited table with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = reader
            .headers()
            .map_err(|e| Error::format(1, e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if names.is_empty() {
            return Err(Error::format(1, "header row is empty"));
        }

        let mut cells = Vec::new();
        let mut n_rows = 0;
        for (row, record) in reader.records().enumerate() {
            // line number as seen in the file, counting the header
            let line = row + 2;
            let record = record.map_err(|e| Error::format(line, e.to_string()))?;
            if record.len() != names.len() {
                return Err(Error::format(
                    line,
                    format!("expected {} fields, found {}", names.len(), record.len()),
                ));
            }
            for (field, name) in record.iter().zip(&names) {
                let value: f64 = field.parse().map_err(|_| {
                    Error::format(line, format!("cannot parse '{field}' in column '{name}'"))
                })?;
                cells.push(value);
            }
            n_rows += 1;
        }
        if n_rows == 0 {
            return Err(Error::EmptyDataset);
        }

        let records = Array2::from_shape_vec((n_rows, names.len()), cells)
            .map_err(|e| Error::format(n_rows + 1, e.to_string()))?;
        Ok(Dataset { names, records })
    }

    pub fn n_observations(&self) -> usize {
        self.records.nrows()
    }

    pub fn n_variables(&self) -> usize {
        self.records.ncols()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    /// View of a single variable by name.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.records.column(idx))
    }

    /// The first `n` rows (fewer if the dataset is shorter).
    pub fn head(&self, n: usize) -> ArrayView2<'_, f64> {
        let n = n.min(self.n_observations());
        self.records.slice(s![..n, ..])
    }

    /// Per-variable descriptive statistics.
    pub fn describe(&self) -> Vec<VariableSummary> {
        self.names
            .iter()
            .zip(self.records.axis_iter(Axis(1)))
            .map(|(name, col)| summarize(name, col))
            .collect()
    }
}

fn summarize(name: &str, col: ArrayView1<'_, f64>) -> VariableSummary {
    let count = col.len();
    let mean = col.sum() / count as f64;
    let std = if count > 1 {
        (col.mapv(|x| (x - mean) * (x - mean)).sum() / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    let mut sorted: Vec<f64> = col.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    VariableSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linearly interpolated quantile over a pre-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
