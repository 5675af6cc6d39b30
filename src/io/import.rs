//! CSV import of a raw 24-hour net load curve.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::sim::curve::{Curve, HOURS, hour_to_index};
use crate::sim::types::SimError;

/// Errors raised while reading a curve from CSV.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV has no columns")]
    NoColumns,
    #[error("row {row}: cannot parse {column} value \"{value}\"")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: hour {hour} appears more than once")]
    DuplicateHour { row: usize, hour: usize },
    #[error("row {row}: {source}")]
    Hour {
        row: usize,
        #[source]
        source: SimError,
    },
    #[error(transparent)]
    Curve(#[from] SimError),
}

/// Reads a curve from a CSV file. See [`read_curve`] for the accepted layout.
///
/// # Errors
///
/// Returns `ImportError::Open` if the file cannot be opened, or any error
/// from [`read_curve`].
pub fn read_curve_csv(path: &Path) -> Result<Curve, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_curve(file)
}

/// Reads a curve from CSV with a header row.
///
/// The value column is `consumer_kw` or `kw`, falling back to the last
/// column. If an `hour` column is present each row is placed at that hour
/// (1-24) and every hour must appear exactly once; otherwise rows are taken
/// in order as hours 1 through 24.
///
/// # Errors
///
/// Returns an `ImportError` for malformed CSV, unparsable numbers, duplicate
/// or out-of-range hours, or a row count other than 24.
pub fn read_curve(reader: impl Read) -> Result<Curve, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ImportError::NoColumns);
    }
    let value_col = ["consumer_kw", "kw"]
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .unwrap_or(headers.len() - 1);
    let hour_col = headers.iter().position(|h| h.eq_ignore_ascii_case("hour"));

    let mut samples = Vec::with_capacity(HOURS);
    let mut placed = [None; HOURS];

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let raw = record.get(value_col).unwrap_or("");
        let kw: f64 = raw.parse().map_err(|_| ImportError::Parse {
            row,
            column: "value",
            value: raw.to_string(),
        })?;

        match hour_col {
            Some(col) => {
                let raw_hour = record.get(col).unwrap_or("");
                let hour: usize = raw_hour.parse().map_err(|_| ImportError::Parse {
                    row,
                    column: "hour",
                    value: raw_hour.to_string(),
                })?;
                let idx = hour_to_index(hour).map_err(|source| ImportError::Hour { row, source })?;
                if placed[idx].replace(kw).is_some() {
                    return Err(ImportError::DuplicateHour { row, hour });
                }
            }
            None => samples.push(kw),
        }
    }

    if hour_col.is_some() {
        let filled: Vec<f64> = placed.iter().flatten().copied().collect();
        if filled.len() != HOURS {
            return Err(SimError::CurveLength { len: filled.len() }.into());
        }
        samples = filled;
    }

    Ok(Curve::from_slice(&samples)?)
}
