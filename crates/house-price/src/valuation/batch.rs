use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::record::FEATURE_COLUMNS;
use super::service::{PredictionResult, PriceEstimator};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read listings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listings CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("listings CSV is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// Outcome for one data row of a listings export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub line: u64,
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// Estimates every row of a CSV export whose header carries the model columns.
pub struct BatchEstimator;

impl BatchEstimator {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        estimator: &PriceEstimator,
    ) -> Result<Vec<BatchRow>, BatchError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, estimator)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        estimator: &PriceEstimator,
    ) -> Result<Vec<BatchRow>, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<&'static str> = FEATURE_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|header| header == *column))
            .collect();
        if !missing.is_empty() {
            return Err(BatchError::MissingColumns(missing));
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|position| position.line()).unwrap_or(0);
            let fields: BTreeMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();

            rows.push(BatchRow {
                line,
                result: estimator.estimate(&fields),
            });
        }

        Ok(rows)
    }
}

/// Counts of estimated and rejected rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub estimated: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn from_rows(rows: &[BatchRow]) -> Self {
        rows.iter().fold(Self::default(), |mut summary, row| {
            if row.result.is_estimated() {
                summary.estimated += 1;
            } else {
                summary.rejected += 1;
            }
            summary
        })
    }
}
