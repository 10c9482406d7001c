use super::record::{FeatureRecord, FEATURE_COLUMNS};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// A single cell handed to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FeatureValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(value) => Some(*value as f64),
            FeatureValue::Float(value) => Some(*value),
            FeatureValue::Text(_) => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Rows of typed features laid out in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    rows: Vec<[FeatureValue; 12]>,
}

impl FeatureTable {
    pub fn single(record: &FeatureRecord) -> Self {
        let mut table = Self::default();
        table.push(record);
        table
    }

    pub fn push(&mut self, record: &FeatureRecord) {
        self.rows.push([
            FeatureValue::Text(record.district.clone()),
            FeatureValue::Text(record.city.clone()),
            FeatureValue::Integer(record.bedrooms.into()),
            FeatureValue::Integer(record.bathrooms.into()),
            FeatureValue::Float(record.land_size_m2),
            FeatureValue::Float(record.building_size_m2),
            FeatureValue::Integer(record.carports.into()),
            FeatureValue::Integer(record.electricity.into()),
            FeatureValue::Integer(record.floors.into()),
            FeatureValue::Integer(record.building_age.into()),
            FeatureValue::Integer(record.garages.into()),
            FeatureValue::Text(record.condition.as_str().to_string()),
        ]);
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    pub fn rows(&self) -> &[[FeatureValue; 12]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact references unknown column '{0}'")]
    UnknownColumn(String),
    #[error("model returned no prediction")]
    EmptyPrediction,
    #[error("model returned a non-finite price ({0})")]
    NonFinite(f64),
    #[error("model inference failed: {0}")]
    Inference(String),
}

/// Opaque regression model producing prices in millions of rupiah.
pub trait PricePredictor: Send + Sync {
    /// Predicts one price per table row.
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, ModelError>;

    fn name(&self) -> &str;

    fn version(&self) -> &str;
}

/// Linear model with one-hot categorical weights, loaded from JSON.
///
/// ```json
/// {
///   "name": "jabodetabek-linear",
///   "version": "2024.06",
///   "intercept": 150.0,
///   "coefficients": { "land_size_m2": 9.5, "bedrooms": 120.0 },
///   "categories": { "district": { "Menteng": 4200.0 } }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LinearPriceModel {
    name: String,
    version: String,
    intercept: f64,
    #[serde(default)]
    coefficients: HashMap<String, f64>,
    #[serde(default)]
    categories: HashMap<String, HashMap<String, f64>>,
}

impl LinearPriceModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        self.coefficients
            .keys()
            .chain(self.categories.keys())
            .find(|column| !FEATURE_COLUMNS.contains(&column.as_str()))
            .map_or(Ok(()), |column| {
                Err(ModelError::UnknownColumn(column.clone()))
            })
    }

    fn score(&self, row: &[FeatureValue; 12]) -> f64 {
        FEATURE_COLUMNS
            .iter()
            .zip(row.iter())
            .fold(self.intercept, |total, (column, value)| {
                let numeric = value.as_number().and_then(|number| {
                    self.coefficients
                        .get(*column)
                        .map(|weight| weight * number)
                });
                let categorical = value.as_text().and_then(|text| {
                    self.categories
                        .get(*column)
                        .and_then(|weights| weights.get(text))
                        .copied()
                });
                total + numeric.unwrap_or(0.0) + categorical.unwrap_or(0.0)
            })
    }
}

impl PricePredictor for LinearPriceModel {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, ModelError> {
        Ok(table.rows().iter().map(|row| self.score(row)).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}
