use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::explain::{explain, Factor, FactorThresholds};
use super::format::format_rupiah;
use super::model::{FeatureTable, LinearPriceModel, ModelError, PricePredictor};
use super::record::{normalize, FeatureRecord, FormFields};
use crate::config::ModelConfig;

pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Error: Model tidak dapat dimuat.";

const INVALID_FORM_PREFIX: &str = "Terjadi kesalahan: Pastikan semua kolom terisi dengan benar.";

/// What a single estimation request produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Estimated {
        price: String,
        price_idr: f64,
        factors: Vec<Factor>,
        input: FeatureRecord,
    },
    /// The form could not be used; the submitted values are echoed back.
    Invalid {
        message: String,
        form_data: BTreeMap<String, String>,
    },
    ModelUnavailable { message: String },
}

/// View model handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(flatten)]
    pub outcome: PredictionOutcome,
    pub generated_at: DateTime<Utc>,
}

impl PredictionResult {
    fn new(outcome: PredictionOutcome) -> Self {
        Self {
            outcome,
            generated_at: Utc::now(),
        }
    }

    /// Formatted price on success, otherwise the user-facing error message.
    pub fn price_text(&self) -> &str {
        match &self.outcome {
            PredictionOutcome::Estimated { price, .. } => price.as_str(),
            PredictionOutcome::Invalid { message, .. }
            | PredictionOutcome::ModelUnavailable { message } => message.as_str(),
        }
    }

    pub fn factors(&self) -> &[Factor] {
        match &self.outcome {
            PredictionOutcome::Estimated { factors, .. } => factors.as_slice(),
            _ => &[],
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self.outcome, PredictionOutcome::Estimated { .. })
    }
}

/// Stateless orchestrator composing normalization, inference and factors.
pub struct PriceEstimator {
    model: Option<Arc<dyn PricePredictor>>,
    thresholds: FactorThresholds,
}

impl PriceEstimator {
    pub fn new(model: Arc<dyn PricePredictor>, thresholds: FactorThresholds) -> Self {
        Self {
            model: Some(model),
            thresholds,
        }
    }

    /// Estimator that answers every request with the model-unavailable message.
    pub fn without_model(thresholds: FactorThresholds) -> Self {
        Self {
            model: None,
            thresholds,
        }
    }

    /// Loads the configured artifact; a load failure is logged and leaves the
    /// estimator serving without a model.
    pub fn from_config(config: &ModelConfig, thresholds: FactorThresholds) -> Self {
        match LinearPriceModel::from_path(&config.artifact_path) {
            Ok(model) => {
                info!(
                    path = %config.artifact_path.display(),
                    model = model.name(),
                    version = model.version(),
                    "price model loaded"
                );
                Self::new(Arc::new(model), thresholds)
            }
            Err(err) => {
                error!(
                    path = %config.artifact_path.display(),
                    error = %err,
                    "price model unavailable; predictions disabled"
                );
                Self::without_model(thresholds)
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&dyn PricePredictor> {
        self.model.as_deref()
    }

    pub fn thresholds(&self) -> &FactorThresholds {
        &self.thresholds
    }

    pub fn estimate<F>(&self, raw: &F) -> PredictionResult
    where
        F: FormFields + ?Sized,
    {
        let Some(model) = self.model.as_deref() else {
            warn!("prediction requested without a loaded model");
            return PredictionResult::new(PredictionOutcome::ModelUnavailable {
                message: MODEL_UNAVAILABLE_MESSAGE.to_string(),
            });
        };

        let record = match normalize(raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "rejected property form");
                return invalid(raw, &err);
            }
        };

        let millions = match predict_first(model, &record) {
            Ok(millions) => millions,
            Err(err) => {
                error!(model = model.name(), error = %err, "price model failed");
                return invalid(raw, &err);
            }
        };

        let factors = explain(&record, &self.thresholds);
        let price = format_rupiah(millions);
        info!(
            district = %record.district,
            city = %record.city,
            %price,
            factors = factors.len(),
            "price estimated"
        );

        PredictionResult::new(PredictionOutcome::Estimated {
            price,
            price_idr: (millions * 1_000_000.0).round(),
            factors,
            input: record,
        })
    }
}

fn predict_first(model: &dyn PricePredictor, record: &FeatureRecord) -> Result<f64, ModelError> {
    let table = FeatureTable::single(record);
    let millions = model
        .predict(&table)?
        .first()
        .copied()
        .ok_or(ModelError::EmptyPrediction)?;

    // The rupiah amount must stay representable once scaled up from millions.
    if !(millions * 1_000_000.0).is_finite() {
        return Err(ModelError::NonFinite(millions));
    }
    Ok(millions)
}

fn invalid<F, E>(raw: &F, cause: &E) -> PredictionResult
where
    F: FormFields + ?Sized,
    E: std::fmt::Display,
{
    PredictionResult::new(PredictionOutcome::Invalid {
        message: format!("{INVALID_FORM_PREFIX} ({cause})"),
        form_data: raw.snapshot(),
    })
}
