//! Property valuation: form normalization, price inference and the
//! explanatory factors shown next to an estimate.

mod batch;
pub mod districts;
mod explain;
mod format;
pub mod model;
mod record;
pub mod router;
mod service;

pub use batch::{BatchError, BatchEstimator, BatchRow, BatchSummary};
pub use districts::CityDistricts;
pub use explain::{explain, is_premium_district, Factor, FactorThresholds, Impact};
pub use format::format_rupiah;
pub use model::{FeatureTable, FeatureValue, LinearPriceModel, ModelError, PricePredictor};
pub use record::{normalize, Condition, FeatureRecord, FormFields, ValidationError, FEATURE_COLUMNS};
pub use router::valuation_router;
pub use service::{
    PredictionOutcome, PredictionResult, PriceEstimator, MODEL_UNAVAILABLE_MESSAGE,
};
