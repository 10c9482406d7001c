use house_price::config::AppConfig;
use house_price::valuation::PriceEstimator;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) estimator: Arc<PriceEstimator>,
}

/// Loads the estimator described by the configuration, honoring a CLI
/// override of the model artifact path.
pub(crate) fn load_estimator(config: &mut AppConfig, model: Option<PathBuf>) -> PriceEstimator {
    if let Some(path) = model {
        config.model.artifact_path = path;
    }
    PriceEstimator::from_config(&config.model, config.thresholds)
}
