use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::valuation::BatchError;

/// Failures that end a CLI command or stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("batch estimation error: {0}")]
    Batch(#[from] BatchError),
    /// The estimate command ran but produced no price.
    #[error("no price estimated: {0}")]
    NotEstimated(String),
}
