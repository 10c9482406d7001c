use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};

use super::districts;
use super::service::{PredictionOutcome, PredictionResult, PriceEstimator};

/// Router builder exposing the prediction form endpoint and its JSON twin.
pub fn valuation_router(estimator: Arc<PriceEstimator>) -> Router {
    Router::new()
        .route("/predict", post(predict_form_handler))
        .route("/api/v1/predict", post(predict_json_handler))
        .route("/api/v1/districts", get(districts_handler))
        .with_state(estimator)
}

pub(crate) async fn predict_form_handler(
    State(estimator): State<Arc<PriceEstimator>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    render(estimator.estimate(&fields))
}

pub(crate) async fn predict_json_handler(
    State(estimator): State<Arc<PriceEstimator>>,
    Json(payload): Json<BTreeMap<String, Value>>,
) -> Response {
    let fields: BTreeMap<String, String> = payload
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            Value::Number(number) => Some((key, number.to_string())),
            Value::Bool(flag) => Some((key, flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect();

    render(estimator.estimate(&fields))
}

pub(crate) async fn districts_handler() -> Json<Value> {
    Json(json!({ "cities": districts::catalog() }))
}

fn render(result: PredictionResult) -> Response {
    let status = match result.outcome {
        PredictionOutcome::Estimated { .. } => StatusCode::OK,
        PredictionOutcome::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PredictionOutcome::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(result)).into_response()
}
