use super::error::ApiError;
use super::AppState;
use crate::core::{predictor, vectorizer};
use crate::domain::model::{HealthReport, PredictionRequest, PredictionResult};
use crate::utils::error::ServiceError;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Heart Disease Prediction API is running!" }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let assets = state.assets.assets();
    Json(HealthReport {
        status: if assets.is_some() { "ok" } else { "error" }.to_string(),
        model_loaded: assets.is_some(),
        error: state.assets.load_error().map(str::to_string),
        features: assets.map(|a| a.schema.names().to_vec()),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    // An unloaded model wins over a malformed body.
    let assets = state
        .assets
        .assets()
        .ok_or_else(|| ServiceError::ModelUnavailable {
            message: state.assets.load_error().unwrap_or_default().to_string(),
        })?;
    let Json(request) = payload?;

    let vector = vectorizer::vectorize(&assets.schema, &request.data)?;
    let result = predictor::predict(assets, &vector)?;

    tracing::debug!(
        supplied = request.data.len(),
        expected = assets.schema.len(),
        "Prediction: {:?}",
        result
    );

    Ok(Json(result))
}
