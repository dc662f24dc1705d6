mod common;

use common::{spawn_server, write_heart_artifacts, write_model, HEART_FEATURES};
use heart_predict::{load_assets, AssetState, LocalArtifactStore, TomlConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use tempfile::TempDir;

async fn load_from(dir: &TempDir) -> AssetState {
    let store = LocalArtifactStore::new(dir.path());
    AssetState::from_load(load_assets(&store, &TomlConfig::default()).await)
}

async fn serve_heart_model() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    write_heart_artifacts(dir.path());
    let base = spawn_server(load_from(&dir).await).await;
    (dir, base)
}

async fn post_predict(base: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/predict", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

fn full_record() -> Value {
    json!({
        "age": 63, "sex": 1, "cp": 3, "trestbps": 145, "chol": 233, "fbs": 1,
        "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 2.3, "slope": 0,
        "ca": 0, "thal": 1
    })
}

#[tokio::test]
async fn test_root_reports_liveness() {
    let (_dir, base) = serve_heart_model().await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_health_lists_truncated_schema() {
    let (_dir, base) = serve_heart_model().await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["features"], json!(HEART_FEATURES));
}

#[tokio::test]
async fn test_predict_full_record() {
    let (_dir, base) = serve_heart_model().await;

    let (status, body) = post_predict(&base, json!({ "data": full_record() })).await;

    assert_eq!(status, 200);
    let label = body["prediction_value"].as_u64().unwrap();
    assert!(label == 0 || label == 1);
    let probability = body["probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&probability));
    // label and probability come from the same decision value
    assert_eq!(label == 1, probability > 0.5);
}

#[tokio::test]
async fn test_partial_record_is_zero_filled() {
    let (_dir, base) = serve_heart_model().await;

    let mut data = full_record();
    let object = data.as_object_mut().unwrap();
    for key in ["slope", "ca", "thal"] {
        object.remove(key);
    }
    assert_eq!(object.len(), 10);

    let (status, body) = post_predict(&base, json!({ "data": data })).await;
    assert_eq!(status, 200);
    assert!(body.get("prediction_value").is_some());
}

#[tokio::test]
async fn test_extra_keys_do_not_change_prediction() {
    let (_dir, base) = serve_heart_model().await;

    let (_, plain) = post_predict(&base, json!({ "data": full_record() })).await;

    let mut noisy = full_record();
    noisy["target"] = json!(1);
    noisy["chest_pain_type"] = json!("typical");
    let (status, with_extras) = post_predict(&base, json!({ "data": noisy })).await;

    assert_eq!(status, 200);
    assert_eq!(plain, with_extras);
}

#[tokio::test]
async fn test_health_features_round_trip() {
    let (_dir, base) = serve_heart_model().await;

    let health: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let data: HashMap<String, f64> = health["features"]
        .as_array()
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str().unwrap().to_string(), i as f64 * 0.5))
        .collect();

    let (status, _) = post_predict(&base, json!({ "data": data })).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_non_numeric_value_is_bad_request() {
    let (_dir, base) = serve_heart_model().await;

    let mut data = full_record();
    data["thal"] = json!("reversible defect");
    let (status, body) = post_predict(&base, json!({ "data": data })).await;

    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("thal"));
}

#[tokio::test]
async fn test_model_width_mismatch_is_bad_request() {
    let dir = TempDir::new().unwrap();
    write_heart_artifacts(dir.path());
    write_model(
        dir.path(),
        json!({"kind": "logistic_regression", "coefficients": vec![0.1; 12], "intercept": 0.0}),
    );
    let base = spawn_server(load_from(&dir).await).await;

    let (status, body) = post_predict(&base, json!({ "data": full_record() })).await;

    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("expecting 12 features"));
}

#[tokio::test]
async fn test_missing_data_key_is_rejected() {
    let (_dir, base) = serve_heart_model().await;

    let (status, body) = post_predict(&base, json!({ "features": full_record() })).await;

    assert_eq!(status, 422);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_regression_model_returns_score() {
    let dir = TempDir::new().unwrap();
    write_heart_artifacts(dir.path());
    write_model(
        dir.path(),
        json!({"kind": "linear_regression", "coefficients": vec![0.0; 13], "intercept": 0.42}),
    );
    let base = spawn_server(load_from(&dir).await).await;

    let (status, body) = post_predict(&base, json!({ "data": full_record() })).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "prediction": 0.42 }));
}

#[tokio::test]
async fn test_classifier_without_probability_returns_null() {
    let dir = TempDir::new().unwrap();
    write_heart_artifacts(dir.path());
    write_model(
        dir.path(),
        json!({"kind": "linear_svc", "coefficients": vec![0.0; 13], "intercept": 1.0}),
    );
    let base = spawn_server(load_from(&dir).await).await;

    let (status, body) = post_predict(&base, json!({ "data": {} })).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "prediction_value": 1, "probability": null }));
}

#[tokio::test]
async fn test_failed_load_is_reported_and_blocks_predictions() {
    let dir = TempDir::new().unwrap();
    write_heart_artifacts(dir.path());
    std::fs::remove_file(dir.path().join("scaler.json")).unwrap();
    let base = spawn_server(load_from(&dir).await).await;

    let health: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "error");
    assert_eq!(health["model_loaded"], false);
    assert_eq!(health["features"], Value::Null);
    let error = health["error"].as_str().unwrap();
    assert!(error.contains("scaler.json"));

    let (status, body) = post_predict(&base, json!({ "data": full_record() })).await;
    assert_eq!(status, 500);
    assert!(body["detail"].as_str().unwrap().starts_with("Model not loaded"));

    // any body, even one that is not a prediction request
    let response = reqwest::Client::new()
        .post(format!("{}/predict", base))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
}
