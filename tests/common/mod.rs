#![allow(dead_code)]

use heart_predict::{router, AppState, AssetState};
use std::path::Path;
use tokio::net::TcpListener;

pub const HEART_FEATURES: [&str; 13] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Writes a logistic regression bundle over the 13 heart features. The
/// feature list carries a trailing `target` column, as exported from training.
pub fn write_heart_artifacts(dir: &Path) {
    let mut columns: Vec<&str> = HEART_FEATURES.to_vec();
    columns.push("target");
    std::fs::write(
        dir.join("feature_columns.json"),
        serde_json::to_string(&columns).unwrap(),
    )
    .unwrap();

    std::fs::write(
        dir.join("scaler.json"),
        serde_json::json!({
            "kind": "standard",
            "mean": [54.37, 0.683, 0.967, 131.62, 246.26, 0.149, 0.528, 149.65, 0.327, 1.04, 1.399, 0.729, 2.314],
            "scale": [9.067, 0.465, 1.03, 17.51, 51.75, 0.356, 0.525, 22.87, 0.469, 1.159, 0.615, 1.021, 0.611]
        })
        .to_string(),
    )
    .unwrap();

    write_model(
        dir,
        serde_json::json!({
            "kind": "logistic_regression",
            "coefficients": [-0.072, -0.798, 0.853, -0.283, -0.187, 0.041, 0.231, 0.447, -0.463, -0.546, 0.351, -0.822, -0.571],
            "intercept": 0.162
        }),
    );
}

pub fn write_model(dir: &Path, model: serde_json::Value) {
    std::fs::write(dir.join("model.json"), model.to_string()).unwrap();
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_server(state: AssetState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(state)))
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}
