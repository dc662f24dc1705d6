//! HTTP client for the prediction API, plus the patient record the
//! intake form collects.

use crate::domain::model::{HealthReport, PredictionRequest, PredictionResult};
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::validate_url;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 0,
        }
    }
}

/// Clinical attributes keyed by the names the model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub age: u32,
    pub sex: u8,
    /// chest pain type, 0-3
    pub cp: u8,
    /// resting blood pressure, mm Hg
    pub trestbps: u32,
    /// serum cholesterol, mg/dl
    pub chol: u32,
    /// fasting blood sugar > 120 mg/dl
    pub fbs: u8,
    pub restecg: u8,
    /// maximum heart rate achieved
    pub thalach: u32,
    /// exercise induced angina
    pub exang: u8,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    pub slope: u8,
    /// number of major vessels coloured by fluoroscopy, 0-3
    pub ca: u8,
    /// 0 normal, 1 fixed defect, 2 reversible defect
    pub thal: u8,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            age: 45,
            sex: Sex::Male.code(),
            cp: 0,
            trestbps: 120,
            chol: 220,
            fbs: 0,
            restecg: 0,
            thalach: 150,
            exang: 0,
            oldpeak: 1.0,
            slope: 0,
            ca: 0,
            thal: 0,
        }
    }
}

impl PatientRecord {
    pub fn to_features(&self) -> Result<HashMap<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ServiceError::transform(format!(
                "patient record serialized to {} instead of an object",
                other
            ))),
        }
    }
}

pub struct PredictionClient {
    client: Client,
    base_url: Url,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = validate_url("endpoint", base_url)?;
        // keep any path prefix when joining route names
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn route(&self, name: &str) -> Result<Url> {
        self.base_url.join(name).map_err(|e| ServiceError::ConfigError {
            message: format!("cannot build URL for '{}': {}", name, e),
        })
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let url = self.route("health")?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    pub async fn predict(&self, record: &PatientRecord) -> Result<PredictionResult> {
        self.predict_features(record.to_features()?).await
    }

    pub async fn predict_features(&self, data: HashMap<String, Value>) -> Result<PredictionResult> {
        let url = self.route("predict")?;
        tracing::debug!("POST {} with {} features", url, data.len());
        let response = self
            .client
            .post(url)
            .json(&PredictionRequest { data })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// Human-facing interpretation of a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub high_risk: bool,
    pub result: PredictionResult,
}

impl RiskAssessment {
    pub fn from_response(result: PredictionResult) -> Self {
        let high_risk = match &result {
            PredictionResult::Classification {
                prediction_value, ..
            } => *prediction_value == 1,
            PredictionResult::Score { prediction } => *prediction >= 0.5,
        };
        Self { high_risk, result }
    }

    pub fn render(&self) -> String {
        match &self.result {
            PredictionResult::Classification {
                prediction_value,
                probability,
            } => {
                let mut lines = vec![format!("Prediction Value: {}", prediction_value)];
                lines.push(if self.high_risk {
                    "Heart Disease Detected!".to_string()
                } else {
                    "No Heart Disease Detected.".to_string()
                });
                if let Some(p) = probability {
                    lines.push(format!("Probability: {:.2}%", p * 100.0));
                }
                lines.push(if self.high_risk {
                    "Risk Level: High Risk - Immediate consultation recommended.".to_string()
                } else {
                    "Risk Level: Low Risk - Continue healthy habits.".to_string()
                });
                lines.join("\n")
            }
            PredictionResult::Score { .. } if self.high_risk => {
                "High Risk of Heart Disease Detected!".to_string()
            }
            PredictionResult::Score { .. } => "Low Risk of Heart Disease.".to_string(),
        }
    }
}
