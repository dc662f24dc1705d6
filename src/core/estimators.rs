//! Fitted preprocessing and linear estimators, deserialized from JSON
//! artifacts exported at training time.

use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    Identity,
}

impl Scaler {
    pub fn name(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "StandardScaler",
            Scaler::MinMax { .. } => "MinMaxScaler",
            Scaler::Identity => "IdentityScaler",
        }
    }

    /// Number of features the scaler was fitted on, if it is fixed.
    pub fn n_features(&self) -> Option<usize> {
        match self {
            Scaler::Standard { mean, .. } => Some(mean.len()),
            Scaler::MinMax { min, .. } => Some(min.len()),
            Scaler::Identity => None,
        }
    }

    /// Checks the fitted parameters are internally consistent.
    pub fn check_fitted(&self) -> std::result::Result<(), String> {
        let (offsets, scale) = match self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
            Scaler::Identity => return Ok(()),
        };
        if offsets.len() != scale.len() {
            return Err(format!(
                "{} parameters disagree: {} offsets, {} scale factors",
                self.name(),
                offsets.len(),
                scale.len()
            ));
        }
        if offsets.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(format!("{} parameters contain non-finite values", self.name()));
        }
        Ok(())
    }

    /// Transforms a single row.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        ensure_finite(row)?;
        if let Some(expected) = self.n_features() {
            ensure_width(self.name(), expected, row.len())?;
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => row
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| {
                    // constant columns are fitted with a zero scale
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            Scaler::MinMax { min, scale } => row
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
            Scaler::Identity => row.to_vec(),
        };

        Ok(scaled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression { coefficients: Vec<f64>, intercept: f64 },
    LinearSvc { coefficients: Vec<f64>, intercept: f64 },
    LinearRegression { coefficients: Vec<f64>, intercept: f64 },
}

/// What a loaded model can produce, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub output: OutputKind,
    pub probability: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Label,
    Score,
}

impl Classifier {
    pub fn name(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression { .. } => "LogisticRegression",
            Classifier::LinearSvc { .. } => "LinearSVC",
            Classifier::LinearRegression { .. } => "LinearRegression",
        }
    }

    fn weights(&self) -> (&[f64], f64) {
        match self {
            Classifier::LogisticRegression {
                coefficients,
                intercept,
            }
            | Classifier::LinearSvc {
                coefficients,
                intercept,
            }
            | Classifier::LinearRegression {
                coefficients,
                intercept,
            } => (coefficients.as_slice(), *intercept),
        }
    }

    pub fn n_features(&self) -> usize {
        self.weights().0.len()
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Classifier::LogisticRegression { .. } => Capabilities {
                output: OutputKind::Label,
                probability: true,
            },
            Classifier::LinearSvc { .. } => Capabilities {
                output: OutputKind::Label,
                probability: false,
            },
            Classifier::LinearRegression { .. } => Capabilities {
                output: OutputKind::Score,
                probability: false,
            },
        }
    }

    pub fn check_fitted(&self) -> std::result::Result<(), String> {
        let (coefficients, intercept) = self.weights();
        if coefficients.is_empty() {
            return Err(format!("{} has no coefficients", self.name()));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(format!("{} parameters contain non-finite values", self.name()));
        }
        Ok(())
    }

    /// Signed distance to the decision boundary (or the regression output).
    pub fn decision_function(&self, row: &[f64]) -> Result<f64> {
        ensure_finite(row)?;
        let (coefficients, intercept) = self.weights();
        ensure_width(self.name(), coefficients.len(), row.len())?;

        let z = coefficients
            .iter()
            .zip(row)
            .fold(intercept, |acc, (w, x)| acc + w * x);

        if !z.is_finite() {
            return Err(ServiceError::transform(format!(
                "{} produced a non-finite decision value",
                self.name()
            )));
        }
        Ok(z)
    }

    pub fn predict_label(&self, row: &[f64]) -> Result<u8> {
        Ok(u8::from(self.decision_function(row)? > 0.0))
    }

    /// Probability of the positive class, when the model supports it.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Option<f64>> {
        if !self.capabilities().probability {
            return Ok(None);
        }
        Ok(Some(sigmoid(self.decision_function(row)?)))
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn ensure_finite(row: &[f64]) -> Result<()> {
    if row.iter().any(|v| !v.is_finite()) {
        return Err(ServiceError::transform(
            "Input contains NaN, infinity or a value too large",
        ));
    }
    Ok(())
}

fn ensure_width(estimator: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ServiceError::transform(format!(
            "X has {} features, but {} is expecting {} features as input",
            actual, estimator, expected
        )));
    }
    Ok(())
}
