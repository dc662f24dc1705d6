use crate::core::assets::ModelAssets;
use crate::core::estimators::OutputKind;
use crate::domain::model::PredictionResult;
use crate::utils::error::{Result, ServiceError};

/// Scales one row and runs the model on it.
pub fn predict(assets: &ModelAssets, vector: &[f64]) -> Result<PredictionResult> {
    let expected = assets.schema.len();
    if vector.len() != expected {
        return Err(ServiceError::InputShapeError {
            expected,
            actual: vector.len(),
        });
    }

    let scaled = assets.scaler.transform(vector)?;

    match assets.capabilities.output {
        OutputKind::Score => Ok(PredictionResult::Score {
            prediction: assets.classifier.decision_function(&scaled)?,
        }),
        OutputKind::Label => {
            let prediction_value = assets.classifier.predict_label(&scaled)?;
            let probability = if assets.capabilities.probability {
                assets.classifier.predict_proba(&scaled)?
            } else {
                None
            };
            Ok(PredictionResult::Classification {
                prediction_value,
                probability,
            })
        }
    }
}
