pub mod assets;
pub mod estimators;
pub mod predictor;
pub mod vectorizer;

pub use crate::domain::model::{FeatureSchema, PredictionRequest, PredictionResult};
pub use crate::domain::ports::{ArtifactStore, AssetSettings};
pub use crate::utils::error::Result;
