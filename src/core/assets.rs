use crate::core::estimators::{Capabilities, Classifier, Scaler};
use crate::domain::model::FeatureSchema;
use crate::domain::ports::{ArtifactStore, AssetSettings};
use crate::utils::error::{Result, ServiceError};
use serde::de::DeserializeOwned;

/// Classifier, scaler and schema loaded once at startup.
#[derive(Debug, Clone)]
pub struct ModelAssets {
    pub classifier: Classifier,
    pub scaler: Scaler,
    pub schema: FeatureSchema,
    pub capabilities: Capabilities,
}

impl ModelAssets {
    pub fn new(classifier: Classifier, scaler: Scaler, schema: FeatureSchema) -> Self {
        let capabilities = classifier.capabilities();
        Self {
            classifier,
            scaler,
            schema,
            capabilities,
        }
    }
}

/// Process-wide asset state. Immutable once published to the server.
#[derive(Debug)]
pub enum AssetState {
    Ready(ModelAssets),
    Unavailable { error: String },
}

impl AssetState {
    pub fn from_load(result: Result<ModelAssets>) -> Self {
        match result {
            Ok(assets) => AssetState::Ready(assets),
            Err(e) => AssetState::Unavailable {
                error: e.to_string(),
            },
        }
    }

    pub fn assets(&self) -> Option<&ModelAssets> {
        match self {
            AssetState::Ready(assets) => Some(assets),
            AssetState::Unavailable { .. } => None,
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        match self {
            AssetState::Ready(_) => None,
            AssetState::Unavailable { error } => Some(error),
        }
    }
}

/// Reads the three artifacts. Any failure is returned, never retried.
pub async fn load_assets<S, C>(store: &S, settings: &C) -> Result<ModelAssets>
where
    S: ArtifactStore,
    C: AssetSettings,
{
    let classifier: Classifier = read_json(store, settings.model_file()).await?;
    classifier
        .check_fitted()
        .map_err(|message| load_error(store, settings.model_file(), message))?;

    let scaler: Scaler = read_json(store, settings.scaler_file()).await?;
    scaler
        .check_fitted()
        .map_err(|message| load_error(store, settings.scaler_file(), message))?;

    let names: Vec<String> = read_json(store, settings.features_file()).await?;
    if names.len() > settings.max_features() {
        tracing::warn!(
            "Feature list has {} entries, keeping the first {}",
            names.len(),
            settings.max_features()
        );
    }
    let schema = FeatureSchema::new(names, settings.max_features());
    if schema.is_empty() {
        return Err(load_error(
            store,
            settings.features_file(),
            "feature list is empty".to_string(),
        ));
    }

    let assets = ModelAssets::new(classifier, scaler, schema);
    tracing::info!(
        "Loaded {} with {} and {} features (probability: {})",
        assets.classifier.name(),
        assets.scaler.name(),
        assets.schema.len(),
        assets.capabilities.probability
    );

    Ok(assets)
}

async fn read_json<S, T>(store: &S, name: &str) -> Result<T>
where
    S: ArtifactStore,
    T: DeserializeOwned,
{
    tracing::debug!("Reading artifact {}", store.locate(name));
    let bytes = store
        .read_artifact(name)
        .await
        .map_err(|e| load_error(store, name, e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| load_error(store, name, e.to_string()))
}

fn load_error<S: ArtifactStore>(store: &S, name: &str, message: String) -> ServiceError {
    ServiceError::AssetLoadError {
        artifact: store.locate(name),
        message,
    }
}
