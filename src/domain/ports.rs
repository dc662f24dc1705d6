use crate::utils::error::Result;

/// Read-only source of persisted model artifacts.
pub trait ArtifactStore: Send + Sync {
    fn read_artifact(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Human-readable location of an artifact, used in diagnostics.
    fn locate(&self, name: &str) -> String;
}

pub trait AssetSettings: Send + Sync {
    fn model_file(&self) -> &str;
    fn scaler_file(&self) -> &str;
    fn features_file(&self) -> &str;
    fn max_features(&self) -> usize;
}
