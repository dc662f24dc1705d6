use crate::domain::ports::ArtifactStore;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ArtifactStore for LocalArtifactStore {
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    fn locate(&self, name: &str) -> String {
        self.base_path.join(name).display().to_string()
    }
}
