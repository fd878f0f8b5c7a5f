use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::{error::FetchError, model::WeatherDataset};

use super::DatasetSource;

/// Reads a saved dataset body from disk, for rendering without the backend.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<WeatherDataset, FetchError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {e}", self.path.display())))?;

        let dataset = WeatherDataset::from_json_str(&body)?;
        debug!(path = %self.path.display(), entries = dataset.len(), "Loaded weather dataset");

        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
