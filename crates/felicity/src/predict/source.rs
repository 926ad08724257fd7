//! Where model artifacts come from.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{FelicityError, Result};

/// Fetches the serialized model artifact and its feature manifest.
///
/// The adapter never cares where the bytes come from; tests inject
/// in-memory or deliberately broken sources.
pub trait ArtifactSource {
    /// Fetch the manifest bytes (feature names in positional order).
    fn fetch_manifest(&self) -> Result<Vec<u8>>;

    /// Fetch the model artifact bytes.
    fn fetch_model(&self) -> Result<Vec<u8>>;

    /// Human-readable description of the source (for error messages).
    fn describe(&self) -> String;
}

/// Remote artifacts fetched over HTTP at session start.
pub struct HttpSource {
    client: Client,
    manifest_url: String,
    model_url: String,
}

impl HttpSource {
    /// Create an HTTP source with a request timeout.
    pub fn new(manifest_url: impl Into<String>, model_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FelicityError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            manifest_url: manifest_url.into(),
            model_url: model_url.into(),
        })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching model artifact");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FelicityError::ModelUnavailable(format!("fetch failed for {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(FelicityError::ModelUnavailable(format!(
                "fetch failed for {url}: HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| FelicityError::ModelUnavailable(format!("read failed for {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

impl ArtifactSource for HttpSource {
    fn fetch_manifest(&self) -> Result<Vec<u8>> {
        self.fetch(&self.manifest_url)
    }

    fn fetch_model(&self) -> Result<Vec<u8>> {
        self.fetch(&self.model_url)
    }

    fn describe(&self) -> String {
        format!("http: {}", self.model_url)
    }
}

/// Artifacts read from the local filesystem.
pub struct FileSource {
    manifest_path: PathBuf,
    model_path: PathBuf,
}

impl FileSource {
    pub fn new(manifest_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            model_path: model_path.into(),
        }
    }

    fn read(path: &PathBuf) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| {
            FelicityError::ModelUnavailable(format!("read failed for '{}': {e}", path.display()))
        })
    }
}

impl ArtifactSource for FileSource {
    fn fetch_manifest(&self) -> Result<Vec<u8>> {
        Self::read(&self.manifest_path)
    }

    fn fetch_model(&self) -> Result<Vec<u8>> {
        Self::read(&self.model_path)
    }

    fn describe(&self) -> String {
        format!("file: {}", self.model_path.display())
    }
}
