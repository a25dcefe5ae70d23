//! Reading query models from TOML or JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::QueryModel;

/// Error type for model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read model file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Invalid TOML model: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON model: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryModel {
    pub fn from_toml_str(source: &str) -> Result<Self, ModelError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a model file; `.json` files are read as JSON, anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), json = is_json, "Loading query model");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}
