//! TOML-based configuration for mdxgen.
//!
//! Example configuration:
//! ```toml
//! [convert]
//! axis_prefix = "Axis"
//! level_members = "members"   # or "all_members" (default)
//!
//! [output]
//! format = "mdx"              # "mdx", "json" or "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::convert::ConvertOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MDXGEN_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Conversion options.
    pub convert: ConvertOptions,

    /// Output settings.
    pub output: OutputSettings,
}

/// How a converted statement is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// MDX text
    #[default]
    Mdx,
    /// The statement tree as JSON
    Json,
    /// The statement tree in Rust debug form
    Debug,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MDXGEN_CONFIG`
    /// 2. `./mdxgen.toml`
    /// 3. `<config dir>/mdxgen/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("mdxgen.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mdxgen").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Options to pass to [`crate::convert::convert`].
    pub fn convert_options(&self) -> ConvertOptions {
        self.convert.clone()
    }
}
