//! Configuration module for mdxgen.
//!
//! Handles the settings file and the options it feeds into conversion.

mod settings;

pub use settings::{OutputFormat, OutputSettings, Settings, SettingsError, CONFIG_ENV};
