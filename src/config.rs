//! Settings structures, defaults and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chunker::{ChunkError, ConfigChunker, DEFAULT_DELIMITER};
use crate::credentials::CredentialSettings;

/// Log levels accepted in `general.log_level`
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Settings shared by the `bart` tool and library callers
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub chunker: ChunkerSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub credentials: CredentialSettings,
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(level) = &self.general.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ValidationError::InvalidGeneral(format!(
                    "unknown log_level '{}' (expected one of {})",
                    level,
                    LOG_LEVELS.join(", ")
                )));
            }
        }

        if self.chunker.step == 0 {
            return Err(ValidationError::InvalidChunker(
                "step must be at least 1 line".to_string(),
            ));
        }
        if self.chunker.delimiter.is_empty() {
            return Err(ValidationError::InvalidChunker(
                "delimiter cannot be empty".to_string(),
            ));
        }
        if self.chunker.prefix.is_empty() {
            return Err(ValidationError::InvalidChunker(
                "prefix cannot be empty".to_string(),
            ));
        }

        if self.credentials.username_env.is_empty() || self.credentials.password_env.is_empty() {
            return Err(ValidationError::InvalidCredentials(
                "username_env and password_env cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Build a chunker from the chunker section
    pub fn chunker(&self) -> Result<ConfigChunker, ChunkError> {
        ConfigChunker::new(self.chunker.step)?.with_delimiter(self.chunker.delimiter.clone())
    }
}

/// General settings
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Chunker settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkerSettings {
    #[serde(default = "default_step")]
    pub step: usize,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

/// Settings validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general settings: {0}")]
    InvalidGeneral(String),
    #[error("Invalid chunker settings: {0}")]
    InvalidChunker(String),
    #[error("Invalid credential settings: {0}")]
    InvalidCredentials(String),
}

fn default_step() -> usize {
    200
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_prefix() -> String {
    "chunk".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Default implementations
impl Default for ChunkerSettings {
    fn default() -> Self {
        Self {
            step: default_step(),
            delimiter: default_delimiter(),
            prefix: default_prefix(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}
