//! Main configuration structure and implementation

use crate::error::{ProviderError, Result};
use manifest_schema::ValidationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::OutputConfig;

pub const CONFIG_VERSION: &str = "1.0";
pub const DEFAULT_PROVIDER_TYPE_NAME: &str = "k8s";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Prefix of every data source type name
    #[serde(default = "default_provider_type_name")]
    pub provider_type_name: String,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationOptions,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_provider_type_name() -> String {
    DEFAULT_PROVIDER_TYPE_NAME.to_string()
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|source| ProviderError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|source| ProviderError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(ProviderError::Config(format!(
                "Unsupported configuration version: {}",
                self.version
            )));
        }

        if self.provider_type_name.is_empty() {
            return Err(ProviderError::Config(
                "Provider type name cannot be empty".to_string(),
            ));
        }

        if !self
            .provider_type_name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ProviderError::Config(format!(
                "Provider type name must only contain lowercase letters, digits and underscores: {}",
                self.provider_type_name
            )));
        }

        self.output.validate()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            provider_type_name: default_provider_type_name(),
            validation: ValidationOptions::default(),
            output: OutputConfig::default(),
        }
    }
}
