//! Output configuration for rendered manifests

use crate::error::{ProviderError, Result};
use crate::utils::sanitize_filename;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory manifest files are written to. `~` and environment variables are expanded.
    pub directory: PathBuf,

    /// Extension of manifest files, without the dot
    pub file_extension: String,

    /// Layout of manifest files under the output directory
    pub organization: OrganizationStrategy,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(ProviderError::Config(
                "Output directory cannot be empty".to_string(),
            ));
        }
        if self.file_extension.is_empty() {
            return Err(ProviderError::Config(
                "Output file extension cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Output directory with `~` and environment variables expanded
    pub fn resolved_directory(&self) -> Result<PathBuf> {
        let raw = self.directory.to_string_lossy();
        let expanded = shellexpand::full(&raw).map_err(|e| {
            ProviderError::Config(format!("Failed to expand output directory {raw}: {e}"))
        })?;
        Ok(PathBuf::from(expanded.as_ref()))
    }

    /// Path of a manifest file relative to the output directory
    pub fn relative_path(&self, kind: &str, namespace: Option<&str>, name: &str) -> PathBuf {
        let kind = kind.to_lowercase();
        let namespace = namespace.unwrap_or("cluster");
        let file_name = match self.organization {
            OrganizationStrategy::Flat => format!("{namespace}_{kind}_{name}"),
            OrganizationStrategy::Kind => format!("{namespace}_{name}"),
            OrganizationStrategy::Namespace => format!("{kind}_{name}"),
        };
        let file_name = format!("{}.{}", sanitize_filename(&file_name), self.file_extension);

        match self.organization {
            OrganizationStrategy::Flat => PathBuf::from(file_name),
            OrganizationStrategy::Kind => PathBuf::from(kind).join(file_name),
            OrganizationStrategy::Namespace => {
                PathBuf::from(sanitize_filename(namespace)).join(file_name)
            }
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./manifests"),
            file_extension: "yaml".to_string(),
            organization: OrganizationStrategy::Flat,
        }
    }
}

/// Organization strategy for output files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStrategy {
    /// All files in one directory, `<namespace>_<kind>_<name>`
    #[default]
    Flat,

    /// One directory per kind
    Kind,

    /// One directory per namespace
    Namespace,
}
