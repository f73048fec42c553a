//! Error type of the provider library

use manifest_schema::Diagnostics;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown data source: {0}")]
    UnknownDataSource(String),

    #[error("data source registered twice: {0}")]
    DuplicateDataSource(String),

    #[error("configuration has errors:\n{0}")]
    Diagnostics(#[from] Diagnostics),

    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid render request in {path}: {message}")]
    InvalidRequest { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
