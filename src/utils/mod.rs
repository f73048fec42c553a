//! Utility functions for k8s-manifests

use crate::error::{ProviderError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    } else if !path.is_dir() {
        return Err(ProviderError::Config(format!(
            "Path exists but is not a directory: {path:?}"
        )));
    }
    Ok(())
}

/// Get the XDG config directory for k8s-manifests
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("k8s-manifests"))
}

/// Find all YAML files in a directory recursively, sorted by path
pub fn find_yaml_files(dir: &Path) -> Vec<PathBuf> {
    let mut yaml_files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_yaml_file(path))
        .collect();
    yaml_files.sort();
    yaml_files
}

pub fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Convert a string to a valid filename
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
