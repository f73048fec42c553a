//! Kubernetes Manifest Provider Library
//!
//! Exposes the VictoriaMetrics operator custom resources (VMRule,
//! VMScrapeConfig, VMServiceScrape, ...) as read-only data sources. Each data
//! source validates a snake_case configuration against its schema table and
//! renders it as a YAML manifest with a fixed `apiVersion` and `kind`.

pub mod cli;
pub mod config;
pub mod datasource;
pub mod error;
pub mod provider;
pub mod utils;

pub use config::{Config, OrganizationStrategy, OutputConfig};
pub use error::{ProviderError, Result};
pub use manifest_schema::{Block, Diagnostic, Diagnostics, ValidationOptions};
pub use provider::{DataSource, DataSourceRegistry, ReadRequest, ReadResponse};

use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// Main application context: the data source registry plus provider configuration
pub struct ManifestProvider {
    config: Config,
    registry: DataSourceRegistry,
}

impl ManifestProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let registry =
            DataSourceRegistry::with_builtin(&config.provider_type_name, config.validation.clone())?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &DataSourceRegistry {
        &self.registry
    }

    /// Data source type names, optionally filtered by a glob pattern
    pub fn list(&self, filter: Option<&str>) -> Result<Vec<String>> {
        let names = match filter {
            Some(pattern) => self.registry.filter(pattern)?,
            None => self.registry.type_names(),
        };
        Ok(names.into_iter().map(str::to_string).collect())
    }

    pub fn schema(&self, type_name: &str) -> Result<Block> {
        self.registry.schema(type_name)
    }

    pub fn validate(&self, type_name: &str, config: &Value) -> Result<Diagnostics> {
        self.registry.validate(type_name, config)
    }

    pub fn read(&self, type_name: &str, config: Value) -> Result<ReadResponse> {
        self.registry.read(type_name, config)
    }

    /// Render every request found in a file or, recursively, in a directory
    pub async fn render_path(&self, input: &Path) -> Result<RenderResult> {
        let start_time = Instant::now();

        let files = if input.is_dir() {
            utils::find_yaml_files(input)
        } else {
            vec![input.to_path_buf()]
        };
        info!("Rendering {} request file(s) from {:?}", files.len(), input);

        let mut result = RenderResult::default();
        for file in &files {
            result.files_processed += 1;
            let requests = match load_requests(file).await {
                Ok(requests) => requests,
                Err(error) => {
                    error!("Failed to load requests from {:?}: {}", file, error);
                    if self.config.validation.fail_fast {
                        return Err(error);
                    }
                    result.failures.push(RenderFailure {
                        source: file.clone(),
                        document: None,
                        type_name: None,
                        error: error.to_string(),
                    });
                    continue;
                }
            };

            for (document, request) in requests.into_iter().enumerate() {
                result.statistics.documents_processed += 1;
                match self.render_request(file, document, request) {
                    Ok(manifest) => result.manifests.push(manifest),
                    Err(failure) => {
                        error!(
                            "Failed to render document {} of {:?}: {}",
                            document, file, failure.error
                        );
                        if self.config.validation.fail_fast {
                            return Err(failure.error);
                        }
                        result.failures.push(RenderFailure {
                            source: file.clone(),
                            document: Some(document),
                            type_name: Some(failure.type_name),
                            error: failure.error.to_string(),
                        });
                    }
                }
            }
        }

        result.statistics.manifests_rendered = result.manifests.len();
        result.statistics.error_count = result.failures.len();
        result.statistics.total_processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Rendered {} manifest(s) with {} error(s) in {}ms",
            result.statistics.manifests_rendered,
            result.statistics.error_count,
            result.statistics.total_processing_time_ms
        );
        Ok(result)
    }

    fn render_request(
        &self,
        source: &Path,
        document: usize,
        request: RenderRequest,
    ) -> std::result::Result<RenderedManifest, PendingFailure> {
        let fail = |error: ProviderError| PendingFailure {
            type_name: request.type_name.clone(),
            error,
        };

        let data_source = self
            .registry
            .get(&request.type_name)
            .ok_or_else(|| fail(ProviderError::UnknownDataSource(request.type_name.clone())))?;
        let kind = data_source.kind().to_string();
        let metadata = &request.config["metadata"];
        let name = metadata["name"].as_str().unwrap_or_default().to_string();
        let namespace = metadata["namespace"].as_str().map(str::to_string);

        let response = self
            .registry
            .read(&request.type_name, request.config.clone())
            .map_err(fail)?;

        Ok(RenderedManifest {
            source: source.to_path_buf(),
            document,
            type_name: data_source.metadata(self.registry.provider_type_name()),
            kind,
            name,
            namespace,
            yaml: response.yaml,
        })
    }

    /// Path a manifest is written to under `output_dir`
    pub fn manifest_path(&self, manifest: &RenderedManifest, output_dir: &Path) -> PathBuf {
        output_dir.join(self.config.output.relative_path(
            &manifest.kind,
            manifest.namespace.as_deref(),
            &manifest.name,
        ))
    }

    /// Write each rendered manifest to its own file under the output directory.
    /// When two manifests map to the same file the later one wins and the path is
    /// reported in [`WriteResult::collisions`].
    pub async fn write_manifests(
        &self,
        manifests: &[RenderedManifest],
        output_dir: &Path,
    ) -> Result<WriteResult> {
        let mut result = WriteResult::default();
        let mut seen: HashSet<PathBuf> = HashSet::with_capacity(manifests.len());

        for manifest in manifests {
            let path = self.manifest_path(manifest, output_dir);
            if seen.insert(path.clone()) {
                result.files.push(path.clone());
            } else {
                warn!(
                    "{} {}/{} overwrites {:?} written earlier in this run",
                    manifest.kind,
                    manifest.namespace.as_deref().unwrap_or("cluster"),
                    manifest.name,
                    path
                );
                result.collisions.push(path.clone());
            }
            if let Some(parent) = path.parent() {
                utils::ensure_directory(parent)?;
            }
            tokio::fs::write(&path, &manifest.yaml)
                .await
                .map_err(|source| ProviderError::Io {
                    path: path.clone(),
                    source,
                })?;
        }

        info!(
            "Wrote {} manifest file(s) to {:?}",
            result.files.len(),
            output_dir
        );
        Ok(result)
    }
}

/// One render request document: `{type, config}`
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    /// Full type name or kind of the data source
    #[serde(rename = "type")]
    pub type_name: String,

    /// Data source configuration
    pub config: Value,
}

/// Parse every request document of a multi-document YAML file. Empty documents are skipped.
pub async fn load_requests(path: &Path) -> Result<Vec<RenderRequest>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_requests(path, &content)
}

fn parse_requests(path: &Path, content: &str) -> Result<Vec<RenderRequest>> {
    let mut requests = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document).map_err(|source| ProviderError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        if value.is_null() {
            continue;
        }
        let request: RenderRequest =
            serde_yaml::from_value(value).map_err(|e| ProviderError::InvalidRequest {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        requests.push(request);
    }
    Ok(requests)
}

struct PendingFailure {
    type_name: String,
    error: ProviderError,
}

/// A manifest rendered from one request document
#[derive(Debug, Clone)]
pub struct RenderedManifest {
    pub source: PathBuf,
    pub document: usize,
    pub type_name: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub yaml: String,
}

/// A request document, or a whole request file, that could not be rendered
#[derive(Debug, Clone)]
pub struct RenderFailure {
    pub source: PathBuf,
    /// `None` when the file itself could not be loaded
    pub document: Option<usize>,
    pub type_name: Option<String>,
    pub error: String,
}

impl std::fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source.display())?;
        if let Some(document) = self.document {
            write!(f, " (document {document}")?;
            if let Some(type_name) = &self.type_name {
                write!(f, ", {type_name}")?;
            }
            write!(f, ")")?;
        }
        write!(f, ": {}", self.error)
    }
}

/// Files written for a set of rendered manifests
#[derive(Debug, Clone, Default)]
pub struct WriteResult {
    /// Distinct files, in write order
    pub files: Vec<PathBuf>,
    /// Paths targeted by more than one manifest
    pub collisions: Vec<PathBuf>,
}

/// Render statistics
#[derive(Debug, Clone, Default)]
pub struct RenderStatistics {
    pub total_processing_time_ms: u64,
    pub documents_processed: usize,
    pub manifests_rendered: usize,
    pub error_count: usize,
}

/// Result of rendering a file or directory of requests
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub files_processed: usize,
    pub manifests: Vec<RenderedManifest>,
    pub failures: Vec<RenderFailure>,
    pub statistics: RenderStatistics,
}

impl RenderResult {
    /// All manifests as one multi-document YAML stream
    pub fn to_stream(&self) -> String {
        let documents: Vec<&str> = self.manifests.iter().map(|m| m.yaml.as_str()).collect();
        manifest_render::render_documents(&documents)
    }
}
