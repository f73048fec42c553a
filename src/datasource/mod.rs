//! Manifest data sources for the VictoriaMetrics operator CRDs

pub mod common;
pub mod metadata;
pub mod vm_node_scrape;
pub mod vm_pod_scrape;
pub mod vm_probe;
pub mod vm_rule;
pub mod vm_scrape_config;
pub mod vm_service_scrape;
pub mod vm_static_scrape;

use crate::provider::{type_name_suffix, DataSource, ReadRequest, ReadResponse};
use manifest_render::{RenderError, Resource};
use manifest_schema::{Attribute, Block, Diagnostic, Diagnostics};
use serde_yaml::Value;
use std::marker::PhantomData;
use tracing::debug;

pub const GROUP: &str = "operator.victoriametrics.com";
pub const VERSION: &str = "v1beta1";

/// Name of the computed attribute holding the rendered manifest
pub const YAML_ATTRIBUTE: &str = "yaml";

/// A resource kind that is exposed as a manifest data source
pub trait ManifestKind: Resource + 'static {
    const DESCRIPTION: &'static str;

    /// Schema of the `spec` attribute
    fn spec_schema() -> Attribute;
}

/// Data source rendering manifests of kind `K`
pub struct ManifestDataSource<K> {
    kind: PhantomData<fn() -> K>,
}

impl<K: ManifestKind> ManifestDataSource<K> {
    pub fn new() -> Self {
        Self { kind: PhantomData }
    }
}

impl<K: ManifestKind> Default for ManifestDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ManifestKind> DataSource for ManifestDataSource<K> {
    fn kind(&self) -> &'static str {
        K::KIND
    }

    fn api_version(&self) -> String {
        K::api_version()
    }

    fn type_name_suffix(&self) -> String {
        type_name_suffix(K::GROUP, K::KIND, K::VERSION)
    }

    fn schema(&self) -> Block {
        Block::new(K::DESCRIPTION)
            .attribute(
                YAML_ATTRIBUTE,
                Attribute::string("The generated manifest in YAML format.").computed(),
            )
            .attribute("metadata", metadata::schema(K::NAMESPACED))
            .attribute("spec", K::spec_schema())
    }

    fn read(&self, request: ReadRequest) -> Result<ReadResponse, Diagnostics> {
        let yaml = manifest_render::render::<K>(&request.config).map_err(|e| match &e {
            RenderError::Decode(_) => Diagnostic::error("Unable to decode configuration", e.to_string()),
            RenderError::Serialize(_) => Diagnostic::error("Unable to marshal manifest", e.to_string()),
        })?;
        debug!("Rendered {} manifest ({} bytes)", K::KIND, yaml.len());

        let mut state = request.config;
        if let Value::Mapping(mapping) = &mut state {
            mapping.insert(Value::from(YAML_ATTRIBUTE), Value::from(yaml.clone()));
        }
        Ok(ReadResponse { yaml, state })
    }
}

/// Every data source this provider ships
pub fn data_sources() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(ManifestDataSource::<vm_node_scrape::VmNodeScrape>::new()),
        Box::new(ManifestDataSource::<vm_pod_scrape::VmPodScrape>::new()),
        Box::new(ManifestDataSource::<vm_probe::VmProbe>::new()),
        Box::new(ManifestDataSource::<vm_rule::VmRule>::new()),
        Box::new(ManifestDataSource::<vm_scrape_config::VmScrapeConfig>::new()),
        Box::new(ManifestDataSource::<vm_service_scrape::VmServiceScrape>::new()),
        Box::new(ManifestDataSource::<vm_static_scrape::VmStaticScrape>::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_envelope() {
        let data_source = ManifestDataSource::<vm_rule::VmRule>::new();
        let schema = data_source.schema();
        assert!(schema.get(YAML_ATTRIBUTE).unwrap().is_computed());
        assert!(schema.get("metadata").unwrap().is_required());
        assert!(schema.lookup("metadata.namespace").unwrap().is_required());
        assert!(schema.lookup("spec.groups.rules.expr").unwrap().is_required());
    }

    #[test]
    fn test_read_fills_computed_yaml() {
        let config: Value = serde_yaml::from_str(
            "metadata: {name: x, namespace: y}\nspec: {groups: [{name: g, rules: [{record: r, expr: e}]}]}",
        )
        .unwrap();
        let response = ManifestDataSource::<vm_rule::VmRule>::new()
            .read(ReadRequest::new(config))
            .unwrap();
        assert_eq!(response.state[YAML_ATTRIBUTE], response.yaml.as_str());
        assert_eq!(response.state["metadata"]["name"], "x");
    }

    #[test]
    fn test_read_reports_decode_failure() {
        let config: Value = serde_yaml::from_str("metadata: {name: x}\nspec: {groups: 3}").unwrap();
        let diagnostics = ManifestDataSource::<vm_rule::VmRule>::new()
            .read(ReadRequest::new(config))
            .unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().summary,
            "Unable to decode configuration"
        );
    }

    #[test]
    fn test_type_names_are_unique() {
        let mut names: Vec<String> = data_sources().iter().map(|d| d.metadata("k8s")).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
