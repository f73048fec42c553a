//! Registry of data sources keyed by full type name

use crate::error::{ProviderError, Result};
use crate::provider::{DataSource, ReadRequest, ReadResponse};
use glob::Pattern;
use manifest_schema::{validate, Block, Diagnostics, ValidationOptions};
use serde_yaml::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Data sources served under one provider type name
pub struct DataSourceRegistry {
    provider_type_name: String,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
    options: ValidationOptions,
}

impl DataSourceRegistry {
    pub fn new(provider_type_name: impl Into<String>, options: ValidationOptions) -> Self {
        Self {
            provider_type_name: provider_type_name.into(),
            data_sources: BTreeMap::new(),
            options,
        }
    }

    /// Registry holding every data source this provider ships
    pub fn with_builtin(provider_type_name: impl Into<String>, options: ValidationOptions) -> Result<Self> {
        let mut registry = Self::new(provider_type_name, options);
        for data_source in crate::datasource::data_sources() {
            registry.register(data_source)?;
        }
        info!(
            "Registered {} data sources under provider {}",
            registry.len(),
            registry.provider_type_name
        );
        Ok(registry)
    }

    pub fn provider_type_name(&self) -> &str {
        &self.provider_type_name
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn register(&mut self, data_source: Box<dyn DataSource>) -> Result<()> {
        let type_name = data_source.metadata(&self.provider_type_name);
        if self.data_sources.contains_key(&type_name) {
            return Err(ProviderError::DuplicateDataSource(type_name));
        }
        debug!("Registering data source {}", type_name);
        self.data_sources.insert(type_name, data_source);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_sources.is_empty()
    }

    /// Type names in sorted order
    pub fn type_names(&self) -> Vec<&str> {
        self.data_sources.keys().map(String::as_str).collect()
    }

    /// Type names matching a glob pattern
    pub fn filter(&self, pattern: &str) -> Result<Vec<&str>> {
        let pattern = Pattern::new(pattern)?;
        Ok(self
            .data_sources
            .keys()
            .filter(|name| pattern.matches(name))
            .map(String::as_str)
            .collect())
    }

    /// Find a data source by full type name or by kind (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&dyn DataSource> {
        if let Some(data_source) = self.data_sources.get(name) {
            return Some(data_source.as_ref());
        }
        self.data_sources
            .values()
            .find(|data_source| data_source.kind().eq_ignore_ascii_case(name))
            .map(|data_source| data_source.as_ref())
    }

    fn lookup(&self, name: &str) -> Result<&dyn DataSource> {
        self.get(name)
            .ok_or_else(|| ProviderError::UnknownDataSource(name.to_string()))
    }

    pub fn schema(&self, name: &str) -> Result<Block> {
        Ok(self.lookup(name)?.schema())
    }

    /// Validate configuration for a data source
    pub fn validate(&self, name: &str, config: &Value) -> Result<Diagnostics> {
        let data_source = self.lookup(name)?;
        let diagnostics = validate(&data_source.schema(), config, &self.options);
        debug!(
            "Validated {} configuration: {} error(s), {} warning(s)",
            data_source.kind(),
            diagnostics.errors().count(),
            diagnostics.warnings().count()
        );
        Ok(diagnostics)
    }

    /// Validate, then read. Warnings are logged; errors abort before the transform.
    pub fn read(&self, name: &str, config: Value) -> Result<ReadResponse> {
        let diagnostics = self.validate(name, &config)?;
        if diagnostics.has_errors() {
            return Err(ProviderError::Diagnostics(diagnostics));
        }
        for warning in diagnostics.warnings() {
            warn!("{}", warning);
        }

        let data_source = self.lookup(name)?;
        Ok(data_source.read(ReadRequest::new(config))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DataSourceRegistry {
        DataSourceRegistry::with_builtin("k8s", ValidationOptions::default()).unwrap()
    }

    fn config(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_builtin_type_names() {
        let registry = registry();
        assert_eq!(registry.len(), 7);
        assert!(registry
            .type_names()
            .contains(&"k8s_operator_victoriametrics_com_vm_rule_v1beta1_manifest"));
    }

    #[test]
    fn test_lookup_by_kind() {
        let registry = registry();
        assert_eq!(registry.get("vmrule").unwrap().kind(), "VMRule");
        assert_eq!(registry.get("VMScrapeConfig").unwrap().kind(), "VMScrapeConfig");
        assert!(registry.get("Deployment").is_none());
    }

    #[test]
    fn test_filter() {
        let registry = registry();
        let scrapes = registry.filter("*_vm_*_scrape_*").unwrap();
        assert_eq!(scrapes.len(), 4);
        assert!(registry.filter("[").is_err());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = registry();
        let error = registry
            .register(Box::new(crate::datasource::ManifestDataSource::<
                crate::datasource::vm_rule::VmRule,
            >::new()))
            .unwrap_err();
        assert!(matches!(error, ProviderError::DuplicateDataSource(_)));
    }

    #[test]
    fn test_read_rejects_missing_required() {
        let registry = registry();
        let error = registry
            .read("VMRule", config("metadata: {name: x, namespace: y}\nspec: {groups: [{name: g}]}"))
            .unwrap_err();
        match error {
            ProviderError::Diagnostics(diagnostics) => {
                let diagnostic = diagnostics.iter().next().unwrap();
                assert_eq!(diagnostic.summary, "Missing required argument");
                assert_eq!(diagnostic.path.as_ref().unwrap().to_string(), "spec.groups[0].rules");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_data_source() {
        let error = registry().read("VMCluster", Value::Null).unwrap_err();
        assert!(matches!(error, ProviderError::UnknownDataSource(_)));
    }
}
