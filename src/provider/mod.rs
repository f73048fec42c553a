//! Data source contract and the registry serving it

pub mod registry;

pub use registry::DataSourceRegistry;

use manifest_schema::{Block, Diagnostics};
use serde_yaml::Value;

/// Configuration handed to a data source read
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Validated configuration
    pub config: Value,
}

impl ReadRequest {
    pub fn new(config: Value) -> Self {
        Self { config }
    }
}

/// Result of a data source read
#[derive(Debug, Clone)]
pub struct ReadResponse {
    /// The rendered manifest
    pub yaml: String,

    /// The configuration with computed attributes filled in
    pub state: Value,
}

/// A read-only data source
pub trait DataSource: Send + Sync {
    /// Kind of the rendered resource
    fn kind(&self) -> &'static str;

    /// API version of the rendered resource
    fn api_version(&self) -> String;

    /// Type name without the provider prefix
    fn type_name_suffix(&self) -> String;

    /// Full type name under the given provider type name
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}", self.type_name_suffix())
    }

    /// Schema table of the data source
    fn schema(&self) -> Block;

    /// Render the configuration. Expects configuration that passed validation.
    fn read(&self, request: ReadRequest) -> Result<ReadResponse, Diagnostics>;
}

/// `<group>_<kind>_<version>_manifest`, e.g. `operator_victoriametrics_com_vm_rule_v1beta1_manifest`
pub fn type_name_suffix(group: &str, kind: &str, version: &str) -> String {
    let group = group.replace(['.', '-'], "_");
    let kind = snake_case(kind);
    if group.is_empty() {
        format!("{kind}_{version}_manifest")
    } else {
        format!("{group}_{kind}_{version}_manifest")
    }
}

/// Convert a kind such as `VMServiceScrape` to `vm_service_scrape`
pub fn snake_case(kind: &str) -> String {
    let chars: Vec<char> = kind.chars().collect();
    let mut result = String::with_capacity(kind.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}
