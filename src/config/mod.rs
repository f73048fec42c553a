//! Configuration management for k8s-manifests

pub mod config;
pub mod output;


// Re-export main types for convenience
pub use config::{Config, CONFIG_VERSION, DEFAULT_PROVIDER_TYPE_NAME};
pub use manifest_schema::ValidationOptions;
pub use output::{OrganizationStrategy, OutputConfig};
