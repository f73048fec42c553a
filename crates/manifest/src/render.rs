//! YAML rendering of manifests

use crate::resource::{Manifest, Resource, ResourceConfig};
use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

/// Errors raised while turning configuration into manifest text
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode configuration: {0}")]
    Decode(#[source] serde_yaml::Error),

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Encode a manifest as a YAML document
pub fn render_yaml<S: Serialize>(manifest: &Manifest<S>) -> Result<String, RenderError> {
    serde_yaml::to_string(manifest).map_err(RenderError::Serialize)
}

/// Decode configuration for resource `R`, stamp the envelope and encode it
pub fn render<R: Resource>(config: &Value) -> Result<String, RenderError> {
    let config: ResourceConfig<R::Spec> =
        serde_yaml::from_value(config.clone()).map_err(RenderError::Decode)?;
    debug!(
        "Rendering {} {}/{}",
        R::KIND,
        config.metadata.namespace.as_deref().unwrap_or_default(),
        config.metadata.name
    );
    render_yaml(&Manifest::from_config::<R>(config))
}

/// Join documents into one multi-document YAML stream
pub fn render_documents<S: AsRef<str>>(documents: &[S]) -> String {
    let mut stream = String::new();
    for document in documents {
        let document = document.as_ref();
        stream.push_str("---\n");
        stream.push_str(document);
        if !document.ends_with('\n') {
            stream.push('\n');
        }
    }
    stream
}
