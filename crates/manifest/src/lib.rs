//! Kubernetes manifest envelope and YAML rendering

pub mod meta;
pub mod render;
pub mod resource;

pub use meta::ObjectMeta;
pub use render::{render, render_documents, render_yaml, RenderError};
pub use resource::{IntOrString, Manifest, Resource, ResourceConfig, StringOrList};
