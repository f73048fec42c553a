//! Resource kinds and the manifest envelope

use crate::meta::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A Kubernetes resource kind whose manifests can be rendered
pub trait Resource {
    /// API group, e.g. `operator.victoriametrics.com`
    const GROUP: &'static str;

    /// API version within the group, e.g. `v1beta1`
    const VERSION: &'static str;

    /// Resource kind, e.g. `VMRule`
    const KIND: &'static str;

    /// Whether objects of this kind live in a namespace
    const NAMESPACED: bool = true;

    /// Typed spec of the resource
    type Spec: Serialize + DeserializeOwned;

    /// Full API version (group/version)
    fn api_version() -> String {
        if Self::GROUP.is_empty() {
            Self::VERSION.to_string()
        } else {
            format!("{}/{}", Self::GROUP, Self::VERSION)
        }
    }
}

/// Caller supplied configuration of a manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig<S> {
    pub metadata: ObjectMeta,
    pub spec: Option<S>,
}

/// A complete manifest ready to be encoded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<S> {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S: Serialize> Manifest<S> {
    /// Build a manifest stamped with the kind's fixed `apiVersion` and `kind`
    pub fn new<R>(metadata: ObjectMeta, spec: Option<S>) -> Self
    where
        R: Resource<Spec = S>,
    {
        Self {
            api_version: R::api_version(),
            kind: R::KIND.to_string(),
            metadata,
            spec,
        }
    }

    pub fn from_config<R>(config: ResourceConfig<S>) -> Self
    where
        R: Resource<Spec = S>,
    {
        Self::new::<R>(config.metadata, config.spec)
    }
}

/// Either an integer or a string, as in Kubernetes `IntOrString`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    String(String),
}

impl From<i64> for IntOrString {
    fn from(value: i64) -> Self {
        IntOrString::Int(value)
    }
}

impl From<&str> for IntOrString {
    fn from(value: &str) -> Self {
        IntOrString::String(value.to_string())
    }
}

/// Either a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    String(String),
    List(Vec<String>),
}
