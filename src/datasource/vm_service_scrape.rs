//! VMServiceScrape: scrape targets discovered from Kubernetes services

use super::common::{
    AttachMetadata, EndpointAuth, EndpointRelabelings, EndpointScrapeParams, LabelSelector,
    NamespaceSelector,
};
use super::ManifestKind;
use manifest_render::{IntOrString, Resource};
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};

pub struct VmServiceScrape;

impl Resource for VmServiceScrape {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMServiceScrape";
    type Spec = VmServiceScrapeSpec;
}

impl ManifestKind for VmServiceScrape {
    const DESCRIPTION: &'static str =
        "VMServiceScrape is scrape configuration for endpoints associated with kubernetes service, it generates scrape configuration for vmagent based on selectors.";

    fn spec_schema() -> Attribute {
        Attribute::object(
            Block::new("VMServiceScrapeSpec defines the desired state of VMServiceScrape")
                .attribute("attach_metadata", AttachMetadata::schema())
                .attribute(
                    "discovery_role",
                    Attribute::string("DiscoveryRole - defines kubernetes_sd role for objects discovery.")
                        .validate(Validator::one_of(&["endpoints", "service", "endpointslices"])),
                )
                .attribute(
                    "endpoints",
                    Attribute::object_list(endpoint_schema())
                        .required()
                        .validate(Validator::size_at_least(1)),
                )
                .attribute(
                    "job_label",
                    Attribute::string("The label to use to retrieve the job name from."),
                )
                .attribute("namespace_selector", NamespaceSelector::schema())
                .attribute(
                    "pod_target_labels",
                    Attribute::string_list("PodTargetLabels transfers labels on the Kubernetes Pod onto the target."),
                )
                .attribute(
                    "sample_limit",
                    Attribute::int64("SampleLimit defines per-scrape limit on number of scraped samples that will be accepted.")
                        .validate(Validator::at_least(0)),
                )
                .attribute(
                    "selector",
                    LabelSelector::schema("Selector to select Endpoints objects by corresponding Service labels."),
                )
                .attribute(
                    "series_limit",
                    Attribute::int64("SeriesLimit defines per-scrape limit on number of unique time series a single target can expose during all the scrapes on the time window of 24h.")
                        .validate(Validator::at_least(0)),
                )
                .attribute(
                    "target_labels",
                    Attribute::string_list("TargetLabels transfers labels on the Kubernetes Service onto the target."),
                ),
        )
        .required()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VmServiceScrapeSpec {
    #[serde(rename(serialize = "attach_metadata"), skip_serializing_if = "Option::is_none")]
    pub attach_metadata: Option<AttachMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_role: Option<String>,
    pub endpoints: Vec<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<NamespaceSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_target_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_labels: Option<Vec<String>>,
}

/// A scrapeable endpoint of the selected services
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Endpoint {
    #[serde(rename(serialize = "attach_metadata"), skip_serializing_if = "Option::is_none")]
    pub attach_metadata: Option<AttachMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,
    #[serde(flatten)]
    pub scrape: EndpointScrapeParams,
    #[serde(flatten)]
    pub auth: EndpointAuth,
    #[serde(flatten)]
    pub relabelings: EndpointRelabelings,
}

fn endpoint_schema() -> Block {
    let block = Block::new("A list of endpoints allowed as part of this ServiceScrape.")
        .attribute("attach_metadata", AttachMetadata::schema())
        .attribute(
            "port",
            Attribute::string("Name of the service port this endpoint refers to. Mutually exclusive with targetPort.")
                .validate(Validator::conflicts_with(&["target_port"])),
        )
        .attribute(
            "target_port",
            Attribute::int_or_string("Name or number of the pod port this endpoint refers to. Mutually exclusive with port."),
        );
    let block = EndpointScrapeParams::extend(block);
    let block = EndpointAuth::extend(block);
    EndpointRelabelings::extend(block)
}
