//! VMPodScrape: scrape targets discovered from pods

use super::common::{
    AttachMetadata, EndpointAuth, EndpointRelabelings, EndpointScrapeParams, LabelSelector,
    NamespaceSelector,
};
use super::ManifestKind;
use manifest_render::{IntOrString, Resource};
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};

pub struct VmPodScrape;

impl Resource for VmPodScrape {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMPodScrape";
    type Spec = VmPodScrapeSpec;
}

impl ManifestKind for VmPodScrape {
    const DESCRIPTION: &'static str =
        "VMPodScrape is scrape configuration for pods, it generates vmagent's config for scraping pod targets based on selectors.";

    fn spec_schema() -> Attribute {
        Attribute::object(
            Block::new("VMPodScrapeSpec defines the desired state of VMPodScrape")
                .attribute("attach_metadata", AttachMetadata::schema())
                .attribute(
                    "job_label",
                    Attribute::string("The label to use to retrieve the job name from."),
                )
                .attribute("namespace_selector", NamespaceSelector::schema())
                .attribute(
                    "pod_metrics_endpoints",
                    Attribute::object_list(pod_metrics_endpoint_schema())
                        .required()
                        .validate(Validator::size_at_least(1)),
                )
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
                    LabelSelector::schema("Selector to select Pod objects."),
                )
                .attribute(
                    "series_limit",
                    Attribute::int64("SeriesLimit defines per-scrape limit on number of unique time series a single target can expose during all the scrapes on the time window of 24h.")
                        .validate(Validator::at_least(0)),
                ),
        )
        .required()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VmPodScrapeSpec {
    #[serde(rename(serialize = "attach_metadata"), skip_serializing_if = "Option::is_none")]
    pub attach_metadata: Option<AttachMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<NamespaceSelector>,
    pub pod_metrics_endpoints: Vec<PodMetricsEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_target_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_limit: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PodMetricsEndpoint {
    #[serde(rename(serialize = "attach_metadata"), skip_serializing_if = "Option::is_none")]
    pub attach_metadata: Option<AttachMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,
    #[serde(flatten)]
    pub scrape: EndpointScrapeParams,
    #[serde(flatten)]
    pub auth: EndpointAuth,
    #[serde(flatten)]
    pub relabelings: EndpointRelabelings,
}

fn pod_metrics_endpoint_schema() -> Block {
    let block = Block::new("A list of endpoints allowed as part of this PodMetricsEndpoint.")
        .attribute("attach_metadata", AttachMetadata::schema())
        .attribute(
            "filter_running",
            Attribute::bool("FilterRunning applies filter with pod status == running it prevents from scrapping metrics at failed or succeed state pods."),
        )
        .attribute(
            "port",
            Attribute::string("Name of the pod port this endpoint refers to. Mutually exclusive with targetPort.")
                .validate(Validator::conflicts_with(&["target_port", "port_number"])),
        )
        .attribute(
            "port_number",
            Attribute::int64("PortNumber defines the Pod port number which exposes the endpoint.")
                .validate(Validator::at_least(1))
                .validate(Validator::at_most(65535)),
        )
        .attribute(
            "target_port",
            Attribute::int_or_string("TargetPort defines name or number of the pod port this endpoint refers to. Mutually exclusive with port and portNumber.")
                .validate(Validator::conflicts_with(&["port_number"])),
        );
    let block = EndpointScrapeParams::extend(block);
    let block = EndpointAuth::extend(block);
    EndpointRelabelings::extend(block)
}
