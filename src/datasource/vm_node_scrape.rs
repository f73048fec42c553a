//! VMNodeScrape: scrape of Kubernetes nodes

use super::common::{EndpointAuth, EndpointRelabelings, EndpointScrapeParams, LabelSelector};
use super::ManifestKind;
use manifest_render::Resource;
use manifest_schema::{Attribute, Block};
use serde::{Deserialize, Serialize};

pub struct VmNodeScrape;

impl Resource for VmNodeScrape {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMNodeScrape";
    type Spec = VmNodeScrapeSpec;
}

impl ManifestKind for VmNodeScrape {
    const DESCRIPTION: &'static str = "VMNodeScrape defines discovery for targets placed on kubernetes nodes, usually its node-exporters and other host services.";

    fn spec_schema() -> Attribute {
        let block = Block::new("VMNodeScrapeSpec defines specification for VMNodeScrape.")
            .attribute(
                "job_label",
                Attribute::string("The label to use to retrieve the job name from."),
            )
            .attribute(
                "port",
                Attribute::string("Port name of target usually it's node-exporter port."),
            )
            .attribute(
                "selector",
                LabelSelector::schema("Selector to select kubernetes Nodes."),
            )
            .attribute(
                "target_labels",
                Attribute::string_list("TargetLabels transfers labels on the Kubernetes Node onto the target."),
            );
        let block = EndpointScrapeParams::extend(block);
        let block = EndpointAuth::extend(block);
        Attribute::object(EndpointRelabelings::extend(block))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VmNodeScrapeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_labels: Option<Vec<String>>,
    #[serde(flatten)]
    pub scrape: EndpointScrapeParams,
    #[serde(flatten)]
    pub auth: EndpointAuth,
    #[serde(flatten)]
    pub relabelings: EndpointRelabelings,
}
