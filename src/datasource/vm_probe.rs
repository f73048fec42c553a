//! VMProbe: blackbox style probing of static targets and ingresses

use super::common::{
    EndpointAuth, EndpointScrapeParams, LabelSelector, NamespaceSelector, RelabelConfig, SCHEMES,
};
use super::ManifestKind;
use manifest_render::Resource;
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub struct VmProbe;

impl Resource for VmProbe {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMProbe";
    type Spec = VmProbeSpec;
}

impl ManifestKind for VmProbe {
    const DESCRIPTION: &'static str = "VMProbe defines a probe for targets, that will be executed with prober, like blackbox exporter.";

    fn spec_schema() -> Attribute {
        let block = Block::new("VMProbeSpec contains specification parameters for a Probe.")
            .attribute("job_name", Attribute::string("The job name assigned to scraped metrics by default."))
            .attribute(
                "metric_relabel_configs",
                RelabelConfig::schema("MetricRelabelConfigs to apply to samples after scrapping."),
            )
            .attribute(
                "module",
                Attribute::string("The module to use for probing specifying how to probe the target."),
            )
            .attribute("targets", targets_schema())
            .attribute("vm_prober_spec", prober_schema());
        let block = EndpointScrapeParams::extend(block);
        Attribute::object(EndpointAuth::extend(block)).required()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VmProbeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_relabel_configs: Option<Vec<RelabelConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<ProbeTargets>,
    pub vm_prober_spec: ProberSpec,
    #[serde(flatten)]
    pub scrape: EndpointScrapeParams,
    #[serde(flatten)]
    pub auth: EndpointAuth,
}

/// Address of the prober service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProberSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ProbeTargets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<ProbeIngress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_config: Option<ProbeStaticConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ProbeIngress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<NamespaceSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relabeling_configs: Option<Vec<RelabelConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeStaticConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    pub targets: Vec<String>,
}

fn prober_schema() -> Attribute {
    Attribute::object(
        Block::new("Specification for the prober to use for probing targets.")
            .attribute(
                "path",
                Attribute::string("Path to collect metrics from. Defaults to '/probe'."),
            )
            .attribute(
                "scheme",
                Attribute::string("HTTP scheme to use for scraping. Defaults to 'http'.")
                    .validate(Validator::one_of(SCHEMES)),
            )
            .attribute(
                "url",
                Attribute::string("Mandatory URL of the prober.")
                    .required()
                    .validate(Validator::length_at_least(1)),
            ),
    )
    .required()
}

fn targets_schema() -> Attribute {
    Attribute::object(
        Block::new("Targets defines a set of static and/or dynamically discovered targets to be probed using the prober.")
            .attribute(
                "ingress",
                Attribute::object(
                    Block::new("Ingress defines the set of dynamically discovered ingress objects which hosts are considered for probing.")
                        .attribute("namespace_selector", NamespaceSelector::schema())
                        .attribute(
                            "relabeling_configs",
                            RelabelConfig::schema("RelabelConfigs to apply to samples during service discovery."),
                        )
                        .attribute("selector", LabelSelector::schema("Select Ingress objects by labels.")),
                )
                .validate(Validator::conflicts_with(&["static_config"])),
            )
            .attribute(
                "static_config",
                Attribute::object(
                    Block::new("StaticConfig defines static targets which are considers for probing.")
                        .attribute(
                            "labels",
                            Attribute::string_map("Labels assigned to all metrics scraped from the targets.")
                                .validate(Validator::LabelMap),
                        )
                        .attribute(
                            "targets",
                            Attribute::string_list("Targets is a list of URLs to probe using the configured prober.")
                                .required()
                                .validate(Validator::size_at_least(1)),
                        ),
                ),
            ),
    )
}
