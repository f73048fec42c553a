//! VMStaticScrape: scrape of a static list of targets

use super::common::{EndpointAuth, EndpointRelabelings, EndpointScrapeParams};
use super::ManifestKind;
use manifest_render::Resource;
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub struct VmStaticScrape;

impl Resource for VmStaticScrape {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMStaticScrape";
    type Spec = VmStaticScrapeSpec;
}

impl ManifestKind for VmStaticScrape {
    const DESCRIPTION: &'static str = "VMStaticScrape defines static targets configuration for scraping.";

    fn spec_schema() -> Attribute {
        Attribute::object(
            Block::new("VMStaticScrapeSpec defines the desired state of VMStaticScrape.")
                .attribute("job_name", Attribute::string("JobName name of job."))
                .attribute(
                    "sample_limit",
                    Attribute::int64("SampleLimit defines per-scrape limit on number of scraped samples that will be accepted.")
                        .validate(Validator::at_least(0)),
                )
                .attribute(
                    "series_limit",
                    Attribute::int64("SeriesLimit defines per-scrape limit on number of unique time series a single target can expose during all the scrapes on the time window of 24h.")
                        .validate(Validator::at_least(0)),
                )
                .attribute(
                    "target_endpoints",
                    Attribute::object_list(target_endpoint_schema())
                        .required()
                        .validate(Validator::size_at_least(1)),
                ),
        )
        .required()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VmStaticScrapeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_limit: Option<i64>,
    pub target_endpoints: Vec<TargetEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TargetEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    pub targets: Vec<String>,
    #[serde(flatten)]
    pub scrape: EndpointScrapeParams,
    #[serde(flatten)]
    pub auth: EndpointAuth,
    #[serde(flatten)]
    pub relabelings: EndpointRelabelings,
}

fn target_endpoint_schema() -> Block {
    let block = Block::new("A list of target endpoints to scrape metrics from.")
        .attribute(
            "labels",
            Attribute::string_map("Labels static labels for targets.").validate(Validator::LabelMap),
        )
        .attribute(
            "targets",
            Attribute::string_list("Targets static targets addresses in form of ['192.122.55.55:9100','some-name:9100'].")
                .required()
                .validate(Validator::size_at_least(1)),
        );
    let block = EndpointScrapeParams::extend(block);
    let block = EndpointAuth::extend(block);
    EndpointRelabelings::extend(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifest_schema::{validate, ValidationOptions};

    #[test]
    fn test_targets_must_not_be_empty() {
        let block = Block::new("test").attribute("spec", VmStaticScrape::spec_schema());
        let config: serde_yaml::Value =
            serde_yaml::from_str("spec: {target_endpoints: [{targets: []}]}").unwrap();
        let diagnostics = validate(&block, &config, &ValidationOptions::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().path.as_ref().unwrap().to_string(),
            "spec.target_endpoints[0].targets"
        );
    }

    #[test]
    fn test_target_endpoint_labels() {
        let endpoint: TargetEndpoint = serde_yaml::from_str(
            "targets: [\"10.0.0.1:9100\"]\nlabels: {env: prod}\nscrape_interval: 15s\n",
        )
        .unwrap();
        let output: serde_yaml::Value =
            serde_yaml::from_str(&serde_yaml::to_string(&endpoint).unwrap()).unwrap();
        assert_eq!(output["labels"]["env"], "prod");
        assert_eq!(output["targets"][0], "10.0.0.1:9100");
        assert_eq!(output["scrape_interval"], "15s");
    }
}
