//! VMRule: alerting and recording rules evaluated by vmalert

use super::ManifestKind;
use manifest_render::Resource;
use manifest_schema::{Attribute, Block, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub struct VmRule;

impl Resource for VmRule {
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const KIND: &'static str = "VMRule";
    type Spec = VmRuleSpec;
}

impl ManifestKind for VmRule {
    const DESCRIPTION: &'static str =
        "VMRule defines rule records for vmalert application";

    fn spec_schema() -> Attribute {
        Attribute::object(
            Block::new("VMRuleSpec defines the desired state of VMRule").attribute(
                "groups",
                Attribute::object_list(rule_group_schema())
                    .required()
                    .validate(Validator::size_at_least(1)),
            ),
        )
        .required()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmRuleSpec {
    pub groups: Vec<RuleGroup>,
}

/// Group of rules evaluated together. The CRD uses snake_case field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_alignment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_filter_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifier_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, Vec<String>>>,
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A single alerting or recording rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    pub expr: String,
    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_firing_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_entries_limit: Option<i64>,
}

fn rule_group_schema() -> Block {
    Block::new("Groups list of group rules")
        .attribute(
            "name",
            Attribute::string("Name of group")
                .required()
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "concurrency",
            Attribute::int64("Concurrency defines how many rules execute at once.")
                .validate(Validator::at_least(1)),
        )
        .attribute(
            "eval_alignment",
            Attribute::bool("Optional Adjust the `time` parameter of group evaluation requests to compensate intentional query delay from the datasource."),
        )
        .attribute(
            "eval_delay",
            Attribute::string("Optional Adjust the `time` parameter of group evaluation requests to compensate intentional query delay from the datasource."),
        )
        .attribute(
            "eval_offset",
            Attribute::string("EvalOffset Group will be evaluated at the exact offset in the range of [0...interval]."),
        )
        .attribute(
            "extra_filter_labels",
            Attribute::string_map("ExtraFilterLabels optional list of label filters applied to every rule's request withing a group."),
        )
        .attribute(
            "headers",
            Attribute::string_list("Headers contains optional HTTP headers added to each rule request Must be in form 'header-name: value'"),
        )
        .attribute("interval", Attribute::string("evaluation interval for group"))
        .attribute(
            "labels",
            Attribute::string_map("Labels optional list of labels added to every rule within a group.")
                .validate(Validator::LabelMap),
        )
        .attribute(
            "limit",
            Attribute::int64("Limit the number of alerts an alerting rule and series a recording rule can produce")
                .validate(Validator::at_least(0)),
        )
        .attribute(
            "notifier_headers",
            Attribute::string_list("NotifierHeaders contains optional HTTP headers added to each alert request which will send to notifier Must be in form 'header-name: value'"),
        )
        .attribute(
            "params",
            Attribute::string_list_map("Params optional HTTP URL parameters added to each rule request"),
        )
        .attribute(
            "rules",
            Attribute::object_list(rule_schema())
                .required()
                .validate(Validator::size_at_least(1)),
        )
        .attribute(
            "tenant",
            Attribute::string("Tenant id for group, can be used only with enterprise version of vmalert."),
        )
        .attribute(
            "type",
            Attribute::string("Type defines datasource type for enterprise version of vmalert possible values - prometheus,graphite,vlogs")
                .validate(Validator::one_of(&["prometheus", "graphite", "vlogs"])),
        )
}

fn rule_schema() -> Block {
    Block::new("Rules list of alert rules")
        .attribute(
            "alert",
            Attribute::string("Alert is a name for alert")
                .validate(Validator::length_at_least(1))
                .validate(Validator::conflicts_with(&["record"])),
        )
        .attribute(
            "annotations",
            Attribute::string_map("Annotations will be added to rule configuration"),
        )
        .attribute(
            "debug",
            Attribute::bool("Debug enables logging for rule it useful for tracking"),
        )
        .attribute(
            "expr",
            Attribute::string("Expr is query, that will be evaluated at dataSource")
                .required()
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "for",
            Attribute::string("For evaluation interval in time.Duration format 30s, 1m, 1h or nanoseconds"),
        )
        .attribute(
            "keep_firing_for",
            Attribute::string("KeepFiringFor will make alert continue firing for this long even when the alerting expression no longer has results.")
                .validate(Validator::also_requires(&["alert"])),
        )
        .attribute(
            "labels",
            Attribute::string_map("Labels will be added to rule configuration")
                .validate(Validator::LabelMap),
        )
        .attribute(
            "record",
            Attribute::string("Record represents a query, that will be recorded to dataSource")
                .validate(Validator::length_at_least(1)),
        )
        .attribute(
            "update_entries_limit",
            Attribute::int64("UpdateEntriesLimit defines max number of rule's state updates stored in memory.")
                .validate(Validator::at_least(0)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::ManifestDataSource;
    use crate::provider::{DataSource, ReadRequest};

    fn read(yaml: &str) -> String {
        let config: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        ManifestDataSource::<VmRule>::new()
            .read(ReadRequest::new(config))
            .unwrap()
            .yaml
    }

    #[test]
    fn test_minimal_alerting_rule() {
        let yaml = read(
            "metadata: {name: x, namespace: monitoring}\nspec: {groups: [{name: g, rules: [{alert: a, expr: e}]}]}\n",
        );
        assert_eq!(
            yaml,
            "apiVersion: operator.victoriametrics.com/v1beta1\nkind: VMRule\nmetadata:\n  name: x\n  namespace: monitoring\nspec:\n  groups:\n  - name: g\n    rules:\n    - alert: a\n      expr: e\n"
        );
    }

    #[test]
    fn test_rule_keywords_and_snake_case_fields() {
        let yaml = read(
            r#"
metadata: {name: x, namespace: y}
spec:
  groups:
    - name: g
      type: prometheus
      eval_offset: 30s
      rules:
        - alert: HighLatency
          expr: latency > 1
          for: 5m
          keep_firing_for: 1m
"#,
        );
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let group = &value["spec"]["groups"][0];
        assert_eq!(group["type"], "prometheus");
        assert_eq!(group["eval_offset"], "30s");
        assert_eq!(group["rules"][0]["for"], "5m");
        assert_eq!(group["rules"][0]["keep_firing_for"], "1m");
        assert!(group.get("concurrency").is_none());
    }

    #[test]
    fn test_group_labels() {
        let yaml = read(
            "metadata: {name: x, namespace: y}\nspec: {groups: [{name: g, labels: {severity: page, team: sre}, rules: [{record: r, expr: up}]}]}\n",
        );
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let labels = &value["spec"]["groups"][0]["labels"];
        assert_eq!(labels["severity"], "page");
        assert_eq!(labels["team"], "sre");

        let block = Block::new("root").attribute("spec", VmRule::spec_schema());
        let config: serde_yaml::Value = serde_yaml::from_str(
            "spec: {groups: [{name: g, labels: {'-bad': x}, rules: [{record: r, expr: up}]}]}",
        )
        .unwrap();
        let diagnostics = manifest_schema::validate(&block, &config, &Default::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics
            .iter()
            .next()
            .unwrap()
            .detail
            .contains("is not a valid label key"));
    }

    #[test]
    fn test_record_conflicts_with_alert() {
        let schema = VmRule::spec_schema();
        let block = Block::new("root").attribute("spec", schema);
        let config: serde_yaml::Value = serde_yaml::from_str(
            "spec: {groups: [{name: g, rules: [{alert: a, record: r, expr: e}]}]}",
        )
        .unwrap();
        let diagnostics = manifest_schema::validate(&block, &config, &Default::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics
            .iter()
            .next()
            .unwrap()
            .detail
            .contains("spec.groups[0].rules[0].record"));
    }
}
