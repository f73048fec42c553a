use k8s_manifests::{Config, ManifestProvider, ProviderError, ValidationOptions};
use serde_yaml::Value;

fn provider() -> ManifestProvider {
    ManifestProvider::new(Config::default()).unwrap()
}

fn config(yaml: &str) -> Value {
    serde_yaml::from_str(yaml).unwrap()
}

/// A small valid configuration for every kind
const VALID_CONFIGS: &[(&str, &str)] = &[
    (
        "VMRule",
        "metadata: {name: rules, namespace: monitoring}\nspec: {groups: [{name: g, rules: [{record: r, expr: up}]}]}",
    ),
    (
        "VMScrapeConfig",
        "metadata: {name: static, namespace: monitoring}\nspec: {static_configs: [{targets: [\"10.0.0.1:9100\"]}]}",
    ),
    (
        "VMServiceScrape",
        "metadata: {name: svc, namespace: monitoring}\nspec: {endpoints: [{port: http}], selector: {match_labels: {app: api}}}",
    ),
    (
        "VMPodScrape",
        "metadata: {name: pods, namespace: monitoring}\nspec: {pod_metrics_endpoints: [{port: metrics}]}",
    ),
    (
        "VMStaticScrape",
        "metadata: {name: static, namespace: monitoring}\nspec: {target_endpoints: [{targets: [\"node-1:9100\"]}]}",
    ),
    (
        "VMNodeScrape",
        "metadata: {name: nodes, namespace: monitoring}\nspec: {port: metrics}",
    ),
    (
        "VMProbe",
        "metadata: {name: probe, namespace: monitoring}\nspec: {vm_prober_spec: {url: \"blackbox:9115\"}}",
    ),
];

#[test]
fn test_vmrule_example() {
    let response = provider()
        .read(
            "VMRule",
            config(
                r#"{metadata: {name: "x", namespace: "y"}, spec: {groups: [{name: "g", rules: [{alert: "a", expr: "e"}]}]}}"#,
            ),
        )
        .unwrap();

    assert!(response
        .yaml
        .contains("apiVersion: operator.victoriametrics.com/v1beta1"));
    assert!(response.yaml.contains("kind: VMRule"));
    assert!(!response.yaml.contains("concurrency"));

    let manifest: Value = serde_yaml::from_str(&response.yaml).unwrap();
    let rule = &manifest["spec"]["groups"][0]["rules"][0];
    assert_eq!(rule["alert"], "a");
    assert_eq!(rule["expr"], "e");
    assert_eq!(rule.as_mapping().unwrap().len(), 2);
}

#[test]
fn test_every_kind_is_stamped() {
    let provider = provider();
    assert_eq!(VALID_CONFIGS.len(), provider.list(None).unwrap().len());

    for (kind, yaml) in VALID_CONFIGS {
        let diagnostics = provider.validate(kind, &config(yaml)).unwrap();
        assert!(diagnostics.is_empty(), "{kind}: {diagnostics}");

        let response = provider.read(kind, config(yaml)).unwrap();
        let manifest: Value = serde_yaml::from_str(&response.yaml).unwrap();
        assert_eq!(manifest["apiVersion"], "operator.victoriametrics.com/v1beta1");
        assert_eq!(manifest["kind"], *kind);
        assert_eq!(manifest["metadata"]["namespace"], "monitoring");
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let provider = provider();
    let input = config(
        r#"
metadata:
  name: alerts
  namespace: monitoring
  labels: {team: sre, app: vm}
  annotations: {owner: sre}
spec:
  groups:
    - name: latency
      interval: 1m
      labels: {severity: page}
      rules:
        - alert: HighLatency
          expr: histogram_quantile(0.99, rate(latency_bucket[5m])) > 1
          labels: {z: "1", a: "2"}
"#,
    );
    let first = provider.read("VMRule", input.clone()).unwrap();
    let second = provider.read("VMRule", input).unwrap();
    assert_eq!(first.yaml, second.yaml);
}

#[test]
fn test_omitted_fields_are_absent() {
    let response = provider()
        .read(
            "VMServiceScrape",
            config("metadata: {name: svc, namespace: monitoring}\nspec: {endpoints: [{port: http}]}"),
        )
        .unwrap();
    let manifest: Value = serde_yaml::from_str(&response.yaml).unwrap();
    assert!(manifest["metadata"].get("labels").is_none());
    assert_eq!(manifest["spec"].as_mapping().unwrap().len(), 1);
    assert_eq!(
        manifest["spec"]["endpoints"][0].as_mapping().unwrap().len(),
        1
    );
    assert!(!response.yaml.contains("{}"));
    assert!(!response.yaml.contains("null"));
}

#[test]
fn test_state_carries_computed_yaml() {
    let response = provider()
        .read("vmnodescrape", config(VALID_CONFIGS[5].1))
        .unwrap();
    assert_eq!(response.state["yaml"], response.yaml.as_str());
    assert_eq!(response.state["spec"]["port"], "metrics");
}

#[test]
fn test_missing_required_is_rejected_before_read() {
    let error = provider()
        .read("VMRule", config("metadata: {namespace: monitoring}\nspec: {groups: []}"))
        .unwrap_err();
    let ProviderError::Diagnostics(diagnostics) = error else {
        panic!("expected diagnostics, got {error}");
    };
    let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();
    assert_eq!(
        summaries,
        vec!["Missing required argument", "Invalid Attribute Value"]
    );
}

#[test]
fn test_computed_attribute_cannot_be_set() {
    let mut input = config(VALID_CONFIGS[0].1);
    input
        .as_mapping_mut()
        .unwrap()
        .insert(Value::from("yaml"), Value::from("kind: Pod"));
    let diagnostics = provider().validate("VMRule", &input).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().summary,
        "Invalid Configuration for Read-Only Attribute"
    );
}

#[test]
fn test_unknown_attributes() {
    let input = config(
        "metadata: {name: svc, namespace: monitoring}\nspec: {endpoints: [{port: http, portt: 80}]}",
    );

    let error = provider().read("VMServiceScrape", input.clone()).unwrap_err();
    assert!(error.to_string().contains("Unsupported argument"));

    let mut config = Config::default();
    config.validation = ValidationOptions {
        allow_unknown_attributes: true,
        ..ValidationOptions::default()
    };
    let lenient = ManifestProvider::new(config).unwrap();
    let diagnostics = lenient.validate("VMServiceScrape", &input).unwrap();
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warnings().count(), 1);

    let response = lenient.read("VMServiceScrape", input).unwrap();
    assert!(!response.yaml.contains("portt"));
}

#[test]
fn test_fail_fast_reports_first_error_only() {
    let input = config("metadata: {name: Bad_Name}\nspec: {groups: [{rules: []}]}");

    let all = provider().validate("VMRule", &input).unwrap();
    assert!(all.errors().count() > 1);

    let mut config = Config::default();
    config.validation.fail_fast = true;
    let diagnostics = ManifestProvider::new(config)
        .unwrap()
        .validate("VMRule", &input)
        .unwrap();
    assert_eq!(diagnostics.errors().count(), 1);
}

#[test]
fn test_type_names_use_provider_prefix() {
    let mut config = Config::default();
    config.provider_type_name = "victoria".to_string();
    let provider = ManifestProvider::new(config).unwrap();
    let names = provider.list(None).unwrap();
    assert!(names.iter().all(|n| n.starts_with("victoria_operator_victoriametrics_com_")));
    assert!(names.contains(&"victoria_operator_victoriametrics_com_vm_scrape_config_v1beta1_manifest".to_string()));

    let schema = provider
        .schema("victoria_operator_victoriametrics_com_vm_probe_v1beta1_manifest")
        .unwrap();
    assert!(schema.lookup("spec.vm_prober_spec.url").unwrap().is_required());
}
