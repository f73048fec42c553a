use k8s_manifests::cli::utils::find_default_config;
use k8s_manifests::{Config, ManifestProvider, OrganizationStrategy, ProviderError};
use std::fs;
use tempfile::TempDir;

const RULES: &str = r#"
type: VMRule
config:
  metadata: {name: alerts, namespace: monitoring}
  spec:
    groups:
      - name: availability
        rules:
          - alert: TargetDown
            expr: up == 0
            for: 5m
---
type: k8s_operator_victoriametrics_com_vm_static_scrape_v1beta1_manifest
config:
  metadata: {name: nodes, namespace: infra}
  spec:
    job_name: node-exporter
    target_endpoints:
      - targets: ["node-1:9100", "node-2:9100"]
"#;

const PROBE: &str = r#"
type: VMProbe
config:
  metadata: {name: blackbox, namespace: monitoring}
  spec:
    module: http_2xx
    vm_prober_spec: {url: "blackbox:9115"}
"#;

const BROKEN: &str = r#"
type: VMPodScrape
config:
  metadata: {name: pods, namespace: monitoring}
  spec: {}
"#;

fn write_requests(dir: &TempDir) {
    fs::write(dir.path().join("rules.yaml"), RULES).unwrap();
    let nested = dir.path().join("probes");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("probe.yml"), PROBE).unwrap();
    fs::write(dir.path().join("README.md"), "not a request").unwrap();
}

#[tokio::test]
async fn test_render_directory_to_stream() {
    let temp_dir = TempDir::new().unwrap();
    write_requests(&temp_dir);

    let provider = ManifestProvider::new(Config::default()).unwrap();
    let result = provider.render_path(temp_dir.path()).await.unwrap();

    assert_eq!(result.files_processed, 2);
    assert_eq!(result.statistics.documents_processed, 3);
    assert_eq!(result.manifests.len(), 3);
    assert!(result.failures.is_empty());

    let kinds: Vec<&str> = result.manifests.iter().map(|m| m.kind.as_str()).collect();
    assert_eq!(kinds, vec!["VMProbe", "VMRule", "VMStaticScrape"]);

    let stream = result.to_stream();
    assert_eq!(stream.matches("---\n").count(), 3);
    assert!(stream.contains("kind: VMStaticScrape"));
    assert!(stream.contains("jobName: node-exporter"));
}

#[tokio::test]
async fn test_write_manifests_by_kind() {
    let temp_dir = TempDir::new().unwrap();
    write_requests(&temp_dir);
    let output_dir = temp_dir.path().join("out");

    let mut config = Config::default();
    config.output.organization = OrganizationStrategy::Kind;
    let provider = ManifestProvider::new(config).unwrap();

    let result = provider
        .render_path(&temp_dir.path().join("rules.yaml"))
        .await
        .unwrap();
    let written = provider
        .write_manifests(&result.manifests, &output_dir)
        .await
        .unwrap();

    assert_eq!(written.files.len(), 2);
    assert!(written.collisions.is_empty());
    let rule = fs::read_to_string(output_dir.join("vmrule").join("monitoring_alerts.yaml")).unwrap();
    assert!(rule.starts_with("apiVersion: operator.victoriametrics.com/v1beta1\nkind: VMRule\n"));
    assert!(output_dir
        .join("vmstaticscrape")
        .join("infra_nodes.yaml")
        .exists());
}

#[tokio::test]
async fn test_render_collects_failures() {
    let temp_dir = TempDir::new().unwrap();
    let requests = temp_dir.path().join("requests.yaml");
    fs::write(&requests, format!("{BROKEN}---\n{PROBE}")).unwrap();

    let provider = ManifestProvider::new(Config::default()).unwrap();
    let result = provider.render_path(&requests).await.unwrap();

    assert_eq!(result.manifests.len(), 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.statistics.error_count, 1);
    let failure = &result.failures[0];
    assert_eq!(failure.document, Some(0));
    assert_eq!(failure.type_name.as_deref(), Some("VMPodScrape"));
    assert!(failure.error.contains("spec.pod_metrics_endpoints"));
}

#[tokio::test]
async fn test_render_fail_fast() {
    let temp_dir = TempDir::new().unwrap();
    let requests = temp_dir.path().join("requests.yaml");
    fs::write(&requests, format!("{BROKEN}---\n{PROBE}")).unwrap();

    let mut config = Config::default();
    config.validation.fail_fast = true;
    let provider = ManifestProvider::new(config).unwrap();
    let error = provider.render_path(&requests).await.unwrap_err();
    assert!(matches!(error, ProviderError::Diagnostics(_)));
}

#[tokio::test]
async fn test_render_unknown_type_is_a_failure() {
    let temp_dir = TempDir::new().unwrap();
    let requests = temp_dir.path().join("requests.yaml");
    fs::write(&requests, "type: VMCluster\nconfig: {}\n").unwrap();

    let provider = ManifestProvider::new(Config::default()).unwrap();
    let result = provider.render_path(&requests).await.unwrap();
    assert!(result.manifests.is_empty());
    assert!(result.failures[0].error.contains("unknown data source: VMCluster"));
}

#[tokio::test]
async fn test_render_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a_good.yaml"), PROBE).unwrap();
    let bad = temp_dir.path().join("b_bad.yaml");
    fs::write(&bad, "type: [unclosed\n").unwrap();
    fs::write(temp_dir.path().join("c_untyped.yaml"), "config: {}\n").unwrap();

    let provider = ManifestProvider::new(Config::default()).unwrap();
    let result = provider.render_path(temp_dir.path()).await.unwrap();
    assert_eq!(result.files_processed, 3);
    assert_eq!(result.manifests.len(), 1);
    assert_eq!(result.manifests[0].kind, "VMProbe");
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.statistics.error_count, 2);

    let failure = &result.failures[0];
    assert_eq!(failure.source, bad);
    assert_eq!(failure.document, None);
    assert_eq!(failure.type_name, None);
    assert!(failure.error.contains("invalid YAML"));
    assert!(result.failures[1].source.ends_with("c_untyped.yaml"));

    let mut config = Config::default();
    config.validation.fail_fast = true;
    let provider = ManifestProvider::new(config).unwrap();
    let error = provider.render_path(temp_dir.path()).await.unwrap_err();
    assert!(matches!(error, ProviderError::Yaml { .. }));
}

#[tokio::test]
async fn test_write_manifests_reports_collisions() {
    let temp_dir = TempDir::new().unwrap();
    let requests = temp_dir.path().join("requests.yaml");
    let second = PROBE.replace("module: http_2xx", "module: tcp_connect");
    fs::write(&requests, format!("{PROBE}---\n{second}")).unwrap();
    let output_dir = temp_dir.path().join("out");

    let provider = ManifestProvider::new(Config::default()).unwrap();
    let result = provider.render_path(&requests).await.unwrap();
    assert_eq!(result.manifests.len(), 2);

    let written = provider
        .write_manifests(&result.manifests, &output_dir)
        .await
        .unwrap();
    let path = output_dir.join("monitoring_vmprobe_blackbox.yaml");
    assert_eq!(written.files, vec![path.clone()]);
    assert_eq!(written.collisions, vec![path.clone()]);
    assert!(fs::read_to_string(path).unwrap().contains("module: tcp_connect"));
}

#[test]
fn test_default_config_lookup() {
    let temp_dir = TempDir::new().unwrap();

    let mut config = Config::default();
    config.provider_type_name = "vm".to_string();
    let path = temp_dir.path().join("k8s-manifests.yml");
    config.save_to_file(&path).unwrap();

    let found = find_default_config(temp_dir.path()).unwrap();
    assert_eq!(found, path);
    assert_eq!(Config::from_file(&found).unwrap().provider_type_name, "vm");

    let hidden = temp_dir.path().join(".k8s-manifests.yaml");
    Config::default().save_to_file(&hidden).unwrap();
    assert_eq!(find_default_config(temp_dir.path()).unwrap(), hidden);
}
