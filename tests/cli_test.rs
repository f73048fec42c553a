use k8s_manifests::Config;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

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

const RULE: &str = "metadata: {name: alerts, namespace: monitoring}\nspec: {groups: [{name: g, rules: [{alert: Down, expr: up == 0}]}]}\n";

/// Workspace with a config file whose output directory is `<tmp>/configured`
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.directory = dir.path().join("configured");
        let config_path = dir.path().join("k8s-manifests.yaml");
        config.save_to_file(&config_path).unwrap();
        Self {
            dir,
            config: config_path,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_k8s-manifests"))
            .args(args)
            .arg("--config")
            .arg(&self.config)
            .current_dir(self.dir.path())
            .env("RUST_LOG", "off")
            .output()
            .expect("Failed to execute command")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_render_to_stdout() {
    let workspace = Workspace::new();
    let input = workspace.write("requests.yaml", PROBE);

    let output = workspace.run(&["render", "--input", arg(&input)]);

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.starts_with("---\napiVersion: operator.victoriametrics.com/v1beta1\nkind: VMProbe\n"));
    assert!(!workspace.path("configured").exists());
}

#[test]
fn test_render_fails_when_a_document_fails() {
    let workspace = Workspace::new();
    let input = workspace.write("requests.yaml", &format!("{BROKEN}---\n{PROBE}"));

    let output = workspace.run(&["render", "--input", arg(&input)]);

    assert!(!output.status.success());
    let errors = stderr(&output);
    assert!(errors.contains("(document 0, VMPodScrape)"));
    assert!(errors.contains("1 render failure(s) in 2 document(s)"));
    assert!(stdout(&output).contains("kind: VMProbe"));
}

#[test]
fn test_render_dry_run_without_output_reports_stdout() {
    let workspace = Workspace::new();
    let input = workspace.write("requests.yaml", PROBE);

    let output = workspace.run(&["render", "--input", arg(&input), "--dry-run"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Manifests that would be printed to stdout: 1"));
    assert!(stdout.contains(
        "k8s_operator_victoriametrics_com_vm_probe_v1beta1_manifest -> monitoring/blackbox"
    ));
    assert!(!stdout.contains("apiVersion"));
    assert!(!workspace.path("configured").exists());
}

#[test]
fn test_render_dry_run_matches_written_files() {
    let workspace = Workspace::new();
    let input = workspace.write("requests.yaml", PROBE);
    let output_dir = workspace.path("out");
    let expected = output_dir.join("monitoring_vmprobe_blackbox.yaml");

    let dry_run = workspace.run(&[
        "render",
        "--input",
        arg(&input),
        "--output",
        arg(&output_dir),
        "--dry-run",
    ]);
    assert!(dry_run.status.success(), "{}", stderr(&dry_run));
    assert!(stdout(&dry_run).contains(&format!("-> {}", expected.display())));
    assert!(!output_dir.exists());

    let real = workspace.run(&["render", "--input", arg(&input), "--output", arg(&output_dir)]);
    assert!(real.status.success(), "{}", stderr(&real));
    assert!(stdout(&real).contains("Manifests written: 1"));
    assert!(fs::read_to_string(&expected)
        .unwrap()
        .contains("kind: VMProbe"));
}

#[test]
fn test_render_write_uses_configured_directory() {
    let workspace = Workspace::new();
    let input = workspace.write("requests.yaml", PROBE);
    let expected = workspace
        .path("configured")
        .join("monitoring_vmprobe_blackbox.yaml");

    let dry_run = workspace.run(&["render", "--input", arg(&input), "--write", "--dry-run"]);
    assert!(dry_run.status.success(), "{}", stderr(&dry_run));
    assert!(stdout(&dry_run).contains(&format!("-> {}", expected.display())));
    assert!(!expected.exists());

    let real = workspace.run(&["render", "--input", arg(&input), "--write"]);
    assert!(real.status.success(), "{}", stderr(&real));
    assert!(expected.exists());
}

#[test]
fn test_read_state_includes_yaml() {
    let workspace = Workspace::new();
    let input = workspace.write("rule.yaml", RULE);

    let output = workspace.run(&["read", "VMRule", "--input", arg(&input), "--state"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let state: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(state["metadata"]["name"], "alerts");
    let yaml = state["yaml"].as_str().unwrap();
    assert!(yaml.contains("kind: VMRule"));
    assert!(yaml.contains("alert: Down"));

    let plain = workspace.run(&["read", "VMRule", "--input", arg(&input)]);
    assert!(stdout(&plain).starts_with("apiVersion: operator.victoriametrics.com/v1beta1\n"));
}

#[test]
fn test_validate_reports_errors() {
    let workspace = Workspace::new();
    let invalid = workspace.write("invalid.yaml", "metadata: {namespace: monitoring}\nspec: {groups: []}\n");
    let valid = workspace.write("valid.yaml", RULE);

    let output = workspace.run(&["validate", "VMRule", "--input", arg(&invalid)]);
    assert!(!output.status.success());
    let errors = stderr(&output);
    assert!(errors.contains("Missing required argument (at metadata.name)"));
    assert!(errors.contains("Configuration has 2 error(s)"));

    let fail_fast = workspace.run(&["validate", "VMRule", "--input", arg(&invalid), "--fail-fast"]);
    assert!(!fail_fast.status.success());
    assert!(stderr(&fail_fast).contains("Configuration has 1 error(s)"));

    let output = workspace.run(&["validate", "VMRule", "--input", arg(&valid)]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Configuration is valid!"));
}
