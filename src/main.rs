//! k8s-manifests CLI binary

use anyhow::Result;

use k8s_manifests::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, rendered manifests to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "k8s_manifests=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let matches = CliApp::app().get_matches();

    // Run the CLI application
    CliApp::run(&matches).await
}
