//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("k8s-manifests")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Render VictoriaMetrics operator manifests from validated configuration")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::list::command())
            .subcommand(commands::schema::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::read::command())
            .subcommand(commands::render::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("list", sub_matches)) => commands::list::run(sub_matches).await,
            Some(("schema", sub_matches)) => commands::schema::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("read", sub_matches)) => commands::read::run(sub_matches).await,
            Some(("render", sub_matches)) => commands::render::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{Context, Result};
    use serde_yaml::Value;
    use std::path::{Path, PathBuf};
    use tracing::debug;

    /// Default configuration file names, searched in the working directory
    pub const DEFAULT_CONFIG_FILES: &[&str] = &[
        ".k8s-manifests.yaml",
        ".k8s-manifests.yml",
        "k8s-manifests.yaml",
        "k8s-manifests.yml",
    ];

    /// The `--config` argument shared by every command
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Get configuration file path from arguments or look for a default one
    pub fn get_config_path(matches: &clap::ArgMatches) -> Option<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Some(PathBuf::from(config_path));
        }
        find_default_config(Path::new("."))
    }

    /// Look for a default config file in `dir`, then in the user config directory
    pub fn find_default_config(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .chain(crate::utils::get_config_dir().map(|d| d.join("config.yaml")))
            .find(|path| path.exists())
    }

    /// Load configuration from file, or defaults when there is none
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches) {
            Some(config_path) => {
                debug!("Loading configuration from {:?}", config_path);
                crate::Config::from_file(&config_path)
                    .with_context(|| format!("Failed to load configuration from {config_path:?}"))
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create ManifestProvider instance
    pub fn create_provider(config: crate::Config) -> Result<crate::ManifestProvider> {
        Ok(crate::ManifestProvider::new(config)?)
    }

    /// Read a data source configuration document
    pub async fn read_input(path: &str) -> Result<Value> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {path}"))?;
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {path}"))
    }
}
