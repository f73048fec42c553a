//! Init command implementation

use crate::Config;
use anyhow::{bail, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".k8s-manifests.yaml"),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing configuration file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".k8s-manifests.yaml"));

    if output_path.exists() && !matches.get_flag("force") {
        bail!(
            "Configuration file {:?} already exists. Use --force to overwrite it",
            output_path
        );
    }

    info!("Initializing configuration file: {:?}", output_path);

    Config::default().save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);
    println!("Configuration file created: {}", output_path.display());
    println!("Edit the file to change the provider type name, validation and output settings.");

    Ok(())
}
