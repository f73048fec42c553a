//! Validate command implementation

use crate::cli::utils;
use anyhow::{bail, Result};
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate data source configuration")
        .arg(
            clap::Arg::new("type")
                .help("Data source type name or kind")
                .value_name("TYPE")
                .required(true),
        )
        .arg(
            clap::Arg::new("input")
                .short('i')
                .long("input")
                .help("Configuration file of the data source")
                .value_name("FILE")
                .required(true),
        )
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("fail-fast")
                .long("fail-fast")
                .help("Stop on first error")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = utils::load_config(matches)?;
    if matches.get_flag("fail-fast") {
        config.validation.fail_fast = true;
    }
    let provider = utils::create_provider(config)?;

    let type_name = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or_default();
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or_default();

    info!("Validating {} configuration from {}", type_name, input);
    let value = utils::read_input(input).await?;
    let diagnostics = provider.validate(type_name, &value)?;

    for diagnostic in &diagnostics {
        if diagnostic.is_error() {
            eprintln!("{diagnostic}");
        } else {
            println!("{diagnostic}");
        }
    }

    let errors = diagnostics.errors().count();
    if errors > 0 {
        bail!("Configuration has {errors} error(s)");
    }

    println!("Configuration is valid!");
    Ok(())
}
