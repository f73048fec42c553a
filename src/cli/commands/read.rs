//! Read command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("read")
        .about("Render the manifest of a single data source configuration")
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
            clap::Arg::new("state")
                .long("state")
                .help("Print the full state, including the computed yaml attribute")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let provider = utils::create_provider(utils::load_config(matches)?)?;

    let type_name = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or_default();
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or_default();

    info!("Reading {} from {}", type_name, input);
    let value = utils::read_input(input).await?;
    let response = provider.read(type_name, value)?;

    if matches.get_flag("state") {
        print!("{}", serde_yaml::to_string(&response.state)?);
    } else {
        print!("{}", response.yaml);
    }

    Ok(())
}
