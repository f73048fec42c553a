//! Schema command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("schema")
        .about("Print the schema table of a data source")
        .arg(
            clap::Arg::new("type")
                .help("Data source type name or kind")
                .value_name("TYPE")
                .required(true),
        )
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["yaml", "json"])
                .default_value("yaml"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let provider = utils::create_provider(utils::load_config(matches)?)?;
    let type_name = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or_default();
    let schema = provider.schema(type_name)?;

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&schema)?),
        _ => print!("{}", serde_yaml::to_string(&schema)?),
    }

    Ok(())
}
