//! List command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("list")
        .about("List data source type names")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("filter")
                .short('f')
                .long("filter")
                .help("Only list type names matching a glob pattern")
                .value_name("GLOB"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let provider = utils::create_provider(utils::load_config(matches)?)?;
    let filter = matches.get_one::<String>("filter").map(String::as_str);

    for type_name in provider.list(filter)? {
        let kind = provider
            .registry()
            .get(&type_name)
            .map(|data_source| data_source.kind())
            .unwrap_or_default();
        println!("{type_name}\t{kind}");
    }

    Ok(())
}
