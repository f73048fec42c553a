//! Render command implementation

use crate::cli::utils;
use crate::ManifestProvider;
use anyhow::{bail, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("render")
        .about("Render manifests from request files ({type, config} documents)")
        .arg(
            clap::Arg::new("input")
                .short('i')
                .long("input")
                .help("Request file or directory of request files")
                .value_name("PATH")
                .required(true),
        )
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Write one file per manifest under this directory instead of stdout")
                .value_name("DIR"),
        )
        .arg(
            clap::Arg::new("write")
                .short('w')
                .long("write")
                .help("Write one file per manifest under the configured output directory")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Don't write files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("fail-fast")
                .long("fail-fast")
                .help("Stop on first error")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Directory manifests are written to, or `None` for a single stream on stdout
fn output_directory(matches: &ArgMatches, provider: &ManifestProvider) -> Result<Option<PathBuf>> {
    if let Some(dir) = matches.get_one::<String>("output") {
        return Ok(Some(PathBuf::from(dir)));
    }
    if matches.get_flag("write") {
        return Ok(Some(provider.config().output.resolved_directory()?));
    }
    Ok(None)
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = utils::load_config(matches)?;

    // Override fail_fast setting if specified
    if matches.get_flag("fail-fast") {
        config.validation.fail_fast = true;
    }

    let dry_run = matches.get_flag("dry-run");

    let provider = utils::create_provider(config)?;
    let output_dir = output_directory(matches, &provider)?;
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();

    let result = provider.render_path(&input).await?;

    for failure in &result.failures {
        eprintln!("Error: {failure}");
    }

    if dry_run {
        info!("Dry run mode - no files will be written");
        println!("Dry run mode - no files will be written");
        println!("Files processed: {}", result.files_processed);
        match &output_dir {
            Some(output_dir) => {
                println!(
                    "Manifests that would be written: {}",
                    result.statistics.manifests_rendered
                );
                for manifest in &result.manifests {
                    let path = provider.manifest_path(manifest, output_dir);
                    println!("  {} -> {}", manifest.type_name, path.display());
                }
            }
            None => {
                println!(
                    "Manifests that would be printed to stdout: {}",
                    result.statistics.manifests_rendered
                );
                for manifest in &result.manifests {
                    println!(
                        "  {} -> {}/{}",
                        manifest.type_name,
                        manifest.namespace.as_deref().unwrap_or("cluster"),
                        manifest.name
                    );
                }
            }
        }
    } else if let Some(output_dir) = output_dir {
        let written = provider.write_manifests(&result.manifests, &output_dir).await?;
        for path in &written.collisions {
            eprintln!("Warning: {} was written by more than one manifest", path.display());
        }
        if result.failures.is_empty() {
            println!("Render completed successfully!");
        }
        println!("Files processed: {}", result.files_processed);
        println!("Manifests written: {}", written.files.len());
        println!(
            "Processing time: {}ms",
            result.statistics.total_processing_time_ms
        );
    } else {
        print!("{}", result.to_stream());
    }

    if !result.failures.is_empty() {
        bail!(
            "{} render failure(s) in {} document(s)",
            result.failures.len(),
            result.statistics.documents_processed
        );
    }

    Ok(())
}
