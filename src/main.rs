use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use thumbsweep::{Cli, FolderProcessor};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let processor = FolderProcessor::new(cli.to_config()).context("Invalid configuration")?;
    let report = processor
        .run(&cli.folder)
        .with_context(|| format!("Cannot process {}", cli.folder.display()))?;

    println!("Summary: {}", report);

    for failure in &report.failures {
        println!("  [{}] {}: {}", failure.stage, failure.subject, failure.message);
    }

    Ok(())
}
