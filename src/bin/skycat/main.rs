//! skycat: star and deep-sky catalog conversion CLI
//!
//! Turns the BSC5 binary catalog (with its notes and names) and the NGC 2000.0
//! fixed-width catalog into JSON documents.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

use skycat::{
    bsc5::{run_bsc5, Bsc5Variant},
    emit::ConversionSummary,
    env_state::CatalogPaths,
    ngc::run_ngc,
};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn report(summary: &ConversionSummary) {
    println!(
        "Converted {} entries to {} ({:.1} KB)",
        summary.entries,
        summary.output,
        summary.bytes_written as f64 / 1024.0
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let env_paths = CatalogPaths::from_env();

    let summary = match cli.command {
        Commands::Bsc5Notes(args) => {
            let config = args.into_config(Bsc5Variant::NotesAware, &env_paths);
            run_bsc5(&config)
                .with_context(|| format!("BSC5 conversion of {} failed", config.catalog))?
        }
        Commands::Bsc5(args) => {
            let config = args.into_config(Bsc5Variant::MetadataRich, &env_paths);
            run_bsc5(&config)
                .with_context(|| format!("BSC5 conversion of {} failed", config.catalog))?
        }
        Commands::Ngc(args) => {
            let config = args.into_config(&env_paths);
            run_ngc(&config)
                .with_context(|| format!("NGC conversion of {} failed", config.input))?
        }
    };

    report(&summary);
    Ok(())
}
