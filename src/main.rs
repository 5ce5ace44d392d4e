//! ppworker - Android launcher icon generator and project patcher.

mod cli;
mod config;
mod icon;
mod logger;
mod patch;
mod pipeline;
mod resource;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::WorkerConfig;
use pipeline::RunOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = WorkerConfig::load(&cli)?;

    let report = match &cli.command {
        Commands::Run { args } => {
            let options = RunOptions {
                keep_output: args.keep_output,
            };
            pipeline::run(&config, options)?
        }
        Commands::Icons => pipeline::run_icons(&config)?,
        Commands::Patch => pipeline::run_patches(&config),
    };
    report.print_summary();
    Ok(())
}
