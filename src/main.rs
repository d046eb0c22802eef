//! Terraforge - batch build pipeline for terrain map assets.

#![allow(dead_code)]

mod catalog;
mod cli;
mod job;
mod layout;
mod logger;
mod manifest;
mod runner;
mod terrain;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use terrain::PixelGenerator;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let root = std::env::current_dir()?;
    let stats = runner::run(catalog::DEFAULT_CATALOG, &PixelGenerator, &root)?;

    log!("build"; "{} maps, {} test maps generated", stats.maps, stats.test_maps);
    Ok(())
}
