//! aggregate - Bundle the scripts and stylesheets referenced by page
//! templates into content-addressed cache files.

#![allow(dead_code)]

mod asset;
mod cache;
mod cli;
mod compiler;
mod config;
mod logger;
mod node;
mod page;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::AggregateConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // render/key print their result on stdout
    logger::log_to_stderr(!cli.is_build());

    let config = AggregateConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_pages(&config, false).map(|_| ()),
        Commands::Render { path, .. } => cli::render::render_file(&config, path),
        Commands::Key { path, kind, .. } => cli::key::print_key(&config, *kind, path),
    }
}
