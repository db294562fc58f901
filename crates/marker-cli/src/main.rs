//! Highlight Marker CLI
//!
//! Applies the highlight tool to markup from the command line.

mod cli;
mod commands;
mod error;
mod logging;
mod session;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use marker_core::{MarkerConfig, Palette};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;

    match cli.command {
        Some(cmd) => {
            let palette = load_palette(cli.config.as_deref())?;
            execute_command(cmd, &palette)
        }
        None => {
            println!("{} Highlight Marker CLI", "marker".green().bold());
            println!();
            println!("Run {} for available commands.", "marker --help".cyan());
            Ok(())
        }
    }
}

fn load_palette(config: Option<&Path>) -> Result<Palette> {
    let config = match config {
        Some(path) => MarkerConfig::load(path)?,
        None => MarkerConfig::default(),
    };
    Ok(config.palette()?)
}

fn execute_command(cmd: Commands, palette: &Palette) -> Result<()> {
    match cmd {
        Commands::Highlight { target, color } => {
            commands::run_highlight(palette, &target, color.as_deref())
        }
        Commands::Clear { target } => commands::run_clear(palette, &target),
        Commands::Recolor { target, color } => commands::run_recolor(palette, &target, &color),
        Commands::Palette { json } => commands::run_palette(palette, json),
        Commands::Run { script, trace } => commands::run_script(palette, &script, trace),
    }
}
