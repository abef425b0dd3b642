//! attendlog library root.
//! Exposes the CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod parser;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli) -> AppResult<()> {
    match &cli.command {
        Commands::Inspect { .. } => cli::commands::inspect::handle(&cli.command),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    dispatch(&cli)
}
