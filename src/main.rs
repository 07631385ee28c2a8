//! Auaust CLI - incremental source bundler
//!
//! Usage: auaust [COMMAND]
//!
//! Commands:
//!   watch   Build once, then rebuild on every change (default)
//!   build   Build the bundle once and exit
//!   parse   Print the parsed structure of the index

mod cli;
mod commands;
mod ui;

use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        None => commands::watch::cmd_watch(&cli, None, None),
        Some(Commands::Watch {
            poll_interval,
            debounce,
        }) => commands::watch::cmd_watch(&cli, *poll_interval, *debounce),
        Some(Commands::Build) => commands::build::cmd_build(&cli),
        Some(Commands::Parse) => commands::parse::cmd_parse(&cli),
    };

    if let Err(err) = result {
        if !commands::is_reported(&err) {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}
