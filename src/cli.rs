use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Auaust - incremental source bundler driven by directive blocks
#[derive(Parser, Debug)]
#[command(name = "auaust")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'auaust' without a command to watch the current project.")]
pub struct Cli {
    /// Workspace root containing PROJECTS/, GLOBALS/ and BUNDLES/
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Project to bundle (overrides CURRENT_PROJECT and auaust.toml)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Index file name inside the project directory
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// Output events as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output: auto, always, never
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows watch bookkeeping)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Build once, then rebuild whenever the index or a fragment changes
    Watch {
        /// Polling interval in milliseconds
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Quiet period before a batch of changes is processed, in milliseconds
        #[arg(long)]
        debounce: Option<u64>,
    },

    /// Build the bundle once and exit
    Build,

    /// Print the parsed structure of the index (debugging)
    Parse,
}
