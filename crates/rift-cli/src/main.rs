//! CLI frontend for the Rift text-adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Content played when no directory is given.
const DEFAULT_CONTENT: &str = "content/void_station";

#[derive(Parser)]
#[command(
    name = "rift",
    about = "Rift: play and inspect data-driven text adventures",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an adventure interactively
    Play {
        /// Content directory
        #[arg(short, long, default_value = DEFAULT_CONTENT)]
        dir: PathBuf,

        /// File used by SAVE and LOAD
        #[arg(long)]
        save: Option<PathBuf>,

        /// Log rule and timer activity to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a content directory and report every problem
    Check {
        /// Content directory
        #[arg(short, long, default_value = DEFAULT_CONTENT)]
        dir: PathBuf,
    },

    /// List every word the parser understands
    Words {
        /// Content directory
        #[arg(short, long, default_value = DEFAULT_CONTENT)]
        dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Play { verbose: true, .. });
    init_logging(verbose);

    let result = match cli.command {
        Commands::Play { dir, save, .. } => commands::play::run(&dir, save),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Words { dir } => commands::words::run(&dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
