//! Transcript CLI - render conversation messages to safe HTML.
//!
//! Provides commands for:
//! - `render`: Render a message file (or stdin) to an HTML fragment
//! - `blocks`: List the fenced code blocks in a message

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BlocksArgs, RenderArgs};
use output::Output;

/// Transcript - safe HTML rendering for conversation transcripts.
#[derive(Parser)]
#[command(name = "transcript", version, about)]
struct Cli {
    /// Enable debug logging (otherwise controlled by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a message to an HTML fragment.
    Render(RenderArgs),
    /// List fenced code blocks in a message.
    Blocks(BlocksArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Logs go to stderr so stdout stays a clean HTML fragment.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Blocks(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
