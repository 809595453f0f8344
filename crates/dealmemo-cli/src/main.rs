//! dealmemo CLI - command-line interface for the deal memo analysis pipeline
//!
//! Turns a founder's pitch materials into a structured, scored deal memo.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod fixtures;
mod output;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.trace);

    // Run the CLI
    cli.run()
}

fn init_tracing(verbose: bool, trace: bool) {
    if trace {
        dealmemo_observe::init_tracing();
        return;
    }

    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
