use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod agents;
mod cli;
mod config;
mod error;
mod generator;
mod geo;
mod llm;
mod model;
mod places;
mod progress;
mod retry;
mod routing;
mod scorer;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("wayplan=debug")
    } else {
        EnvFilter::new("wayplan=warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args).await,
        Commands::Parse(args) => cli::parse::execute(args).await,
        Commands::Schema => cli::schema::execute(),
    }
}
