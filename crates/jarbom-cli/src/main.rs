//! jarbom - build a Maven BOM from a directory or tarball of jars

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jarbom_cli::cmd;
use jarbom_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract(args) => cmd::extract::extract(args, cli.quiet).await,
        Commands::Hash { files } => cmd::hash::hash(&files),
    }
}
