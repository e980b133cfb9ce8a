mod cursor;
mod request;

use anyhow::Context;
use clap::{Parser, Subcommand};
use codenav_core::Config;
use codenav_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "codenav",
    version,
    about = "Inspect code navigation cursors and requests",
    long_about = "Tooling around the reference pagination protocol: decodes and builds the opaque \
                  cursor tokens handed to clients, prints their schema and shows how a request's \
                  query string is interpreted."
)]
pub struct Cli {
    /// JSON configuration file; environment overrides still apply
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with reference pagination cursors
    Cursor {
        #[command(subcommand)]
        command: cursor::CursorCommand,
    },
    /// Show how a reference request query string is parsed
    #[command(
        long_about = "Parses a query string such as `path=main.go&line=10&character=5&uploadId=42` \
                            the way the references endpoint does. A `cursor` parameter is decoded \
                            and printed in place of the position fields it overrides."
    )]
    Request {
        /// Raw query string, with or without the leading `?`
        #[arg(value_name = "QUERY")]
        query: String,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
            .with_env_overrides(|key| std::env::var(key).ok()),
        None => Config::from_env(),
    };
    let _guard = init_logging("cli", cli.verbose, &config.logging);
    tracing::debug!(?config, "loaded configuration");

    let output = match cli.command {
        Commands::Cursor { command } => cursor::run(command)?,
        Commands::Request { query } => request::run(&query)?,
    };
    println!("{output}");
    Ok(())
}
