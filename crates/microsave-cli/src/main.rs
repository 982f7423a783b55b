//! Microsave CLI - Round-up micro-savings projector
//!
//! Usage:
//!   microsave serve --port 8000                Start web server
//!   microsave parse --file expenses.csv        Show ceilings and remanents
//!   microsave validate --file expenses.csv     Split valid and invalid expenses
//!   microsave returns --file req.json -m nps   Project retirement returns
//!   microsave tax --income 1200000             Compute income tax

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::cmd_serve(config, &host, port, allowed_origins).await,
        Commands::Parse { file } => commands::cmd_parse(&file),
        Commands::Validate { file, wage } => commands::cmd_validate(&file, wage),
        Commands::Returns { file, mode } => commands::cmd_returns(config, &file, mode),
        Commands::Tax {
            income,
            wage,
            invested,
        } => commands::cmd_tax(config, income, wage, invested),
    }
}
