//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use microsave_core::InvestmentMode;

/// Microsave - Round up every expense and invest the change
#[derive(Parser)]
#[command(name = "microsave")]
#[command(about = "Round-up micro-savings and retirement returns projector", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Projection config override (TOML)
    #[arg(long, env = "MICROSAVE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "MICROSAVE_PORT", default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "MICROSAVE_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Allowed CORS origin (repeatable; any origin if omitted)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },

    /// Attach ceiling and remanent to each expense in a CSV file
    Parse {
        /// CSV file with `date,amount` columns
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Validate the expenses in a CSV file
    Validate {
        /// CSV file with `date,amount` columns
        #[arg(short, long)]
        file: PathBuf,

        /// Monthly wage
        #[arg(short, long, default_value = "50000")]
        wage: f64,
    },

    /// Project retirement returns for a JSON request
    Returns {
        /// JSON file with age, wage, inflation, q, p, k and transactions
        #[arg(short, long)]
        file: PathBuf,

        /// Investment mode: nps or index
        #[arg(short, long, default_value = "nps")]
        mode: InvestmentMode,
    },

    /// Compute income tax, or the NPS tax benefit for a wage and investment
    Tax {
        /// Annual income to compute tax for
        #[arg(long, conflicts_with_all = ["wage", "invested"])]
        income: Option<f64>,

        /// Monthly wage
        #[arg(long, requires = "invested")]
        wage: Option<f64>,

        /// Amount invested in NPS
        #[arg(long, requires = "wage")]
        invested: Option<f64>,
    },
}
