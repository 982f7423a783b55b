//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `serve` - Web server command
//! - `transactions` - CSV parse and validate commands
//! - `returns` - Returns projection command
//! - `tax` - Tax and NPS benefit command

pub mod returns;
pub mod serve;
pub mod tax;
pub mod transactions;

// Re-export command functions for main.rs
pub use returns::*;
pub use serve::*;
pub use tax::*;
pub use transactions::*;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use microsave_core::ProjectionConfig;

/// Load the projection config, applying an optional override file
pub fn load_config(path: Option<&Path>) -> Result<ProjectionConfig> {
    match path {
        Some(p) => ProjectionConfig::load(Some(p))
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => ProjectionConfig::load(None).context("Failed to load embedded config"),
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
