//! Error types for Microsave
//!
//! Business-rule rejections (negative amounts, duplicates, out-of-window
//! transactions) are never errors; they are reported as
//! [`InvalidRecord`](crate::models::InvalidRecord) entries. The variants here
//! cover structural and configuration problems only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid timestamp '{0}': expected format YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input (as opposed to an
    /// I/O or environment failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestamp(_)
                | Self::InvalidPeriod { .. }
                | Self::InvalidInput(_)
                | Self::Import(_)
                | Self::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
