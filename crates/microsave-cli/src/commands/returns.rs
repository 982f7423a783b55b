//! Returns projection command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use microsave_core::{compute_returns, InvestmentMode, ReturnProjection, ReturnsRequest};

use super::{load_config, print_json};

/// Load a JSON returns request and run the full pipeline
pub fn run_returns(
    config_path: Option<&Path>,
    file: &Path,
    mode: InvestmentMode,
) -> Result<ReturnProjection> {
    let config = load_config(config_path)?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read request file {}", file.display()))?;
    let request: ReturnsRequest = serde_json::from_str(&content)
        .with_context(|| format!("Invalid returns request in {}", file.display()))?;

    let projection = compute_returns(&request, mode, &config)?;
    Ok(projection)
}

pub fn cmd_returns(config_path: Option<&Path>, file: &Path, mode: InvestmentMode) -> Result<()> {
    let projection = run_returns(config_path, file, mode)?;

    info!(
        mode = %mode,
        windows = projection.savings_by_dates.len(),
        "Projected returns"
    );

    print_json(&projection)
}
