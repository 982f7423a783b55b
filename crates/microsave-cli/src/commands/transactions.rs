//! Transaction commands: parse and validate CSV expenses

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use microsave_core::{
    check_wage, enrich_all, read_transactions_csv, validate_transactions, EnrichedTransaction,
    ValidationResult,
};

use super::print_json;

/// Read a CSV file and attach ceiling and remanent to every row
pub fn load_enriched(file: &Path) -> Result<Vec<EnrichedTransaction>> {
    let raw = read_transactions_csv(file)
        .with_context(|| format!("Failed to read transactions from {}", file.display()))?;
    Ok(enrich_all(&raw))
}

/// Read, enrich and validate a CSV file
pub fn run_validate(file: &Path, wage: f64) -> Result<ValidationResult> {
    check_wage(wage)?;
    let enriched = load_enriched(file)?;
    Ok(validate_transactions(&enriched, wage))
}

pub fn cmd_parse(file: &Path) -> Result<()> {
    let enriched = load_enriched(file)?;

    let total: f64 = enriched.iter().map(|t| t.remanent).sum();
    info!(
        count = enriched.len(),
        remanent = microsave_core::round2(total),
        "Parsed {}",
        file.display()
    );

    print_json(&enriched)
}

pub fn cmd_validate(file: &Path, wage: f64) -> Result<()> {
    let result = run_validate(file, wage)?;

    info!(
        valid = result.valid.len(),
        invalid = result.invalid.len(),
        "Validated {}",
        file.display()
    );

    print_json(&result)
}
