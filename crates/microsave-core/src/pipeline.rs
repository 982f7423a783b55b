//! End-to-end pipelines
//!
//! ```text
//! raw ──enrich──► enriched ──validate──► valid ──Q/P/K──► filtered ──project──► returns
//!                                  │                 │
//!                                  └──── invalid ◄───┘
//! ```
//!
//! Rejected transactions never contribute to a projection.

use crate::ceiling::enrich_all;
use crate::config::ProjectionConfig;
use crate::error::{Error, Result};
use crate::models::{FilterRequest, FilterResult, InvestmentMode, ReturnProjection, ReturnsRequest};
use crate::period::check_all;
use crate::returns::{ProjectionParams, Projector};
use crate::rules::apply_rules;
use crate::validate::validate_transactions;

/// Enrich, validate and apply the period rules to raw transactions.
///
/// Validation rejections come first in `invalid`, followed by transactions
/// that fell outside every K period.
pub fn filter_transactions(request: &FilterRequest) -> Result<FilterResult> {
    check_wage(request.wage)?;

    let enriched = enrich_all(&request.transactions);
    let validated = validate_transactions(&enriched, request.wage);
    let ruled = apply_rules(&validated.valid, &request.q, &request.p, &request.k)?;

    let mut invalid = validated.invalid;
    invalid.extend(ruled.invalid);

    Ok(FilterResult {
        valid: ruled.valid,
        invalid,
    })
}

/// Check the request-level preconditions for a projection
pub fn check_returns_request(request: &ReturnsRequest, config: &ProjectionConfig) -> Result<()> {
    if request.age < config.min_age {
        return Err(Error::InvalidInput(format!(
            "Age must be at least {}",
            config.min_age
        )));
    }
    if request.age >= config.retirement_age {
        return Err(Error::InvalidInput(format!(
            "Age must be less than {} (retirement age)",
            config.retirement_age
        )));
    }
    check_wage(request.wage)?;
    if request.k.is_empty() {
        return Err(Error::InvalidInput(
            "At least one K period is required".to_string(),
        ));
    }
    if let Some(inflation) = request.inflation {
        if !inflation.is_finite() || inflation <= -100.0 {
            return Err(Error::InvalidInput(format!(
                "Inflation must be above -100% (got {})",
                inflation
            )));
        }
    }

    check_all(&request.q)?;
    check_all(&request.p)?;
    check_all(&request.k)
}

/// Run the full pipeline and project returns for one investment mode
pub fn compute_returns(
    request: &ReturnsRequest,
    mode: InvestmentMode,
    config: &ProjectionConfig,
) -> Result<ReturnProjection> {
    check_returns_request(request, config)?;

    let filtered = filter_transactions(&FilterRequest {
        wage: request.wage,
        q: request.q.clone(),
        p: request.p.clone(),
        k: request.k.clone(),
        transactions: request.transactions.clone(),
    })?;

    if !filtered.invalid.is_empty() {
        tracing::debug!(
            mode = %mode,
            rejected = filtered.invalid.len(),
            "Excluded rejected transactions from projection"
        );
    }

    let inflation = request.inflation.unwrap_or(config.default_inflation);
    let params = ProjectionParams::for_mode(config, mode, request.age, request.wage, inflation);

    Projector::new(config).project(&filtered.valid, &request.k, &params)
}

/// Wages must be positive and finite
pub fn check_wage(wage: f64) -> Result<()> {
    if !wage.is_finite() || wage <= 0.0 {
        return Err(Error::InvalidInput("Wage must be positive".to_string()));
    }
    Ok(())
}
