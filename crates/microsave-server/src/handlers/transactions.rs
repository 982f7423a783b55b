//! Transaction handlers: enrichment, validation and Q/P/K filtering

use axum::Json;

use crate::AppError;
use microsave_core::{
    check_wage, enrich_all, filter_transactions, validate_transactions, EnrichedTransaction,
    FilterRequest, FilterResult, RawTransaction, ValidationResult, ValidatorRequest,
};

/// POST /api/transactions/parse - Attach ceiling and remanent
pub async fn parse_transactions(
    Json(transactions): Json<Vec<RawTransaction>>,
) -> Json<Vec<EnrichedTransaction>> {
    Json(enrich_all(&transactions))
}

/// POST /api/transactions/validator - Split into valid and invalid
pub async fn validate(
    Json(request): Json<ValidatorRequest>,
) -> Result<Json<ValidationResult>, AppError> {
    check_wage(request.wage)?;
    Ok(Json(validate_transactions(
        &request.transactions,
        request.wage,
    )))
}

/// POST /api/transactions/filter - Enrich, validate and apply Q/P/K rules
pub async fn filter(Json(request): Json<FilterRequest>) -> Result<Json<FilterResult>, AppError> {
    let result = filter_transactions(&request)?;
    Ok(Json(result))
}
