//! Transaction validation
//!
//! Splits a batch of enriched transactions into valid and invalid sets.
//! Checks run in a fixed order and the first failing check decides the reason:
//!
//! 1. Negative amount
//! 2. Duplicate timestamp (every copy is rejected, not only the later ones)
//! 3. Amount at or above the limit
//! 4. Supplied ceiling does not match the recomputed one

use std::collections::HashMap;

use crate::ceiling::compute_ceiling;
use crate::models::{EnrichedTransaction, InvalidRecord, ValidationResult};
use crate::period::Timestamp;

/// Transactions at or above this amount are rejected
pub const AMOUNT_LIMIT: f64 = 500_000.0;

/// Allowed drift between supplied and recomputed ceilings
pub const CEILING_TOLERANCE: f64 = 0.01;

pub const REASON_NEGATIVE: &str = "Amount cannot be negative";
pub const REASON_DUPLICATE: &str = "Duplicate transaction";
pub const REASON_OVER_LIMIT: &str = "Amount exceeds limit";

/// Validate a batch of enriched transactions.
///
/// `wage` is the caller's monthly wage; it does not affect any check.
pub fn validate_transactions(
    transactions: &[EnrichedTransaction],
    wage: f64,
) -> ValidationResult {
    let occurrences = count_timestamps(transactions);
    let mut result = ValidationResult::default();

    for tx in transactions {
        match check(tx, &occurrences) {
            Some(reason) => result
                .invalid
                .push(InvalidRecord::new(tx.date, tx.amount, reason)),
            None => result.valid.push(tx.clone()),
        }
    }

    tracing::debug!(
        wage,
        valid = result.valid.len(),
        invalid = result.invalid.len(),
        "Validated transactions"
    );

    result
}

/// Pre-scan: how many times each timestamp appears in the batch
fn count_timestamps(transactions: &[EnrichedTransaction]) -> HashMap<Timestamp, usize> {
    let mut counts = HashMap::with_capacity(transactions.len());
    for tx in transactions {
        *counts.entry(tx.date).or_insert(0) += 1;
    }
    counts
}

/// Returns the rejection reason, or `None` if the transaction passes
fn check(tx: &EnrichedTransaction, occurrences: &HashMap<Timestamp, usize>) -> Option<String> {
    if tx.amount < 0.0 {
        return Some(REASON_NEGATIVE.to_string());
    }

    if occurrences.get(&tx.date).copied().unwrap_or(0) > 1 {
        return Some(REASON_DUPLICATE.to_string());
    }

    if tx.amount >= AMOUNT_LIMIT {
        return Some(REASON_OVER_LIMIT.to_string());
    }

    let expected = compute_ceiling(tx.amount);
    if (tx.ceiling - expected).abs() > CEILING_TOLERANCE {
        return Some(format!(
            "Ceiling mismatch: expected {}, got {}",
            expected, tx.ceiling
        ));
    }

    None
}
