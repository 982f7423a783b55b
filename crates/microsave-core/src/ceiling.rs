//! Ceiling and remanent derivation
//!
//! Every expense is rounded up to the next multiple of 100; the difference
//! (the remanent) is what gets diverted to savings.
//!
//! - 250 → ceiling 300, remanent 50
//! - 300 → ceiling 300, remanent 0
//! - 847 → ceiling 900, remanent 53

use crate::models::{EnrichedTransaction, RawTransaction};

/// Rounding step for ceilings
pub const CEILING_STEP: f64 = 100.0;

/// Round to 2 decimal places, exact halves to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Round an amount up to the next multiple of 100 (exact multiples unchanged)
pub fn compute_ceiling(amount: f64) -> f64 {
    (amount / CEILING_STEP).ceil() * CEILING_STEP
}

/// `ceiling - amount`, rounded to 2 decimals
pub fn compute_remanent(amount: f64, ceiling: f64) -> f64 {
    round2(ceiling - amount)
}

/// Derive `(ceiling, remanent)` for an amount
pub fn enrich_amount(amount: f64) -> (f64, f64) {
    let ceiling = compute_ceiling(amount);
    (ceiling, compute_remanent(amount, ceiling))
}

/// Attach ceiling and remanent to a single raw transaction
pub fn enrich(tx: &RawTransaction) -> EnrichedTransaction {
    let (ceiling, remanent) = enrich_amount(tx.amount);
    EnrichedTransaction {
        date: tx.date,
        amount: tx.amount,
        ceiling,
        remanent,
    }
}

/// Enrich a batch of transactions, preserving order
pub fn enrich_all(transactions: &[RawTransaction]) -> Vec<EnrichedTransaction> {
    let enriched: Vec<_> = transactions.iter().map(enrich).collect();
    tracing::debug!(count = enriched.len(), "Enriched transactions");
    enriched
}
