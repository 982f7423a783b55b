//! Q/P/K period rule engine
//!
//! Each valid transaction goes through three rules, always in this order:
//!
//! - **Q (override)**: among the Q periods containing the date, the one with the
//!   latest start wins and its `fixed` value replaces the remanent. Equal starts
//!   resolve to the earlier entry in the Q list.
//! - **P (bonus)**: every P period containing the date adds its `extra`, in
//!   P-list order. This also applies when Q set the remanent to zero.
//! - **K (window)**: the transaction must fall inside at least one K period,
//!   otherwise it is moved to the invalid set and its Q/P outcome is dropped.
//!
//! All windows are inclusive on both ends.

use crate::ceiling::round2;
use crate::error::Result;
use crate::models::{
    AppliedP, AppliedQ, EnrichedTransaction, FilterResult, FilteredTransaction, InvalidRecord,
    KPeriod, PPeriod, QPeriod,
};
use crate::period::{check_all, latest_start, Windowed};

pub const REASON_OUTSIDE_K: &str = "Not within any K period";

/// Apply the Q, P and K rules to a batch of validated transactions.
///
/// Fails only when a period is malformed (start after end); in that case no
/// transaction is processed.
pub fn apply_rules(
    transactions: &[EnrichedTransaction],
    q_periods: &[QPeriod],
    p_periods: &[PPeriod],
    k_periods: &[KPeriod],
) -> Result<FilterResult> {
    check_all(q_periods)?;
    check_all(p_periods)?;
    check_all(k_periods)?;

    let mut result = FilterResult::default();

    for tx in transactions {
        let filtered = apply_to_transaction(tx, q_periods, p_periods, k_periods);
        if filtered.in_k_period {
            result.valid.push(filtered);
        } else {
            result
                .invalid
                .push(InvalidRecord::new(tx.date, tx.amount, REASON_OUTSIDE_K));
        }
    }

    tracing::debug!(
        q = q_periods.len(),
        p = p_periods.len(),
        k = k_periods.len(),
        valid = result.valid.len(),
        invalid = result.invalid.len(),
        "Applied period rules"
    );

    Ok(result)
}

fn apply_to_transaction(
    tx: &EnrichedTransaction,
    q_periods: &[QPeriod],
    p_periods: &[PPeriod],
    k_periods: &[KPeriod],
) -> FilteredTransaction {
    let mut remanent = tx.remanent;

    // Q: hard override, latest start wins
    let winning_q = latest_start(q_periods.iter().filter(|q| q.contains(tx.date)));
    let applied_q = winning_q.map(|q| {
        remanent = q.fixed;
        AppliedQ { fixed: q.fixed }
    });

    // P: every match stacks
    let applied_p: Vec<AppliedP> = p_periods
        .iter()
        .filter(|p| p.contains(tx.date))
        .map(|p| {
            remanent += p.extra;
            AppliedP { extra: p.extra }
        })
        .collect();

    // K: membership only
    let in_k_period = k_periods.iter().any(|k| k.contains(tx.date));

    FilteredTransaction {
        date: tx.date,
        amount: tx.amount,
        ceiling: tx.ceiling,
        remanent: round2(remanent),
        applied_q,
        applied_p,
        in_k_period,
    }
}

/// Sum the remanents of transactions inside one K period, rounded to 2 decimals.
///
/// A transaction inside several overlapping K periods counts fully in each.
pub fn sum_remanents_for_window(transactions: &[FilteredTransaction], k: &KPeriod) -> f64 {
    let total: f64 = transactions
        .iter()
        .filter(|tx| k.contains(tx.date))
        .map(|tx| tx.remanent)
        .sum();
    round2(total)
}
