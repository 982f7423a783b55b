//! Microsave Core Library
//!
//! Round-up micro-savings on everyday expenses:
//! - Ceiling/remanent derivation (round each expense up to the next 100)
//! - Transaction validation (negatives, duplicates, limit, ceiling mismatch)
//! - Q/P/K period rules (fixed overrides, stacking bonuses, reporting windows)
//! - Returns projection for NPS and index funds, with the NPS tax benefit
//! - CSV import and TOML projection config

pub mod ceiling;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod period;
pub mod pipeline;
pub mod returns;
pub mod rules;
pub mod tax;
pub mod validate;

pub use ceiling::{compute_ceiling, compute_remanent, enrich, enrich_all, round2};
pub use config::ProjectionConfig;
pub use error::{Error, Result};
pub use import::{parse_transactions_csv, read_transactions_csv};
pub use models::{
    EnrichedTransaction, FilterRequest, FilterResult, FilteredTransaction, InvalidRecord,
    InvestmentMode, KPeriod, PPeriod, QPeriod, RawTransaction, ReturnProjection, ReturnsRequest,
    SavingsWindow, ValidationResult, ValidatorRequest,
};
pub use period::{Period, Timestamp, Windowed};
pub use pipeline::{check_returns_request, check_wage, compute_returns, filter_transactions};
pub use returns::{ProjectionParams, Projector};
pub use rules::apply_rules;
pub use tax::{compute_nps_tax_benefit, compute_tax, TaxRegime, TaxSlab};
pub use validate::validate_transactions;
