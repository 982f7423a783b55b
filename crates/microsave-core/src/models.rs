//! Domain models for Microsave
//!
//! Field names on the wire are camelCase (`appliedQ`, `taxBenefit`,
//! `savingsByDates`); the Rust side uses the usual snake_case.

use serde::{Deserialize, Serialize};

use crate::period::{Period, Timestamp, Windowed};

/// A transaction exactly as received from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: Timestamp,
    pub amount: f64,
}

/// A transaction with its ceiling and remanent attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    pub date: Timestamp,
    pub amount: f64,
    /// Amount rounded up to the next multiple of 100
    pub ceiling: f64,
    /// `ceiling - amount`, the portion diverted to savings
    pub remanent: f64,
}

/// Q period: replaces the remanent with a fixed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QPeriod {
    pub fixed: f64,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// P period: adds an extra amount on top of the remanent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PPeriod {
    pub extra: f64,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// K period: a reporting window with no payload
pub type KPeriod = Period;

impl Windowed for QPeriod {
    fn start(&self) -> Timestamp {
        self.start
    }

    fn end(&self) -> Timestamp {
        self.end
    }
}

impl Windowed for PPeriod {
    fn start(&self) -> Timestamp {
        self.start
    }

    fn end(&self) -> Timestamp {
        self.end
    }
}

/// The Q override that won for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedQ {
    pub fixed: f64,
}

/// One P bonus applied to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedP {
    pub extra: f64,
}

/// A transaction after the Q/P/K rules have been applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredTransaction {
    pub date: Timestamp,
    pub amount: f64,
    pub ceiling: f64,
    /// Final remanent after Q and P, rounded to 2 decimals
    pub remanent: f64,
    #[serde(rename = "appliedQ")]
    pub applied_q: Option<AppliedQ>,
    /// In P-list order
    #[serde(rename = "appliedP", default)]
    pub applied_p: Vec<AppliedP>,
    #[serde(rename = "inKPeriod")]
    pub in_k_period: bool,
}

/// A transaction excluded at some stage, with the reason it was rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidRecord {
    pub date: Timestamp,
    pub amount: f64,
    #[serde(rename = "message")]
    pub reason: String,
}

impl InvalidRecord {
    pub fn new(date: Timestamp, amount: f64, reason: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            reason: reason.into(),
        }
    }
}

/// Output of the transaction validator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: Vec<EnrichedTransaction>,
    pub invalid: Vec<InvalidRecord>,
}

/// Output of the Q/P/K rule engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub valid: Vec<FilteredTransaction>,
    pub invalid: Vec<InvalidRecord>,
}

/// Savings and projected returns for one K period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsWindow {
    pub start: Timestamp,
    pub end: Timestamp,
    /// Summed remanent inside the window (the principal)
    pub amount: f64,
    /// Inflation-adjusted profit at retirement
    pub profit: f64,
    /// Always present; 0.0 when the mode has no tax benefit
    pub tax_benefit: f64,
}

/// Full returns projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnProjection {
    pub total_transaction_amount: f64,
    pub total_ceiling: f64,
    pub savings_by_dates: Vec<SavingsWindow>,
}

/// Investment product used for a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentMode {
    /// National Pension Scheme: lower rate, tax deduction benefit
    Nps,
    /// Index fund: higher rate, no tax benefit
    Index,
}

impl InvestmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nps => "nps",
            Self::Index => "index",
        }
    }

    /// Whether projections in this mode compute a tax benefit
    pub fn includes_tax_benefit(&self) -> bool {
        matches!(self, Self::Nps)
    }
}

impl std::str::FromStr for InvestmentMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nps" => Ok(Self::Nps),
            "index" | "index-fund" | "index_fund" => Ok(Self::Index),
            _ => Err(format!("Unknown investment mode: {}", s)),
        }
    }
}

impl std::fmt::Display for InvestmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for the validator stage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidatorRequest {
    pub wage: f64,
    pub transactions: Vec<EnrichedTransaction>,
}

/// Input for the filter stage; transactions are raw and enriched internally
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterRequest {
    pub wage: f64,
    #[serde(default)]
    pub q: Vec<QPeriod>,
    #[serde(default)]
    pub p: Vec<PPeriod>,
    pub k: Vec<KPeriod>,
    pub transactions: Vec<RawTransaction>,
}

/// Input for a returns projection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReturnsRequest {
    /// Current age of the investor
    pub age: u32,
    /// Monthly wage
    pub wage: f64,
    /// Annual inflation in percent; falls back to the configured default
    #[serde(default)]
    pub inflation: Option<f64>,
    #[serde(default)]
    pub q: Vec<QPeriod>,
    #[serde(default)]
    pub p: Vec<PPeriod>,
    pub k: Vec<KPeriod>,
    pub transactions: Vec<RawTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_transaction_wire_names() {
        let tx = FilteredTransaction {
            date: "2023-07-15 12:00:00".parse().unwrap(),
            amount: 250.0,
            ceiling: 300.0,
            remanent: 70.0,
            applied_q: Some(AppliedQ { fixed: 50.0 }),
            applied_p: vec![AppliedP { extra: 20.0 }],
            in_k_period: true,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2023-07-15 12:00:00");
        assert_eq!(json["appliedQ"]["fixed"], 50.0);
        assert_eq!(json["appliedP"][0]["extra"], 20.0);
        assert_eq!(json["inKPeriod"], true);
    }

    #[test]
    fn test_projection_wire_names() {
        let projection = ReturnProjection {
            total_transaction_amount: 1.0,
            total_ceiling: 100.0,
            savings_by_dates: vec![SavingsWindow {
                start: "2023-01-01 00:00:00".parse().unwrap(),
                end: "2023-12-31 23:59:59".parse().unwrap(),
                amount: 99.0,
                profit: 10.0,
                tax_benefit: 0.0,
            }],
        };

        let json = serde_json::to_value(&projection).unwrap();
        assert_eq!(json["totalTransactionAmount"], 1.0);
        assert_eq!(json["totalCeiling"], 100.0);
        assert_eq!(json["savingsByDates"][0]["taxBenefit"], 0.0);
    }

    #[test]
    fn test_invalid_record_uses_message_field() {
        let record = InvalidRecord::new(
            "2023-01-01 10:00:00".parse().unwrap(),
            -5.0,
            "Amount cannot be negative",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["message"], "Amount cannot be negative");
    }

    #[test]
    fn test_returns_request_defaults() {
        let req: ReturnsRequest = serde_json::from_value(serde_json::json!({
            "age": 29,
            "wage": 50000,
            "k": [{"start": "2023-01-01 00:00:00", "end": "2023-12-31 23:59:59"}],
            "transactions": [{"date": "2023-02-28 15:49:20", "amount": 375}]
        }))
        .unwrap();

        assert!(req.inflation.is_none());
        assert!(req.q.is_empty());
        assert!(req.p.is_empty());
        assert_eq!(req.transactions[0].amount, 375.0);
    }

    #[test]
    fn test_investment_mode_from_str() {
        assert_eq!("nps".parse::<InvestmentMode>(), Ok(InvestmentMode::Nps));
        assert_eq!("Index".parse::<InvestmentMode>(), Ok(InvestmentMode::Index));
        assert!("bonds".parse::<InvestmentMode>().is_err());
        assert!(InvestmentMode::Nps.includes_tax_benefit());
        assert!(!InvestmentMode::Index.includes_tax_benefit());
    }
}
