//! Progressive income tax and NPS deduction benefit
//!
//! Default slabs (marginal, only the part of income inside a bracket is taxed
//! at that bracket's rate):
//!
//! | Income band          | Rate |
//! |----------------------|------|
//! | 0 – 7,00,000         |  0%  |
//! | 7,00,000 – 10,00,000 | 10%  |
//! | 10,00,000 – 12,00,000| 15%  |
//! | 12,00,000 – 15,00,000| 20%  |
//! | above 15,00,000      | 30%  |

use serde::{Deserialize, Serialize};

use crate::ceiling::round2;
use crate::error::{Error, Result};

/// One tax bracket. `limit` is the upper bound of the bracket; `None` means
/// unbounded and may only appear on the last slab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub limit: Option<f64>,
    pub rate: f64,
}

/// Slab table plus the NPS deduction rules
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRegime {
    pub slabs: Vec<TaxSlab>,
    /// Absolute cap on the NPS deduction
    pub deduction_cap: f64,
    /// Deduction is also capped at this fraction of annual wage
    pub wage_fraction: f64,
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self {
            slabs: vec![
                TaxSlab {
                    limit: Some(700_000.0),
                    rate: 0.0,
                },
                TaxSlab {
                    limit: Some(1_000_000.0),
                    rate: 0.10,
                },
                TaxSlab {
                    limit: Some(1_200_000.0),
                    rate: 0.15,
                },
                TaxSlab {
                    limit: Some(1_500_000.0),
                    rate: 0.20,
                },
                TaxSlab {
                    limit: None,
                    rate: 0.30,
                },
            ],
            deduction_cap: 200_000.0,
            wage_fraction: 0.10,
        }
    }
}

impl TaxRegime {
    /// Check the slab table is usable: non-empty, increasing limits, only the
    /// last slab unbounded, non-negative rates
    pub fn validate(&self) -> Result<()> {
        let Some(last) = self.slabs.last() else {
            return Err(Error::Config("tax slab table is empty".to_string()));
        };
        if last.limit.is_some() {
            return Err(Error::Config("last tax slab must be unbounded".to_string()));
        }

        let mut prev = 0.0;
        for slab in &self.slabs[..self.slabs.len() - 1] {
            let limit = slab.limit.ok_or_else(|| {
                Error::Config("only the last tax slab may be unbounded".to_string())
            })?;
            if limit <= prev {
                return Err(Error::Config(format!(
                    "tax slab limits must be strictly increasing (got {} after {})",
                    limit, prev
                )));
            }
            prev = limit;
        }

        if self.slabs.iter().any(|s| s.rate < 0.0) {
            return Err(Error::Config("tax rates cannot be negative".to_string()));
        }
        if self.deduction_cap < 0.0 || self.wage_fraction < 0.0 {
            return Err(Error::Config(
                "deduction cap and wage fraction cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Tax owed on an annual income, rounded to 2 decimals
    pub fn tax(&self, annual_income: f64) -> f64 {
        let mut tax = 0.0;
        let mut prev_limit = 0.0;

        for slab in &self.slabs {
            if annual_income <= prev_limit {
                break;
            }
            let upper = slab.limit.unwrap_or(f64::INFINITY);
            tax += (annual_income.min(upper) - prev_limit) * slab.rate;
            prev_limit = upper;
        }

        round2(tax)
    }

    /// Deduction allowed for an NPS investment
    pub fn nps_deduction(&self, invested: f64, annual_wage: f64) -> f64 {
        invested
            .min(annual_wage * self.wage_fraction)
            .min(self.deduction_cap)
    }

    /// Tax saved by investing `invested` into NPS on a monthly wage.
    ///
    /// Never negative.
    pub fn nps_benefit(&self, invested: f64, monthly_wage: f64) -> f64 {
        let annual_wage = monthly_wage * 12.0;
        let deduction = self.nps_deduction(invested, annual_wage);
        let benefit = self.tax(annual_wage) - self.tax(annual_wage - deduction);
        round2(benefit.max(0.0))
    }
}

/// Tax on an annual income under the default slabs
pub fn compute_tax(annual_income: f64) -> f64 {
    TaxRegime::default().tax(annual_income)
}

/// NPS tax benefit under the default slabs and deduction caps
pub fn compute_nps_tax_benefit(invested: f64, monthly_wage: f64) -> f64 {
    TaxRegime::default().nps_benefit(invested, monthly_wage)
}
