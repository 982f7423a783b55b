//! Returns projection
//!
//! For every K period independently:
//!
//! ```text
//! principal = round(Σ remanent inside [k.start, k.end], 2)
//! fv        = principal × (1 + rate)^years        (0 if principal or years is 0)
//! real_fv   = fv / (1 + inflation/100)^years
//! profit    = round(real_fv − principal, 2)
//! ```
//!
//! `years = max(retirement_age − age, min_years)`. The tax benefit is only
//! computed for modes that carry one and is `0.0` otherwise.

use crate::ceiling::round2;
use crate::config::ProjectionConfig;
use crate::error::Result;
use crate::models::{FilteredTransaction, InvestmentMode, KPeriod, ReturnProjection, SavingsWindow};
use crate::period::check_all;
use crate::rules::sum_remanents_for_window;

/// Compound growth; zero when there is nothing to grow
pub fn compute_future_value(principal: f64, rate: f64, years: u32) -> f64 {
    if principal <= 0.0 || years == 0 {
        return 0.0;
    }
    principal * (1.0 + rate).powi(years as i32)
}

/// Deflate a nominal future value to today's money
pub fn adjust_for_inflation(nominal: f64, inflation_pct: f64, years: u32) -> f64 {
    nominal / (1.0 + inflation_pct / 100.0).powi(years as i32)
}

/// Per-request projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub age: u32,
    /// Monthly wage
    pub wage: f64,
    /// Annual inflation in percent
    pub inflation: f64,
    /// Annual return as a decimal
    pub rate: f64,
    pub include_tax: bool,
}

impl ProjectionParams {
    /// Parameters for one of the named investment modes
    pub fn for_mode(
        config: &ProjectionConfig,
        mode: InvestmentMode,
        age: u32,
        wage: f64,
        inflation: f64,
    ) -> Self {
        Self {
            age,
            wage,
            inflation,
            rate: config.rate_for(mode),
            include_tax: mode.includes_tax_benefit(),
        }
    }
}

/// Projects filtered savings forward under a fixed configuration
pub struct Projector<'a> {
    config: &'a ProjectionConfig,
}

impl<'a> Projector<'a> {
    pub fn new(config: &'a ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project every K window.
    ///
    /// Totals cover the whole transaction set, not a single window.
    pub fn project(
        &self,
        transactions: &[FilteredTransaction],
        k_periods: &[KPeriod],
        params: &ProjectionParams,
    ) -> Result<ReturnProjection> {
        check_all(k_periods)?;

        let years = self.config.years_to_retirement(params.age);

        let savings_by_dates = k_periods
            .iter()
            .map(|k| self.project_window(transactions, k, years, params))
            .collect();

        let total_amount: f64 = transactions.iter().map(|tx| tx.amount).sum();
        let total_ceiling: f64 = transactions.iter().map(|tx| tx.ceiling).sum();

        tracing::debug!(
            years,
            rate = params.rate,
            windows = k_periods.len(),
            transactions = transactions.len(),
            "Projected returns"
        );

        Ok(ReturnProjection {
            total_transaction_amount: round2(total_amount),
            total_ceiling: round2(total_ceiling),
            savings_by_dates,
        })
    }

    fn project_window(
        &self,
        transactions: &[FilteredTransaction],
        k: &KPeriod,
        years: u32,
        params: &ProjectionParams,
    ) -> SavingsWindow {
        let principal = sum_remanents_for_window(transactions, k);

        let nominal = compute_future_value(principal, params.rate, years);
        let real = adjust_for_inflation(nominal, params.inflation, years);
        let profit = round2(real - principal);

        let tax_benefit = if params.include_tax {
            self.config.tax.nps_benefit(principal, params.wage)
        } else {
            0.0
        };

        SavingsWindow {
            start: k.start,
            end: k.end,
            amount: principal,
            profit,
            tax_benefit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{Period, Timestamp};

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn tx(date: &str, remanent: f64) -> FilteredTransaction {
        FilteredTransaction {
            date: ts(date),
            amount: 300.0,
            ceiling: 400.0,
            remanent,
            applied_q: None,
            applied_p: vec![],
            in_k_period: true,
        }
    }

    fn full_year() -> KPeriod {
        Period::new(ts("2023-01-01 00:00:00"), ts("2023-12-31 23:59:59")).unwrap()
    }

    fn params(config: &ProjectionConfig, mode: InvestmentMode) -> ProjectionParams {
        ProjectionParams::for_mode(config, mode, 29, 50_000.0, 5.5)
    }

    #[test]
    fn test_future_value_zero_cases() {
        assert_eq!(compute_future_value(0.0, 0.0711, 10), 0.0);
        assert_eq!(compute_future_value(-5.0, 0.0711, 10), 0.0);
        assert_eq!(compute_future_value(1000.0, 0.0711, 0), 0.0);
    }

    #[test]
    fn test_future_value_compounds() {
        let fv = compute_future_value(1000.0, 0.0711, 10);
        assert!((fv - 1987.46).abs() < 0.5, "fv = {fv}");

        let nps = compute_future_value(1000.0, 0.0711, 20);
        let index = compute_future_value(1000.0, 0.1449, 20);
        assert!(index > nps);
    }

    #[test]
    fn test_inflation_adjustment() {
        assert!(adjust_for_inflation(1000.0, 5.5, 10) < 1000.0);
        assert_eq!(adjust_for_inflation(1000.0, 0.0, 10), 1000.0);
        assert_eq!(adjust_for_inflation(1000.0, 5.5, 0), 1000.0);
    }

    #[test]
    fn test_window_amount_and_profit() {
        let config = ProjectionConfig::default();
        let txns = vec![tx("2023-06-15 12:00:00", 200.0)];

        let projection = Projector::new(&config)
            .project(&txns, &[full_year()], &params(&config, InvestmentMode::Nps))
            .unwrap();

        let window = &projection.savings_by_dates[0];
        assert_eq!(window.amount, 200.0);

        let expected = round2(200.0 * 1.0711f64.powi(31) / 1.055f64.powi(31) - 200.0);
        assert_eq!(window.profit, expected);
        assert!(window.profit > 0.0);
        assert_eq!(window.start, ts("2023-01-01 00:00:00"));
    }

    #[test]
    fn test_index_beats_nps_without_tax_benefit() {
        let config = ProjectionConfig::default();
        let txns = vec![tx("2023-06-15 12:00:00", 1000.0)];
        let projector = Projector::new(&config);

        let nps = projector
            .project(&txns, &[full_year()], &params(&config, InvestmentMode::Nps))
            .unwrap();
        let index = projector
            .project(&txns, &[full_year()], &params(&config, InvestmentMode::Index))
            .unwrap();

        assert!(index.savings_by_dates[0].profit > nps.savings_by_dates[0].profit);
        assert_eq!(index.savings_by_dates[0].tax_benefit, 0.0);
    }

    #[test]
    fn test_nps_tax_benefit_uses_principal_and_wage() {
        let config = ProjectionConfig::default();
        let txns = vec![tx("2023-06-15 12:00:00", 50_000.0)];
        let params = ProjectionParams::for_mode(&config, InvestmentMode::Nps, 29, 100_000.0, 5.5);

        let projection = Projector::new(&config)
            .project(&txns, &[full_year()], &params)
            .unwrap();
        assert_eq!(projection.savings_by_dates[0].tax_benefit, 7_500.0);
    }

    #[test]
    fn test_empty_window_has_zero_growth() {
        let config = ProjectionConfig::default();
        let txns = vec![tx("2023-06-15 12:00:00", 100.0)];
        let empty = Period::new(ts("2024-01-01 00:00:00"), ts("2024-12-31 23:59:59")).unwrap();

        let projection = Projector::new(&config)
            .project(&txns, &[empty], &params(&config, InvestmentMode::Nps))
            .unwrap();

        let window = &projection.savings_by_dates[0];
        assert_eq!(window.amount, 0.0);
        assert_eq!(window.profit, 0.0);
        assert_eq!(window.tax_benefit, 0.0);
    }

    #[test]
    fn test_overlapping_windows_each_count_fully() {
        let config = ProjectionConfig::default();
        let txns = vec![tx("2023-07-15 12:00:00", 50.0)];
        let ks = vec![
            full_year(),
            Period::new(ts("2023-06-01 00:00:00"), ts("2023-09-30 23:59:59")).unwrap(),
        ];

        let projection = Projector::new(&config)
            .project(&txns, &ks, &params(&config, InvestmentMode::Index))
            .unwrap();

        assert_eq!(projection.savings_by_dates.len(), 2);
        assert_eq!(projection.savings_by_dates[0].amount, 50.0);
        assert_eq!(projection.savings_by_dates[1].amount, 50.0);
    }

    #[test]
    fn test_totals_are_global() {
        let config = ProjectionConfig::default();
        let txns = vec![
            tx("2023-02-01 00:00:00", 10.0),
            tx("2023-08-01 00:00:00", 20.0),
        ];
        let narrow = Period::new(ts("2023-01-01 00:00:00"), ts("2023-03-31 23:59:59")).unwrap();

        let projection = Projector::new(&config)
            .project(&txns, &[narrow], &params(&config, InvestmentMode::Nps))
            .unwrap();

        assert_eq!(projection.total_transaction_amount, 600.0);
        assert_eq!(projection.total_ceiling, 800.0);
        assert_eq!(projection.savings_by_dates[0].amount, 10.0);
    }

    #[test]
    fn test_horizon_floor_applies() {
        let config = ProjectionConfig::default();
        let txns = vec![tx("2023-06-15 12:00:00", 100.0)];
        let at_55 = ProjectionParams::for_mode(&config, InvestmentMode::Index, 55, 50_000.0, 0.0);
        let at_58 = ProjectionParams::for_mode(&config, InvestmentMode::Index, 58, 50_000.0, 0.0);

        let projector = Projector::new(&config);
        let a = projector.project(&txns, &[full_year()], &at_55).unwrap();
        let b = projector.project(&txns, &[full_year()], &at_58).unwrap();

        assert_eq!(a.savings_by_dates[0].profit, b.savings_by_dates[0].profit);
        assert_eq!(
            a.savings_by_dates[0].profit,
            round2(100.0 * 1.1449f64.powi(5) - 100.0)
        );
    }
}
