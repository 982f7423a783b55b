//! Integration tests for microsave-core
//!
//! These tests exercise the full CSV → enrich → validate → rules → projection
//! workflow through the public API.

use microsave_core::{
    compute_returns, enrich_all, filter_transactions, parse_transactions_csv, round2,
    validate_transactions, Error, FilterRequest, InvestmentMode, ProjectionConfig, ReturnsRequest,
};

/// Four expenses across 2023, one in a July Q=0 window and two in an
/// October-December P=+25 window
fn expenses_csv() -> &'static str {
    r#"date,amount
2023-10-12 20:15:30,250
2023-02-28 15:49:20,375
2023-07-01 21:59:00,620
2023-12-17 08:09:45,480"#
}

fn returns_request() -> ReturnsRequest {
    serde_json::from_value(serde_json::json!({
        "age": 29,
        "wage": 50000,
        "inflation": 5.5,
        "q": [{"fixed": 0, "start": "2023-07-01 00:00:00", "end": "2023-07-31 23:59:59"}],
        "p": [{"extra": 25, "start": "2023-10-01 08:00:00", "end": "2023-12-31 19:59:59"}],
        "k": [
            {"start": "2023-03-01 00:00:00", "end": "2023-11-30 23:59:59"},
            {"start": "2023-01-01 00:00:00", "end": "2023-12-31 23:59:59"}
        ],
        "transactions": [
            {"date": "2023-10-12 20:15:30", "amount": 250},
            {"date": "2023-02-28 15:49:20", "amount": 375},
            {"date": "2023-07-01 21:59:00", "amount": 620},
            {"date": "2023-12-17 08:09:45", "amount": 480}
        ]
    }))
    .expect("Failed to build request")
}

// =============================================================================
// Stage-by-stage
// =============================================================================

#[test]
fn test_csv_to_validation() {
    let raw = parse_transactions_csv(expenses_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(raw.len(), 4);

    let enriched = enrich_all(&raw);
    let remanents: Vec<f64> = enriched.iter().map(|t| t.remanent).collect();
    assert_eq!(remanents, vec![50.0, 25.0, 80.0, 20.0]);

    let result = validate_transactions(&enriched, 50_000.0);
    assert_eq!(result.valid.len(), 4);
    assert!(result.invalid.is_empty());
}

#[test]
fn test_filter_request_from_json() {
    let request = returns_request();
    let filter = FilterRequest {
        wage: request.wage,
        q: request.q.clone(),
        p: request.p.clone(),
        k: request.k.clone(),
        transactions: request.transactions.clone(),
    };

    let result = filter_transactions(&filter).expect("Filter failed");
    assert!(result.invalid.is_empty());

    let remanents: Vec<f64> = result.valid.iter().map(|t| t.remanent).collect();
    // Oct: 50 + 25, Feb: 25, Jul: Q→0, Dec: 20 + 25
    assert_eq!(remanents, vec![75.0, 25.0, 0.0, 45.0]);

    let july = &result.valid[2];
    assert!(july.applied_q.is_some());
    assert!(july.applied_p.is_empty());
}

// =============================================================================
// Full projections
// =============================================================================

#[test]
fn test_index_projection() {
    let config = ProjectionConfig::default();
    let projection = compute_returns(&returns_request(), InvestmentMode::Index, &config)
        .expect("Projection failed");

    assert_eq!(projection.total_transaction_amount, 1725.0);
    assert_eq!(projection.total_ceiling, 1900.0);
    assert_eq!(projection.savings_by_dates.len(), 2);

    // Mar-Nov window holds the Oct (75) and Jul (0) remanents
    let march_nov = &projection.savings_by_dates[0];
    assert_eq!(march_nov.amount, 75.0);

    let full_year = &projection.savings_by_dates[1];
    assert_eq!(full_year.amount, 145.0);
    assert_eq!(full_year.tax_benefit, 0.0);

    let expected = round2(145.0 * 1.1449f64.powi(31) / 1.055f64.powi(31) - 145.0);
    assert_eq!(full_year.profit, expected);
}

#[test]
fn test_nps_vs_index() {
    let config = ProjectionConfig::default();
    let request = returns_request();

    let nps = compute_returns(&request, InvestmentMode::Nps, &config).unwrap();
    let index = compute_returns(&request, InvestmentMode::Index, &config).unwrap();

    assert_eq!(nps.total_ceiling, index.total_ceiling);
    for (n, i) in nps.savings_by_dates.iter().zip(&index.savings_by_dates) {
        assert_eq!(n.amount, i.amount);
        assert!(i.profit > n.profit);
    }

    // 6L annual income sits in the 0% slab, so no benefit
    assert_eq!(nps.savings_by_dates[1].tax_benefit, 0.0);
}

#[test]
fn test_nps_benefit_for_high_earner() {
    let config = ProjectionConfig::default();
    let mut request = returns_request();
    request.wage = 100_000.0;

    let nps = compute_returns(&request, InvestmentMode::Nps, &config).unwrap();
    // 12L annual, 145 invested: tax(12L) - tax(12L - 145) at 15%
    assert_eq!(nps.savings_by_dates[1].tax_benefit, round2(145.0 * 0.15));
}

#[test]
fn test_projection_wire_format() {
    let config = ProjectionConfig::default();
    let projection = compute_returns(&returns_request(), InvestmentMode::Nps, &config).unwrap();

    let json = serde_json::to_value(&projection).unwrap();
    assert_eq!(json["totalTransactionAmount"], 1725.0);
    assert_eq!(json["savingsByDates"][0]["start"], "2023-03-01 00:00:00");
    assert!(json["savingsByDates"][1]["taxBenefit"].is_number());
}

#[test]
fn test_custom_config_changes_rates() {
    let config = ProjectionConfig::from_toml_str("[rates]\nindex = 0.0\n").unwrap();
    let mut request = returns_request();
    request.inflation = Some(0.0);

    let projection = compute_returns(&request, InvestmentMode::Index, &config).unwrap();
    assert!(projection.savings_by_dates.iter().all(|w| w.profit == 0.0));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_malformed_timestamp_rejected_at_boundary() {
    let result: Result<ReturnsRequest, _> = serde_json::from_value(serde_json::json!({
        "age": 29,
        "wage": 50000,
        "k": [{"start": "2023-01-01", "end": "2023-12-31 23:59:59"}],
        "transactions": []
    }));
    assert!(result.is_err());
}

#[test]
fn test_reversed_k_period_is_an_error() {
    let config = ProjectionConfig::default();
    let mut request = returns_request();
    request.k.reverse();
    request.k[0] = serde_json::from_value(serde_json::json!({
        "start": "2023-12-31 23:59:59",
        "end": "2023-01-01 00:00:00"
    }))
    .unwrap();

    let result = compute_returns(&request, InvestmentMode::Nps, &config);
    assert!(matches!(result, Err(Error::InvalidPeriod { .. })));
}
