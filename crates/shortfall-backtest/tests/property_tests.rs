//! Property-based tests for back-test invariants.
//!
//! These tests verify key properties that should hold for any complete
//! price history:
//! - Delta series length is exact
//! - Every labeled day gets exactly one deterministic label
//! - ES never exceeds VaR where both are defined
//! - Breach flags agree with the raw comparison
//! - Scenario percentages sum to the overall breach rate

use chrono::NaiveDate;
use proptest::prelude::*;
use shortfall_backtest::prelude::*;
use shortfall_core::prelude::*;
use shortfall_risk::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Builds a price series by compounding daily returns from 100.
fn price_series(returns: &[f64]) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2010, 1, 4).unwrap();
    let mut price = 100.0_f64;
    let pairs = returns.iter().enumerate().map(|(i, r)| {
        let day = start + chrono::Days::new(i as u64);
        price *= r.exp();
        (day, price)
    });
    TimeSeries::from_pairs(pairs).unwrap()
}

/// Daily log returns long enough for a window-20 pipeline.
fn returns_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.05..0.05f64, 60..160)
}

fn prop_config() -> RiskConfig {
    RiskConfig::sequential()
        .with_window(20)
        .with_lag(1)
        .with_confidence(0.9)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_delta_length_exact(returns in returns_strategy(), lag in 1usize..5) {
        let prices = price_series(&returns);
        let deltas = log_returns(&prices, lag).unwrap();
        prop_assert_eq!(deltas.len(), prices.len() - lag);
    }

    #[test]
    fn prop_labels_total_and_deterministic(returns in returns_strategy()) {
        let prices = price_series(&returns);
        let deltas = log_returns(&prices, 1).unwrap();

        let (labels_a, thresholds) = label_series(&deltas, 20).unwrap();
        let (labels_b, _) = label_series(&deltas, 20).unwrap();

        prop_assert_eq!(labels_a.len(), deltas.len() - 20);
        prop_assert_eq!(&labels_a, &labels_b);

        // Thresholds are strictly ordered whenever dispersion is nonzero.
        if !thresholds.is_degenerate() {
            prop_assert!(thresholds.stressed < thresholds.negative);
            prop_assert!(thresholds.negative < thresholds.mean);
            prop_assert!(thresholds.mean <= thresholds.positive);
            prop_assert!(thresholds.positive < thresholds.boom);
        }
    }

    #[test]
    fn prop_es_never_above_var(returns in returns_strategy()) {
        let prices = price_series(&returns);
        let deltas = log_returns(&prices, 1).unwrap();
        let tail = rolling_tail_risk(&deltas, &prop_config()).unwrap();

        for (day, es) in tail.es.iter() {
            let var = tail.var.get(day).copied().unwrap();
            prop_assert!(*es <= var);
        }
    }

    #[test]
    fn prop_breach_flags_consistent(returns in returns_strategy()) {
        let id = PortfolioId::new("p");
        let input = PortfolioSeries::Prices(price_series(&returns));
        let report = run_portfolio(&id, &input, &prop_config()).unwrap();

        for row in report.table.rows() {
            prop_assert_eq!(row.var_breach, row.pnl < row.var);
            prop_assert_eq!(row.es_breach, row.pnl < row.es);
        }
    }

    #[test]
    fn prop_percentages_sum_to_overall(returns in returns_strategy()) {
        let id = PortfolioId::new("p");
        let input = PortfolioSeries::Prices(price_series(&returns));
        let report = run_portfolio(&id, &input, &prop_config()).unwrap();

        let overall =
            report.table.var_breach_count() as f64 / report.table.len() as f64 * 100.0;
        prop_assert!((report.summary.overall_pct_ko_var() - overall).abs() < 1e-9);
    }

    #[test]
    fn prop_streaks_bounded_by_observations(returns in returns_strategy()) {
        let id = PortfolioId::new("p");
        let input = PortfolioSeries::Prices(price_series(&returns));
        let report = run_portfolio(&id, &input, &prop_config()).unwrap();

        for (_, kpis) in report.summary.iter() {
            if let Some(streak) = kpis.max_streak_var {
                prop_assert!(streak >= 1);
                prop_assert!(streak as usize <= kpis.observations);
            } else {
                // No streak cell means no breach in this scenario.
                prop_assert_eq!(kpis.worst_excess_var, None);
            }
        }
    }
}
