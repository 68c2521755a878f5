//! Log-return delta computation.
//!
//! Converts price histories into `n`-day log-return series:
//! `delta[i] = ln(price[i]) - ln(price[i - lag])`. The first `lag` entries
//! have no defined delta and are dropped, so the output is exactly `lag`
//! observations shorter than the input.
//!
//! Multi-constituent baskets are reduced to a single return series by taking
//! the cross-sectional mean of the constituent deltas at each day.

use crate::error::{RiskError, RiskResult};
use shortfall_core::{PortfolioSeries, TimeSeries};

/// Computes `lag`-day log returns for a price series.
///
/// # Errors
///
/// - [`RiskError::InvalidInput`] if `lag` is zero or a price is not strictly
///   positive (the log return would be undefined)
/// - [`RiskError::InsufficientData`] if the series has fewer than `lag + 1`
///   observations
pub fn log_returns(prices: &TimeSeries, lag: usize) -> RiskResult<TimeSeries> {
    if lag == 0 {
        return Err(RiskError::invalid_input("lag must be at least 1"));
    }
    prices.ensure_finite()?;
    if let Some(pos) = prices.values().iter().position(|p| *p <= 0.0) {
        return Err(RiskError::invalid_input(format!(
            "non-positive price at position {pos}"
        )));
    }
    if prices.len() < lag + 1 {
        return Err(RiskError::InsufficientData {
            required: lag + 1,
            actual: prices.len(),
        });
    }

    let values = prices.values();
    let deltas: Vec<f64> = (lag..prices.len())
        .map(|i| values[i].ln() - values[i - lag].ln())
        .collect();
    let days = prices.days()[lag..].to_vec();

    Ok(TimeSeries::new(days, deltas)?)
}

/// Computes basket returns: per-constituent log returns reduced by the
/// cross-sectional mean at each day.
///
/// All constituents must share the same day index; complete, aligned series
/// are the caller's responsibility (gap-filling is out of scope).
///
/// # Errors
///
/// - [`RiskError::InvalidInput`] for an empty basket or date-misaligned
///   constituents
/// - Any error from [`log_returns`] on a constituent
pub fn basket_returns(constituents: &[TimeSeries], lag: usize) -> RiskResult<TimeSeries> {
    if constituents.is_empty() {
        return Err(RiskError::invalid_input("basket has no constituents"));
    }

    let delta_series: Vec<TimeSeries> = constituents
        .iter()
        .map(|series| log_returns(series, lag))
        .collect::<RiskResult<_>>()?;

    let first = &delta_series[0];
    for (idx, other) in delta_series.iter().enumerate().skip(1) {
        if other.days() != first.days() {
            return Err(RiskError::invalid_input(format!(
                "constituent {idx} is not date-aligned with constituent 0"
            )));
        }
    }

    let count = delta_series.len() as f64;
    let averaged: Vec<f64> = (0..first.len())
        .map(|i| {
            delta_series
                .iter()
                .map(|series| series.values()[i])
                .sum::<f64>()
                / count
        })
        .collect();

    Ok(TimeSeries::new(first.days().to_vec(), averaged)?)
}

/// Computes the single return series for a portfolio input.
///
/// Pre-computed deltas pass through untouched (after finiteness validation);
/// prices and baskets go through [`log_returns`] / [`basket_returns`].
///
/// # Errors
///
/// See [`log_returns`] and [`basket_returns`].
pub fn portfolio_returns(input: &PortfolioSeries, lag: usize) -> RiskResult<TimeSeries> {
    match input {
        PortfolioSeries::Prices(prices) => log_returns(prices, lag),
        PortfolioSeries::PriceBasket(constituents) => basket_returns(constituents, lag),
        PortfolioSeries::Deltas(deltas) => {
            deltas.ensure_finite()?;
            Ok(deltas.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let days = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        TimeSeries::new(days, values.to_vec()).unwrap()
    }

    #[test]
    fn test_output_length() {
        let prices = series(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        for lag in 1..=4 {
            let deltas = log_returns(&prices, lag).unwrap();
            assert_eq!(deltas.len(), prices.len() - lag);
        }
    }

    #[test]
    fn test_log_return_values() {
        let prices = series(&[100.0, 110.0, 121.0]);
        let deltas = log_returns(&prices, 1).unwrap();
        assert_relative_eq!(deltas.values()[0], (110.0_f64 / 100.0).ln(), epsilon = 1e-12);
        assert_relative_eq!(deltas.values()[1], (121.0_f64 / 110.0).ln(), epsilon = 1e-12);

        // Two-day horizon spans both moves.
        let deltas = log_returns(&prices, 2).unwrap();
        assert_relative_eq!(deltas.values()[0], (121.0_f64 / 100.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_days_shift_by_lag() {
        let prices = series(&[100.0, 101.0, 102.0]);
        let deltas = log_returns(&prices, 1).unwrap();
        assert_eq!(deltas.days(), &prices.days()[1..]);
    }

    #[test]
    fn test_too_short() {
        let prices = series(&[100.0, 101.0]);
        let err = log_returns(&prices, 2).unwrap_err();
        assert_eq!(
            err,
            RiskError::InsufficientData {
                required: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_zero_lag_rejected() {
        let prices = series(&[100.0, 101.0]);
        assert!(matches!(
            log_returns(&prices, 0).unwrap_err(),
            RiskError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let prices = series(&[100.0, 0.0, 101.0]);
        assert!(matches!(
            log_returns(&prices, 1).unwrap_err(),
            RiskError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_basket_mean() {
        // One constituent up 10%, one down 10% (in log space they average
        // to the mean of the two log returns).
        let up = series(&[100.0, 110.0]);
        let down = series(&[100.0, 90.0]);
        let deltas = basket_returns(&[up, down], 1).unwrap();
        let expected = ((110.0_f64 / 100.0).ln() + (90.0_f64 / 100.0).ln()) / 2.0;
        assert_relative_eq!(deltas.values()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_basket() {
        assert!(matches!(
            basket_returns(&[], 1).unwrap_err(),
            RiskError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_misaligned_basket() {
        let a = series(&[100.0, 101.0, 102.0]);
        let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let days = (0..3).map(|i| start + chrono::Days::new(i)).collect();
        let b = TimeSeries::new(days, vec![100.0, 101.0, 102.0]).unwrap();

        assert!(matches!(
            basket_returns(&[a, b], 1).unwrap_err(),
            RiskError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_portfolio_returns_dispatch() {
        let prices = series(&[100.0, 110.0]);
        let from_prices =
            portfolio_returns(&PortfolioSeries::Prices(prices.clone()), 1).unwrap();
        assert_eq!(from_prices.len(), 1);

        let deltas = series(&[0.01, -0.02]);
        let passthrough = portfolio_returns(&PortfolioSeries::Deltas(deltas.clone()), 1).unwrap();
        assert_eq!(passthrough, deltas);

        let from_basket =
            portfolio_returns(&PortfolioSeries::PriceBasket(vec![prices]), 1).unwrap();
        assert_eq!(from_basket, from_prices);
    }
}
