//! Rolling historical VaR and Expected Shortfall.
//!
//! For each day with a full trailing window, the estimator sorts the window's
//! returns best-first and reads the tail:
//!
//! - **VaR** at confidence `c` is the value at rank `round(window * c)`
//!   (0-indexed) of the descending-sorted window; roughly `1 - c` of the
//!   observations are worse.
//! - **ES** is the mean of all values strictly beyond the VaR rank, the
//!   average of the tail worse than VaR. When that tail is empty the ES for
//!   the day is undefined and propagates as a missing value.
//!
//! The window is `deltas[i - window, i)`: the most recent `window`
//! observations excluding day `i` itself, so there is no look-ahead. Each day
//! re-sorts its window; an incremental sorted structure would cut the cost to
//! `O(log window)` per day but is not used in this revision.

use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use shortfall_core::{RiskConfig, TimeSeries};
use std::cmp::Ordering;

/// Rolling VaR and ES series for one portfolio.
///
/// Both series start at the first day with a full trailing window, exactly
/// `window` entries shorter than the delta series that produced them. VaR is
/// defined on every such day; the ES series may have holes where the tail
/// beyond the VaR rank was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailRiskSeries {
    /// Historical VaR per day.
    pub var: TimeSeries,
    /// Historical ES per day; days with an undefined tail are absent.
    pub es: TimeSeries,
}

/// Rounds half-way cases to the nearest even integer.
///
/// `f64::round` rounds half away from zero, which would pick a different
/// quantile rank for exact half-way values of `window * confidence`.
#[must_use]
pub fn round_half_to_even(x: f64) -> f64 {
    let floor = x.floor();
    let frac = x - floor;
    match frac.partial_cmp(&0.5) {
        Some(Ordering::Greater) => floor + 1.0,
        Some(Ordering::Less) => floor,
        // Exactly half-way: take the even neighbour.
        _ => {
            if (floor as i64) % 2 == 0 {
                floor
            } else {
                floor + 1.0
            }
        }
    }
}

/// The VaR rank for a window of the given size: `round(window * confidence)`,
/// 0-indexed into the descending-sorted window.
///
/// `round(window * confidence)` can reach `window` when the confidence level
/// is close to 1; the rank is clamped to the worst observation.
#[must_use]
pub fn var_rank(window: usize, confidence: f64) -> usize {
    let rank = round_half_to_even(window as f64 * confidence) as usize;
    rank.min(window.saturating_sub(1))
}

/// Sorts a window of returns descending (best first).
fn sorted_descending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    sorted
}

/// Reads VaR and ES off a descending-sorted window.
///
/// Returns `(var, es)` where `es` is `None` when no observation lies beyond
/// the VaR rank.
fn tail_from_sorted(sorted: &[f64], rank: usize) -> (f64, Option<f64>) {
    let var = sorted[rank];
    let tail = &sorted[rank + 1..];
    let es = if tail.is_empty() {
        None
    } else {
        Some(tail.iter().sum::<f64>() / tail.len() as f64)
    };
    (var, es)
}

fn validate_confidence(confidence: f64) -> RiskResult<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(RiskError::invalid_input(format!(
            "confidence must be in (0, 1), got {confidence}"
        )))
    }
}

/// Historical VaR for a single window of returns.
///
/// # Errors
///
/// [`RiskError::InvalidInput`] for an empty window or a confidence level
/// outside `(0, 1)`.
pub fn historical_var(window_returns: &[f64], confidence: f64) -> RiskResult<f64> {
    validate_confidence(confidence)?;
    if window_returns.is_empty() {
        return Err(RiskError::invalid_input("empty window"));
    }
    let sorted = sorted_descending(window_returns);
    let rank = var_rank(sorted.len(), confidence);
    Ok(tail_from_sorted(&sorted, rank).0)
}

/// Historical ES for a single window of returns: the mean of all
/// observations strictly worse than the VaR rank.
///
/// # Errors
///
/// - [`RiskError::InvalidInput`] for an empty window or a confidence level
///   outside `(0, 1)`
/// - [`RiskError::UndefinedTail`] when no observation lies beyond the VaR
///   rank (window too small relative to the confidence level)
pub fn expected_shortfall(window_returns: &[f64], confidence: f64) -> RiskResult<f64> {
    validate_confidence(confidence)?;
    if window_returns.is_empty() {
        return Err(RiskError::invalid_input("empty window"));
    }
    let sorted = sorted_descending(window_returns);
    let rank = var_rank(sorted.len(), confidence);
    tail_from_sorted(&sorted, rank).1.ok_or(RiskError::UndefinedTail {
        rank,
        window: sorted.len(),
    })
}

/// Computes rolling historical VaR and ES over a delta series.
///
/// Output series are aligned to days with a full trailing window; both are
/// exactly `config.window` entries shorter than the input, with ES days
/// additionally dropped wherever the tail was undefined. Undefined ES days
/// are missing values, never zeros.
///
/// # Errors
///
/// - [`RiskError::Core`] when the configuration fails validation
/// - [`RiskError::InsufficientData`] when no day has a full trailing window
pub fn rolling_tail_risk(deltas: &TimeSeries, config: &RiskConfig) -> RiskResult<TailRiskSeries> {
    config.validate()?;
    let window = config.window;
    if deltas.len() < window + 1 {
        return Err(RiskError::InsufficientData {
            required: window + 1,
            actual: deltas.len(),
        });
    }

    let rank = var_rank(window, config.confidence);
    let values = deltas.values();
    let days = deltas.days();

    let mut var_pairs = Vec::with_capacity(deltas.len() - window);
    let mut es_pairs = Vec::with_capacity(deltas.len() - window);
    for i in window..deltas.len() {
        let sorted = sorted_descending(&values[i - window..i]);
        let (var, es) = tail_from_sorted(&sorted, rank);
        var_pairs.push((days[i], var));
        if let Some(es) = es {
            es_pairs.push((days[i], es));
        }
    }

    Ok(TailRiskSeries {
        var: TimeSeries::from_pairs(var_pairs)?,
        es: TimeSeries::from_pairs(es_pairs)?,
    })
}
