//! Market-regime scenario classification.
//!
//! Each trading day is bucketed into one of five regimes based on where the
//! trailing window's average return sits in the historical distribution of
//! window-average returns (assuming normality):
//!
//! - **Boom**: beyond two standard deviations above the mean (~2% of days)
//! - **Positive**: between one and two standard deviations above (~14%)
//! - **Neutral**: within one standard deviation of the mean (~68%)
//! - **Negative**: between one and two standard deviations below (~14%)
//! - **Stressed**: beyond two standard deviations below the mean (~2%)
//!
//! Classification is a two-pass process: pass one builds the rolling-average
//! series (look-ahead free), pass two derives the thresholds from that
//! series' entire history. Thresholds are computed once per portfolio and
//! never mutated.

use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use shortfall_core::{Series, TimeSeries};
use statrs::statistics::Statistics;

/// A day-indexed series of scenario labels.
pub type LabelSeries = Series<Scenario>;

/// Market-regime bucket for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Window return beyond two positive standard deviations.
    Boom,
    /// Window return between one and two positive standard deviations.
    Positive,
    /// Window return within one standard deviation of the mean.
    Neutral,
    /// Window return between one and two negative standard deviations.
    Negative,
    /// Window return beyond two negative standard deviations.
    Stressed,
}

impl Scenario {
    /// All scenarios, from best to worst regime.
    pub const ALL: [Scenario; 5] = [
        Scenario::Boom,
        Scenario::Positive,
        Scenario::Neutral,
        Scenario::Negative,
        Scenario::Stressed,
    ];

    /// Returns a human-readable name for the scenario.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boom => "Boom",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::Stressed => "Stressed",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scenario thresholds for one portfolio.
///
/// Derived once from the full history of the rolling-average-return series:
/// `boom = mean + 2σ`, `positive = mean + σ`, `negative = mean - σ`,
/// `stressed = mean - 2σ`, with σ the corrected sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioThresholds {
    /// Mean of the rolling-average-return history.
    pub mean: f64,
    /// Corrected sample standard deviation of that history.
    pub sigma: f64,
    /// Lower bound of the Boom regime (`mean + 2σ`).
    pub boom: f64,
    /// Lower bound of the Positive regime (`mean + σ`).
    pub positive: f64,
    /// Upper bound of the Negative regime (`mean - σ`).
    pub negative: f64,
    /// Upper bound of the Stressed regime (`mean - 2σ`).
    pub stressed: f64,
}

impl ScenarioThresholds {
    /// Derives thresholds from a rolling-average-return history.
    ///
    /// A single-observation history has undefined sample dispersion; σ is
    /// taken as zero, collapsing all thresholds onto the mean.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] for an empty history.
    pub fn from_history(rolling: &[f64]) -> RiskResult<Self> {
        if rolling.is_empty() {
            return Err(RiskError::invalid_input(
                "empty rolling-average history",
            ));
        }
        let mean = rolling.mean();
        let sigma = if rolling.len() < 2 {
            0.0
        } else {
            rolling.std_dev()
        };
        Ok(Self {
            mean,
            sigma,
            boom: mean + 2.0 * sigma,
            positive: mean + sigma,
            negative: mean - sigma,
            stressed: mean - 2.0 * sigma,
        })
    }

    /// True when the history had zero variance and the thresholds collapsed
    /// onto the mean.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.sigma <= 0.0
    }

    /// Classifies one window-average return.
    ///
    /// Evaluated top-down, first match wins; `stressed` is checked before
    /// `negative` so the extreme left tail is never softened to Negative.
    /// Collapsed thresholds cannot discriminate: every observation, all of
    /// which equal the mean, routes to Neutral.
    #[must_use]
    pub fn classify(&self, val: f64) -> Scenario {
        if self.is_degenerate() {
            return Scenario::Neutral;
        }
        if val >= self.boom {
            Scenario::Boom
        } else if val >= self.positive {
            Scenario::Positive
        } else if val <= self.stressed {
            Scenario::Stressed
        } else if val <= self.negative {
            Scenario::Negative
        } else {
            Scenario::Neutral
        }
    }
}

/// Computes the rolling average return series.
///
/// For every day `i >= window`, the mean of `deltas[i - window, i)`; the
/// current day is excluded, so no look-ahead. Output length is the input
/// length minus `window`.
///
/// # Errors
///
/// - [`RiskError::InvalidInput`] if `window` is zero
/// - [`RiskError::InsufficientHistory`] if the output would be empty
pub fn rolling_mean(deltas: &TimeSeries, window: usize) -> RiskResult<TimeSeries> {
    if window == 0 {
        return Err(RiskError::invalid_input("window must be at least 1"));
    }
    if deltas.len() < window + 1 {
        return Err(RiskError::InsufficientHistory {
            window,
            observations: deltas.len(),
        });
    }

    let values = deltas.values();
    let averages: Vec<f64> = (window..deltas.len())
        .map(|i| values[i - window..i].iter().sum::<f64>() / window as f64)
        .collect();
    let days = deltas.days()[window..].to_vec();

    Ok(TimeSeries::new(days, averages)?)
}

/// Labels every day of a delta series with its market regime.
///
/// Runs both classification passes: the rolling-average series over `window`
/// days, then threshold derivation over that series' entire history, then
/// the per-day labeling. Returns the labels together with the thresholds
/// that produced them.
///
/// # Errors
///
/// [`RiskError::InsufficientHistory`] when the delta series is shorter than
/// `window + 1` days (zero valid rolling-average observations); such a
/// portfolio is excluded downstream.
pub fn label_series(
    deltas: &TimeSeries,
    window: usize,
) -> RiskResult<(LabelSeries, ScenarioThresholds)> {
    let rolling = rolling_mean(deltas, window)?;
    let thresholds = ScenarioThresholds::from_history(rolling.values())?;
    let labels = rolling.map(|avg| thresholds.classify(*avg));
    Ok((labels, thresholds))
}
