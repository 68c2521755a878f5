//! Back-test record construction.
//!
//! Merges the four per-portfolio series (scenario labels, realized P&L,
//! VaR, ES) into one record per day, flagging the days where the realized
//! loss was worse than the estimated bound. A breach ("KO") means the P&L
//! fell *below* the (negative) risk threshold: `pnl < var`, `pnl < es`.
//!
//! The merge is a pure join keyed by day: a row is emitted only for days
//! present in every input, so a day with an undefined ES simply drops out
//! of the table. Missing values stay missing, never defaulted.

use crate::error::{BacktestError, BacktestResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shortfall_core::TimeSeries;
use shortfall_risk::scenario::{LabelSeries, Scenario};
use shortfall_risk::tail::TailRiskSeries;

/// One back-tested day for one portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestRow {
    /// Trading day.
    pub day: NaiveDate,
    /// Market-regime label for the day.
    pub scenario: Scenario,
    /// Realized P&L (the day's window return).
    pub pnl: f64,
    /// Historical VaR estimate for the day.
    pub var: f64,
    /// Historical ES estimate for the day.
    pub es: f64,
    /// True when the realized P&L fell below the VaR bound.
    pub var_breach: bool,
    /// True when the realized P&L fell below the ES bound.
    pub es_breach: bool,
}

impl BacktestRow {
    /// Loss in excess of the VaR bound; negative on breach days.
    #[must_use]
    pub fn var_excess(&self) -> f64 {
        self.pnl - self.var
    }

    /// Loss in excess of the ES bound; negative on breach days.
    #[must_use]
    pub fn es_excess(&self) -> f64 {
        self.pnl - self.es
    }
}

/// Day-ordered back-test records for one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestTable {
    rows: Vec<BacktestRow>,
}

impl BacktestTable {
    /// Builds a table directly from day-ordered rows.
    ///
    /// # Errors
    ///
    /// [`BacktestError::MisalignedSeries`] when the rows are not strictly
    /// ordered by day.
    pub fn from_rows(rows: Vec<BacktestRow>) -> BacktestResult<Self> {
        for pair in rows.windows(2) {
            if pair[1].day <= pair[0].day {
                return Err(BacktestError::misaligned(format!(
                    "rows out of day order at {}",
                    pair[1].day
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Number of back-tested days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The records, in day order.
    #[must_use]
    pub fn rows(&self) -> &[BacktestRow] {
        &self.rows
    }

    /// Number of VaR breach days across all scenarios.
    #[must_use]
    pub fn var_breach_count(&self) -> usize {
        self.rows.iter().filter(|r| r.var_breach).count()
    }

    /// Number of ES breach days across all scenarios.
    #[must_use]
    pub fn es_breach_count(&self) -> usize {
        self.rows.iter().filter(|r| r.es_breach).count()
    }
}

/// Merges labels, P&L and tail-risk estimates into a back-test table.
///
/// Iterates the VaR series (the narrowest full-window alignment) and keeps
/// the days for which a label, a P&L observation and an ES estimate all
/// exist.
///
/// # Errors
///
/// [`BacktestError::MisalignedSeries`] when any input is empty or the day
/// intersection is empty.
pub fn build_table(
    labels: &LabelSeries,
    deltas: &TimeSeries,
    tail: &TailRiskSeries,
) -> BacktestResult<BacktestTable> {
    if labels.is_empty() {
        return Err(BacktestError::misaligned("label series is empty"));
    }
    if deltas.is_empty() {
        return Err(BacktestError::misaligned("P&L series is empty"));
    }
    if tail.var.is_empty() {
        return Err(BacktestError::misaligned("VaR series is empty"));
    }
    if tail.es.is_empty() {
        return Err(BacktestError::misaligned("ES series is empty"));
    }

    let rows: Vec<BacktestRow> = tail
        .var
        .iter()
        .filter_map(|(day, var)| {
            let scenario = *labels.get(day)?;
            let pnl = *deltas.get(day)?;
            let es = *tail.es.get(day)?;
            Some(BacktestRow {
                day,
                scenario,
                pnl,
                var: *var,
                es,
                var_breach: pnl < *var,
                es_breach: pnl < es,
            })
        })
        .collect();

    if rows.is_empty() {
        return Err(BacktestError::misaligned(
            "series share no common days",
        ));
    }

    Ok(BacktestTable { rows })
}
