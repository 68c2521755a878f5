//! Per-scenario KPI aggregation.
//!
//! Condenses a back-test table into six KPIs per `(portfolio, scenario)`
//! cell: breach rates, longest consecutive-breach runs and worst excess
//! losses, for VaR and ES each.
//!
//! Breach percentages are taken against the portfolio's *total* day count,
//! not the scenario's own day count, so the five percentages are comparable
//! across scenarios and sum to the portfolio's overall breach rate.

use crate::error::{BacktestError, BacktestResult};
use crate::table::{BacktestRow, BacktestTable};
use serde::{Deserialize, Serialize};
use shortfall_risk::scenario::Scenario;
use std::collections::BTreeMap;

/// Breach KPIs for one `(portfolio, scenario)` cell.
///
/// Streak and excess-loss cells are `None` when the scenario saw no
/// breaches (including when it saw no observations at all); percentages
/// are zero in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioKpis {
    /// Number of back-tested days labeled with this scenario.
    pub observations: usize,

    /// VaR breach days as a percentage of the portfolio's total days.
    pub pct_ko_var: f64,

    /// ES breach days as a percentage of the portfolio's total days.
    pub pct_ko_es: f64,

    /// Longest run of consecutive VaR breach days within this scenario.
    pub max_streak_var: Option<u32>,

    /// Longest run of consecutive ES breach days within this scenario.
    pub max_streak_es: Option<u32>,

    /// Most negative `pnl - var` among VaR breach days.
    pub worst_excess_var: Option<f64>,

    /// Most negative `pnl - es` among ES breach days.
    pub worst_excess_es: Option<f64>,
}

/// KPI summary for one portfolio: one [`ScenarioKpis`] per scenario.
///
/// All five scenarios are always present, with zero percentages and
/// undefined streak/excess cells where a scenario never occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Total back-tested days for the portfolio, across all scenarios.
    pub total_days: usize,

    by_scenario: BTreeMap<Scenario, ScenarioKpis>,
}

impl KpiSummary {
    /// The KPI cell for one scenario.
    ///
    /// # Panics
    ///
    /// Never panics for summaries produced by [`summarize`]: all five
    /// scenarios are present.
    #[must_use]
    pub fn scenario(&self, scenario: Scenario) -> &ScenarioKpis {
        &self.by_scenario[&scenario]
    }

    /// Iterates the cells in scenario order.
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &ScenarioKpis)> {
        self.by_scenario.iter().map(|(s, k)| (*s, k))
    }

    /// Overall VaR breach rate for the portfolio, in percent.
    ///
    /// Equals the sum of the per-scenario percentages, since they share the
    /// total-day denominator.
    #[must_use]
    pub fn overall_pct_ko_var(&self) -> f64 {
        self.by_scenario.values().map(|k| k.pct_ko_var).sum()
    }

    /// Overall ES breach rate for the portfolio, in percent.
    #[must_use]
    pub fn overall_pct_ko_es(&self) -> f64 {
        self.by_scenario.values().map(|k| k.pct_ko_es).sum()
    }
}

/// Longest run of consecutive breaches in a day-ordered breach sequence.
///
/// The count resets on every non-breach day and the maximum reached is
/// reported.
fn max_breach_streak(breaches: impl Iterator<Item = bool>) -> u32 {
    let mut current = 0u32;
    let mut max = 0u32;
    for breached in breaches {
        if breached {
            current += 1;
            max = max.max(current);
        } else {
            current = 0;
        }
    }
    max
}

/// Most negative excess loss over the breaching rows of a scenario.
fn worst_excess(
    rows: &[&BacktestRow],
    breached: impl Fn(&BacktestRow) -> bool,
    excess: impl Fn(&BacktestRow) -> f64,
) -> Option<f64> {
    rows.iter()
        .copied()
        .filter(|r| breached(r))
        .map(excess)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Aggregates a back-test table into per-scenario KPIs.
///
/// The streaks are computed over each scenario's rows in day order: a
/// breach run is broken by a non-breach day *within the same scenario*,
/// while days labeled with other scenarios in between are not counted
/// either way.
///
/// # Errors
///
/// [`BacktestError::EmptyTable`] for a table with no rows.
pub fn summarize(table: &BacktestTable) -> BacktestResult<KpiSummary> {
    if table.is_empty() {
        return Err(BacktestError::EmptyTable);
    }
    let total_days = table.len();

    let mut by_scenario = BTreeMap::new();
    for scenario in Scenario::ALL {
        let rows: Vec<&BacktestRow> = table
            .rows()
            .iter()
            .filter(|r| r.scenario == scenario)
            .collect();

        let var_breaches = rows.iter().filter(|r| r.var_breach).count();
        let es_breaches = rows.iter().filter(|r| r.es_breach).count();

        let max_streak_var = (var_breaches > 0)
            .then(|| max_breach_streak(rows.iter().map(|r| r.var_breach)));
        let max_streak_es =
            (es_breaches > 0).then(|| max_breach_streak(rows.iter().map(|r| r.es_breach)));

        by_scenario.insert(
            scenario,
            ScenarioKpis {
                observations: rows.len(),
                pct_ko_var: var_breaches as f64 / total_days as f64 * 100.0,
                pct_ko_es: es_breaches as f64 / total_days as f64 * 100.0,
                max_streak_var,
                max_streak_es,
                worst_excess_var: worst_excess(&rows, |r| r.var_breach, BacktestRow::var_excess),
                worst_excess_es: worst_excess(&rows, |r| r.es_breach, BacktestRow::es_excess),
            },
        );
    }

    Ok(KpiSummary {
        total_days,
        by_scenario,
    })
}
