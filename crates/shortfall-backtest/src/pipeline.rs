//! Per-portfolio pipeline orchestration.
//!
//! Runs the full chain (deltas, scenario thresholds and labels, rolling
//! VaR/ES, back-test table, KPI summary) for one portfolio, and fans a
//! batch of portfolios out across threads when the `parallel` feature and
//! configuration allow. Portfolios are mutually independent: one
//! portfolio's failure is recorded in its slot of the batch report and
//! never aborts the others.

use crate::error::BacktestResult;
use crate::kpi::{summarize, KpiSummary};
use crate::table::{build_table, BacktestTable};
use shortfall_core::{maybe_parallel_map, PortfolioId, PortfolioSeries, RiskConfig, TimeSeries};
use shortfall_risk::delta::portfolio_returns;
use shortfall_risk::scenario::{label_series, LabelSeries, ScenarioThresholds};
use shortfall_risk::tail::{rolling_tail_risk, TailRiskSeries};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Complete result set for one portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioReport {
    /// Portfolio identifier.
    pub id: PortfolioId,
    /// Log-return series the risk measures were estimated from.
    pub deltas: TimeSeries,
    /// Scenario thresholds derived for the portfolio.
    pub thresholds: ScenarioThresholds,
    /// Daily scenario labels.
    pub labels: LabelSeries,
    /// Rolling VaR and ES series.
    pub tail: TailRiskSeries,
    /// Per-day back-test records.
    pub table: BacktestTable,
    /// Per-scenario KPI summary.
    pub summary: KpiSummary,
}

/// Batch outcome: per portfolio, either a complete result set or the
/// failure that excluded it. The caller decides whether to report, skip
/// or abort.
pub type BatchReport = BTreeMap<PortfolioId, BacktestResult<PortfolioReport>>;

/// Progress notification for one completed portfolio.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// The portfolio that just finished (successfully or not).
    pub portfolio: PortfolioId,
    /// Portfolios completed so far, this one included.
    pub completed: usize,
    /// Total portfolios in the batch.
    pub total: usize,
}

/// Runs the full pipeline for one portfolio.
///
/// Stages are strictly ordered; each consumes the prior stage's complete
/// output (threshold derivation needs the entire rolling-average history
/// before any label is assigned).
///
/// # Errors
///
/// Any kernel or merge error; see [`crate::BacktestError`].
pub fn run_portfolio(
    id: &PortfolioId,
    series: &PortfolioSeries,
    config: &RiskConfig,
) -> BacktestResult<PortfolioReport> {
    config.validate()?;

    debug!(portfolio = %id, kind = series.kind(), observations = series.observations(), "computing deltas");
    let deltas = portfolio_returns(series, config.effective_lag())?;

    debug!(portfolio = %id, deltas = deltas.len(), "classifying scenarios");
    let (labels, thresholds) = label_series(&deltas, config.window)?;

    debug!(portfolio = %id, "estimating rolling tail risk");
    let tail = rolling_tail_risk(&deltas, config)?;

    let table = build_table(&labels, &deltas, &tail)?;
    let summary = summarize(&table)?;
    debug!(portfolio = %id, rows = table.len(), "back-test complete");

    Ok(PortfolioReport {
        id: id.clone(),
        deltas,
        thresholds,
        labels,
        tail,
        table,
        summary,
    })
}

/// Runs a batch of portfolios, optionally in parallel.
///
/// Each portfolio either fully succeeds or is marked failed in its slot;
/// partial results are never mixed across portfolios.
pub fn run_batch(
    portfolios: &BTreeMap<PortfolioId, PortfolioSeries>,
    config: &RiskConfig,
) -> BatchReport {
    run_batch_with_progress(portfolios, config, |_| {})
}

/// Runs a batch, invoking `observer` after each portfolio completes.
///
/// The observer is the presentation hook: it receives a completion count
/// rather than mutating any global state, so callers can drive a progress
/// display without the engine knowing about one. It may be called from
/// worker threads when the batch runs in parallel.
pub fn run_batch_with_progress(
    portfolios: &BTreeMap<PortfolioId, PortfolioSeries>,
    config: &RiskConfig,
    observer: impl Fn(BatchProgress) + Sync,
) -> BatchReport {
    let entries: Vec<(&PortfolioId, &PortfolioSeries)> = portfolios.iter().collect();
    let total = entries.len();
    info!(portfolios = total, window = config.window, "running back-test batch");

    let completed = AtomicUsize::new(0);
    let results = maybe_parallel_map(&entries, config, |(id, series)| {
        let result = run_portfolio(id, series, config);
        if let Err(err) = &result {
            warn!(portfolio = %id, %err, "portfolio excluded from batch");
        }
        observer(BatchProgress {
            portfolio: (*id).clone(),
            completed: completed.fetch_add(1, Ordering::Relaxed) + 1,
            total,
        });
        ((*id).clone(), result)
    });

    results.into_iter().collect()
}
