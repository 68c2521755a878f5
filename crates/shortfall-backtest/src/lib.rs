//! # Shortfall Backtest
//!
//! Back-testing and KPI aggregation for the Shortfall risk engine.
//!
//! This crate takes the statistical kernel's outputs and answers the
//! question the whole pipeline exists for: *how often is each risk measure
//! breached, and by how much, under each market regime?*
//!
//! - **Back-test table**: one record per day per portfolio, merging the
//!   scenario label, realized P&L, VaR and ES, with breach flags
//! - **KPI summary**: breach rate, longest consecutive-breach run and worst
//!   excess loss, per scenario and per portfolio
//! - **Pipeline**: the full per-portfolio chain, fanned out across
//!   portfolios when the `parallel` feature is enabled
//!
//! ## Example
//!
//! ```rust,ignore
//! use shortfall_backtest::prelude::*;
//! use shortfall_core::prelude::*;
//!
//! let config = RiskConfig::new().with_window(250).with_lag(1);
//! let report = run_batch(&portfolios, &config);
//! for (id, outcome) in &report {
//!     match outcome {
//!         Ok(result) => println!("{id}: {:.2}% VaR KOs", result.summary.overall_pct_ko_var()),
//!         Err(err) => eprintln!("{id}: excluded ({err})"),
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: enable rayon-based fan-out across portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

mod error;
pub mod kpi;
pub mod pipeline;
pub mod table;

pub use error::{BacktestError, BacktestResult};
pub use kpi::{summarize, KpiSummary, ScenarioKpis};
pub use pipeline::{
    run_batch, run_batch_with_progress, run_portfolio, BatchProgress, BatchReport,
    PortfolioReport,
};
pub use table::{build_table, BacktestRow, BacktestTable};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{BacktestError, BacktestResult};
    pub use crate::kpi::{summarize, KpiSummary, ScenarioKpis};
    pub use crate::pipeline::{
        run_batch, run_batch_with_progress, run_portfolio, BatchProgress, BatchReport,
        PortfolioReport,
    };
    pub use crate::table::{build_table, BacktestRow, BacktestTable};
    pub use shortfall_risk::scenario::Scenario;
}
