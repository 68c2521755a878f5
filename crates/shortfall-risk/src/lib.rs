//! # Shortfall Risk
//!
//! The rolling-window statistical kernel of the Shortfall workspace.
//!
//! This crate turns complete price histories into risk series:
//!
//! - **Deltas**: log returns over a fixed horizon, with cross-sectional
//!   basket averaging
//! - **Scenarios**: five-regime market classification from the historical
//!   dispersion of rolling average returns
//! - **Tail risk**: rolling historical VaR and Expected Shortfall
//!
//! All computations are look-ahead free: a day's window is the trailing
//! `window` observations excluding the day itself.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shortfall_risk::prelude::*;
//!
//! let deltas = log_returns(&prices, config.effective_lag())?;
//! let (labels, thresholds) = label_series(&deltas, config.window)?;
//! let tail = rolling_tail_risk(&deltas, &config)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod delta;
mod error;
pub mod scenario;
pub mod tail;

pub use error::{RiskError, RiskResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::delta::{basket_returns, log_returns, portfolio_returns};
    pub use crate::scenario::{
        label_series, rolling_mean, LabelSeries, Scenario, ScenarioThresholds,
    };
    pub use crate::tail::{
        expected_shortfall, historical_var, rolling_tail_risk, TailRiskSeries,
    };
    pub use crate::{RiskError, RiskResult};
}
