//! Error types for back-testing and KPI aggregation.

use shortfall_core::CoreError;
use shortfall_risk::RiskError;
use thiserror::Error;

/// Result type for back-test operations.
pub type BacktestResult<T> = Result<T, BacktestError>;

/// Errors that can occur during back-testing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    /// Inputs to the back-test merge have incompatible day indices.
    #[error("misaligned series: {reason}")]
    MisalignedSeries {
        /// Why the series could not be joined.
        reason: String,
    },

    /// The back-test table holds no rows.
    #[error("empty back-test table")]
    EmptyTable,

    /// Failure in the statistical kernel.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Series or configuration construction failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BacktestError {
    /// Create a misaligned series error.
    #[must_use]
    pub fn misaligned(reason: impl Into<String>) -> Self {
        Self::MisalignedSeries {
            reason: reason.into(),
        }
    }
}
