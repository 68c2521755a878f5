//! Error types for the statistical kernel.

use shortfall_core::CoreError;
use thiserror::Error;

/// Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during delta, scenario or tail-risk calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Series too short for the requested lag or window.
    #[error("insufficient data: {required} observations required, {actual} available")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations actually available.
        actual: usize,
    },

    /// No valid rolling-average observations to derive thresholds from.
    #[error(
        "insufficient history: window of {window} leaves no rolling-average \
         observations out of {observations} deltas"
    )]
    InsufficientHistory {
        /// The rolling window size.
        window: usize,
        /// Number of delta observations available.
        observations: usize,
    },

    /// No observations beyond the VaR rank; the ES tail is empty.
    #[error("undefined tail: no observations beyond rank {rank} in a window of {window}")]
    UndefinedTail {
        /// The VaR rank in the descending-sorted window.
        rank: usize,
        /// The window size.
        window: usize,
    },

    /// Invalid input parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Series or configuration construction failure.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl RiskError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::InsufficientData {
            required: 501,
            actual: 300,
        };
        assert!(err.to_string().contains("501"));
        assert!(err.to_string().contains("300"));

        let err = RiskError::UndefinedTail {
            rank: 20,
            window: 21,
        };
        assert!(err.to_string().contains("rank 20"));
    }

    #[test]
    fn test_from_core() {
        let core = CoreError::invalid_config("confidence must be in (0, 1), got 2");
        let err: RiskError = core.into();
        assert!(matches!(err, RiskError::Core(_)));
    }
}
