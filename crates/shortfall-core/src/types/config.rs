//! Configuration for the risk back-testing engine.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Default rolling window: 500 trading days, roughly two years.
pub const DEFAULT_WINDOW: usize = 500;

/// Default confidence level for VaR and ES.
pub const DEFAULT_CONFIDENCE: f64 = 0.99;

/// Configuration shared by every stage of the engine.
///
/// The same `window` drives scenario classification, tail-risk estimation and
/// back-test alignment; using different values per stage would break the day
/// alignment between their outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Rolling window size in trading days.
    pub window: usize,

    /// Confidence level for VaR/ES, strictly between 0 and 1.
    pub confidence: f64,

    /// Return-computation horizon in days.
    ///
    /// `None` means "same as `window`", the reference pipeline convention.
    pub lag: Option<usize>,

    /// Enable parallel batch processing (requires the 'parallel' feature).
    pub parallel: bool,

    /// Minimum portfolio count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            confidence: DEFAULT_CONFIDENCE,
            lag: None,
            parallel: true,
            parallel_threshold: 4,
        }
    }
}

impl RiskConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always processes portfolios sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the rolling window size.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the return-computation horizon.
    #[must_use]
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = Some(lag);
        self
    }

    /// Sets whether to use parallel batch processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The return horizon actually in effect.
    #[must_use]
    pub fn effective_lag(&self) -> usize {
        self.lag.unwrap_or(self.window)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] when the window or lag is zero,
    /// or the confidence level is outside `(0, 1)`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.window == 0 {
            return Err(CoreError::invalid_config("window must be at least 1"));
        }
        if self.effective_lag() == 0 {
            return Err(CoreError::invalid_config("lag must be at least 1"));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(CoreError::invalid_config(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Returns true if parallel processing should be used for `count` portfolios.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}
