//! # Shortfall Core
//!
//! Core types for the Shortfall risk back-testing workspace.
//!
//! This crate provides the foundational building blocks used throughout
//! Shortfall:
//!
//! - **Series**: day-indexed, strictly ordered, gap-free observation series
//! - **Portfolio inputs**: prices, constituent baskets, pre-computed returns
//! - **Configuration**: rolling window, confidence level, return horizon
//! - **Parallel helpers**: config-driven conditional rayon iteration
//!
//! ## Design Philosophy
//!
//! - **Validated at the boundary**: series invariants (ordering, finiteness)
//!   are checked at construction so the statistical kernel never re-checks
//! - **Pure data**: no statistics and no I/O live here
//!
//! ## Example
//!
//! ```rust,ignore
//! use shortfall_core::prelude::*;
//!
//! let config = RiskConfig::new().with_window(250).with_confidence(0.95);
//! let prices = TimeSeries::from_pairs(observations)?;
//! let input = PortfolioSeries::Prices(prices);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod parallel;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use parallel::maybe_parallel_map;
pub use types::{
    PortfolioId, PortfolioSeries, RiskConfig, Series, TimeSeries, DEFAULT_CONFIDENCE,
    DEFAULT_WINDOW,
};

/// Prelude for convenient imports.
///
/// ```rust,ignore
/// use shortfall_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::parallel::maybe_parallel_map;
    pub use crate::types::{PortfolioId, PortfolioSeries, RiskConfig, Series, TimeSeries};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let err = CoreError::invalid_config("window must be at least 1");
        assert!(err.to_string().contains("window"));
    }
}
