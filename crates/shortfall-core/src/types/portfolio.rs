//! Portfolio identifiers and input series.

use crate::types::series::TimeSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Portfolio identifier.
///
/// The engine treats identifiers as opaque; presentation order is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioId(String);

impl PortfolioId {
    /// Creates a new portfolio identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortfolioId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PortfolioId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Market history backing one portfolio.
///
/// Whatever the variant, the series must be complete (no missing days within
/// its own range); gap-filling happens upstream and is out of scope here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortfolioSeries {
    /// A single price series (e.g. an index as a fully-diversified proxy).
    Prices(TimeSeries),

    /// Per-constituent price series for an n-stock basket.
    ///
    /// Constituent returns are reduced to one series by cross-sectional
    /// averaging; all constituents must share the same day index.
    PriceBasket(Vec<TimeSeries>),

    /// Pre-computed log returns, used as-is.
    Deltas(TimeSeries),
}

impl PortfolioSeries {
    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Prices(_) => "prices",
            Self::PriceBasket(_) => "price basket",
            Self::Deltas(_) => "deltas",
        }
    }

    /// Number of observations in the underlying history.
    ///
    /// For a basket this is the length of the (shared) constituent index, or
    /// zero when the basket is empty.
    #[must_use]
    pub fn observations(&self) -> usize {
        match self {
            Self::Prices(series) | Self::Deltas(series) => series.len(),
            Self::PriceBasket(constituents) => {
                constituents.first().map_or(0, super::series::Series::len)
            }
        }
    }
}
