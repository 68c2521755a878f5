//! Core types: series, portfolio inputs, configuration.

mod config;
mod portfolio;
mod series;

pub use config::{RiskConfig, DEFAULT_CONFIDENCE, DEFAULT_WINDOW};
pub use portfolio::{PortfolioId, PortfolioSeries};
pub use series::{Series, TimeSeries};
