//! Error types for series and configuration construction.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while constructing series or configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Day and value vectors have different lengths.
    #[error("length mismatch: {days} days but {values} values")]
    LengthMismatch {
        /// Number of day entries.
        days: usize,
        /// Number of value entries.
        values: usize,
    },

    /// Days are not strictly increasing.
    #[error("unsorted days: {current} does not follow {previous}")]
    UnsortedDays {
        /// The day that broke the ordering.
        current: String,
        /// The day it should have followed.
        previous: String,
    },

    /// A value is NaN or infinite.
    #[error("non-finite value at position {position}")]
    NonFiniteValue {
        /// Index of the offending value.
        position: usize,
    },

    /// Invalid engine configuration.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::LengthMismatch { days: 3, values: 2 };
        assert!(err.to_string().contains("3 days"));

        let err = CoreError::invalid_config("window must be positive");
        assert!(err.to_string().contains("window must be positive"));
    }

    #[test]
    fn test_error_clone() {
        let err = CoreError::NonFiniteValue { position: 7 };
        assert_eq!(err.clone(), err);
    }
}
