//! Day-indexed series.
//!
//! [`Series`] is the single series representation used across the workspace:
//! prices, log-return deltas, rolling averages, VaR/ES estimates and scenario
//! labels are all day-keyed, strictly ordered and gap-free by construction.
//! Rolling computations are positional over the ordered values; the days are
//! labels and join keys only.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ordered, day-indexed series of values.
///
/// Invariants (enforced at construction):
/// - days are strictly increasing,
/// - there is exactly one value per day.
///
/// Series may be empty; an empty series joins with nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<T> {
    days: Vec<NaiveDate>,
    values: Vec<T>,
}

/// A day-indexed series of `f64` observations (prices, returns, risk estimates).
pub type TimeSeries = Series<f64>;

impl<T> Series<T> {
    /// Creates a series from parallel day and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LengthMismatch`] if the vectors differ in length,
    /// or [`CoreError::UnsortedDays`] if the days are not strictly increasing.
    pub fn new(days: Vec<NaiveDate>, values: Vec<T>) -> CoreResult<Self> {
        if days.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                days: days.len(),
                values: values.len(),
            });
        }
        for pair in days.windows(2) {
            if pair[1] <= pair[0] {
                return Err(CoreError::UnsortedDays {
                    current: pair[1].to_string(),
                    previous: pair[0].to_string(),
                });
            }
        }
        Ok(Self { days, values })
    }

    /// Creates a series from `(day, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsortedDays`] if the days are not strictly
    /// increasing.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, T)>) -> CoreResult<Self> {
        let (days, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(days, values)
    }

    /// Creates an empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            days: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The ordered days.
    #[must_use]
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// The values, in day order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// First day, if any.
    #[must_use]
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Last day, if any.
    #[must_use]
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Looks up the value observed on `day`.
    ///
    /// Binary search over the ordered day index.
    #[must_use]
    pub fn get(&self, day: NaiveDate) -> Option<&T> {
        self.days
            .binary_search(&day)
            .ok()
            .map(|idx| &self.values[idx])
    }

    /// Returns true if an observation exists for `day`.
    #[must_use]
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.days.binary_search(&day).is_ok()
    }

    /// Iterates over `(day, value)` pairs in day order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &T)> {
        self.days.iter().copied().zip(self.values.iter())
    }

    /// Maps the values, keeping the day index.
    ///
    /// The ordering invariant is preserved, so no re-validation is needed.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Series<U> {
        Series {
            days: self.days.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }
}

impl TimeSeries {
    /// Verifies that every observation is a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NonFiniteValue`] with the offending position.
    pub fn ensure_finite(&self) -> CoreResult<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(position) => Err(CoreError::NonFiniteValue { position }),
            None => Ok(()),
        }
    }
}
