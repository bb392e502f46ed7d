//! Session configuration.

use std::ops::RangeInclusive;

use polyproc_poly::MAX_MAGNITUDE;

/// Configuration for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Capacity of the polynomials the session creates.
    pub capacity: usize,
    /// Highest exponent accepted when editing a coefficient.
    pub max_magnitude: usize,
    /// Integer points at which [`Session::sample`](crate::Session::sample) evaluates.
    pub plot_domain: RangeInclusive<i64>,
    /// Minimum number of sample points before evaluation is spread over rayon.
    pub parallel_threshold: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_MAGNITUDE + 1,
            max_magnitude: MAX_MAGNITUDE,
            plot_domain: -100..=100,
            parallel_threshold: 512,
        }
    }
}

impl SessionConfig {
    /// Create a config whose polynomials have the given capacity.
    ///
    /// The editable magnitude range shrinks to fit when the capacity is below
    /// the default.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let defaults = Self::default();
        Self {
            capacity,
            max_magnitude: defaults.max_magnitude.min(capacity.saturating_sub(1)),
            ..defaults
        }
    }

    /// Set the highest editable exponent.
    #[must_use]
    pub fn with_max_magnitude(mut self, max_magnitude: usize) -> Self {
        self.max_magnitude = max_magnitude;
        self
    }

    /// Set the sampling domain.
    #[must_use]
    pub fn with_plot_domain(mut self, domain: RangeInclusive<i64>) -> Self {
        self.plot_domain = domain;
        self
    }

    /// Set the parallel sampling threshold.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
