//! Core trait for simultaneous interval estimation
//!
//! Each method is a small configuration struct (confidence level, sides and
//! any method-specific switches) implementing [`SimultaneousIntervalEstimator`].
//! The cell vector is passed in per call, so one estimator can be reused
//! across many vectors.

use crate::types::{CellCounts, ConfidenceLevel, IntervalMethod, SimultaneousIntervals};
use transflow_core::Result;

/// Simultaneous confidence intervals for multinomial proportions
pub trait SimultaneousIntervalEstimator {
    /// Compute intervals for every cell of a validated vector
    fn intervals_for(&self, counts: &CellCounts) -> Result<SimultaneousIntervals>;

    /// Validate a raw cell vector and compute intervals for it
    ///
    /// # Arguments
    /// * `cells` - Non-negative counts or count-like weights, at least two
    fn simultaneous_intervals(&self, cells: &[f64]) -> Result<SimultaneousIntervals> {
        let counts = CellCounts::new(cells)?;
        self.intervals_for(&counts)
    }

    /// Get the confidence level
    fn confidence_level(&self) -> ConfidenceLevel;

    /// Method identifier
    fn method(&self) -> IntervalMethod;
}
