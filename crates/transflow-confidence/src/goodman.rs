//! Goodman simultaneous confidence intervals
//!
//! Based on: Goodman, L. A. (1965). On simultaneous confidence intervals for
//! multinomial proportions. Technometrics, 7(2), 247-254.
//!
//! Each cell interval inverts the chi-square statistic with `k - 1` degrees
//! of freedom:
//!
//! ```text
//! (chi + 2x -/+ sqrt(chi * (chi + 4x(n - x)/n))) / (2(n + chi))
//! ```

use crate::{
    CellCounts, ConfidenceLevel, IntervalMethod, SimultaneousIntervalEstimator,
    SimultaneousIntervals, Sides,
};
use tracing::debug;
use transflow_core::{math::distributions::chi_squared, Result};

/// Goodman interval estimator, optionally continuity corrected
#[derive(Debug, Clone)]
pub struct Goodman {
    confidence_level: ConfidenceLevel,
    sides: Sides,
    /// Shift the count by half a unit away from the estimate on each side
    continuity_correction: bool,
}

impl Goodman {
    /// Create a plain Goodman estimator
    pub fn new(confidence_level: ConfidenceLevel) -> Self {
        Self {
            confidence_level,
            sides: Sides::TwoSided,
            continuity_correction: false,
        }
    }

    /// Create a continuity-corrected Goodman estimator
    ///
    /// The lower bound is evaluated at `x - 0.5` and the upper bound at
    /// `x + 0.5`, both kept inside `[0, n]`, which widens the interval for
    /// small counts.
    pub fn continuity_corrected(confidence_level: ConfidenceLevel) -> Self {
        Self {
            continuity_correction: true,
            ..Self::new(confidence_level)
        }
    }

    /// Report one-sided bounds
    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }
}

/// One Goodman bound for a (possibly shifted) count
///
/// A negative discriminant only arises for shifted counts at low confidence
/// levels; it is floored at zero so the bound collapses to the centre.
fn goodman_bound(chi: f64, x: f64, n: f64, sign: f64) -> f64 {
    let discriminant = (chi * (chi + 4.0 * x * (n - x) / n)).max(0.0);
    (chi + 2.0 * x + sign * discriminant.sqrt()) / (2.0 * (n + chi))
}

impl SimultaneousIntervalEstimator for Goodman {
    fn intervals_for(&self, counts: &CellCounts) -> Result<SimultaneousIntervals> {
        let level = self.sides.effective_level(self.confidence_level)?;
        let k = counts.len() as f64;
        let n = counts.total();
        let chi = chi_squared::quantile(level.value(), k - 1.0)?;
        debug!(
            "Goodman: k={}, n={:.4}, chi-square quantile={:.6}, cc={}",
            counts.len(),
            n,
            chi,
            self.continuity_correction
        );

        let shift = if self.continuity_correction { 0.5 } else { 0.0 };
        let bounds: Vec<(f64, f64)> = counts
            .cells()
            .iter()
            .map(|&x| {
                (
                    goodman_bound(chi, (x - shift).max(0.0), n, -1.0),
                    goodman_bound(chi, (x + shift).min(n), n, 1.0),
                )
            })
            .collect();

        Ok(SimultaneousIntervals::from_bounds(
            self.method(),
            self.confidence_level,
            self.sides,
            &counts.proportions(),
            &bounds,
        ))
    }

    fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    fn method(&self) -> IntervalMethod {
        if self.continuity_correction {
            IntervalMethod::GoodmanCc
        } else {
            IntervalMethod::Goodman
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_goodman_two_cells() {
        let ci = Goodman::new(ConfidenceLevel::NINETY_FIVE)
            .simultaneous_intervals(&[8.0, 2.0])
            .unwrap();

        assert_eq!(ci.method, IntervalMethod::Goodman);
        assert_relative_eq!(ci.intervals[0].lower, 0.4901624715366418, epsilon = 1e-9);
        assert_relative_eq!(ci.intervals[0].upper, 0.9433178485456246, epsilon = 1e-9);
        assert_relative_eq!(ci.intervals[1].lower, 0.05668215145437526, epsilon = 1e-9);
        assert_relative_eq!(ci.intervals[1].upper, 0.5098375284633582, epsilon = 1e-9);
    }

    #[test]
    fn test_goodman_cc_is_wider() {
        let plain = Goodman::new(ConfidenceLevel::NINETY_FIVE)
            .simultaneous_intervals(&[8.0, 2.0])
            .unwrap();
        let corrected = Goodman::continuity_corrected(ConfidenceLevel::NINETY_FIVE)
            .simultaneous_intervals(&[8.0, 2.0])
            .unwrap();

        assert_eq!(corrected.method, IntervalMethod::GoodmanCc);
        for (p, c) in plain.intervals.iter().zip(&corrected.intervals) {
            assert!(c.lower <= p.lower);
            assert!(c.upper >= p.upper);
        }
        assert_relative_eq!(corrected.intervals[0].lower, 0.4421814242785499, epsilon = 1e-9);
        assert_relative_eq!(corrected.intervals[1].upper, 0.5578185757214501, epsilon = 1e-9);
    }

    #[test]
    fn test_goodman_zero_cell() {
        let ci = Goodman::continuity_corrected(ConfidenceLevel::NINETY_FIVE)
            .simultaneous_intervals(&[0.0, 5.0, 5.0])
            .unwrap();
        assert_eq!(ci.intervals[0].lower, 0.0);
        assert!(ci.intervals[0].upper > 0.0);
        assert!(ci.intervals.iter().all(|c| c.contains(c.estimate)));
    }

    #[test]
    fn test_goodman_one_sided() {
        let ci = Goodman::new(ConfidenceLevel::NINETY_FIVE)
            .with_sides(Sides::Left)
            .simultaneous_intervals(&[8.0, 2.0])
            .unwrap();
        assert_relative_eq!(ci.intervals[0].lower, 0.5407928056874878, epsilon = 1e-9);
        assert_eq!(ci.intervals[0].upper, 1.0);
        assert_eq!(ci.confidence_level, 0.95);
    }

    #[test]
    fn test_higher_level_is_wider() {
        let cells = [12.0, 30.0, 8.0];
        let ci_90 = Goodman::new(ConfidenceLevel::NINETY)
            .simultaneous_intervals(&cells)
            .unwrap();
        let ci_99 = Goodman::new(ConfidenceLevel::NINETY_NINE)
            .simultaneous_intervals(&cells)
            .unwrap();
        for (a, b) in ci_90.intervals.iter().zip(&ci_99.intervals) {
            assert!(a.width() < b.width());
        }
    }
}
