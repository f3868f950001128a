//! Quesenberry-Hurst simultaneous confidence intervals
//!
//! Based on: Quesenberry, C. P., & Hurst, D. C. (1964). Large sample
//! simultaneous confidence intervals for multinomial proportions.
//! Technometrics, 6(2), 191-195.
//!
//! Bounds are the score-type roots
//!
//! ```text
//! (chi + 2x -/+ sqrt(chi^2 + 4 x chi (1 - p))) / (2(chi + n))
//! ```
//!
//! with `chi` the chi-square quantile at `1 - alpha/k` on `k - 1` degrees of
//! freedom. Two reporting variants exist: the plain one clips to [0, 1]; the
//! region variant also keeps the raw bounds so the joint region's volume and
//! any out-of-range bounds can be inspected.

use crate::{
    CellCounts, ConfidenceLevel, IntervalMethod, SimultaneousIntervalEstimator,
    SimultaneousIntervals, Sides,
};
use tracing::debug;
use transflow_core::{math::distributions::chi_squared, Result};

/// Quesenberry-Hurst interval estimator
#[derive(Debug, Clone)]
pub struct QuesenberryHurst {
    confidence_level: ConfidenceLevel,
    sides: Sides,
    keep_region: bool,
}

impl QuesenberryHurst {
    /// Create an estimator reporting clipped bounds
    pub fn new(confidence_level: ConfidenceLevel) -> Self {
        Self {
            confidence_level,
            sides: Sides::TwoSided,
            keep_region: false,
        }
    }

    /// Create an estimator that also keeps unclipped bounds
    pub fn region(confidence_level: ConfidenceLevel) -> Self {
        Self {
            keep_region: true,
            ..Self::new(confidence_level)
        }
    }

    /// Report one-sided bounds
    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }
}

impl SimultaneousIntervalEstimator for QuesenberryHurst {
    fn intervals_for(&self, counts: &CellCounts) -> Result<SimultaneousIntervals> {
        let level = self.sides.effective_level(self.confidence_level)?;
        let k = counts.len() as f64;
        let n = counts.total();
        let chi = chi_squared::quantile(1.0 - level.alpha() / k, k - 1.0)?;
        debug!("Quesenberry-Hurst: k={}, n={:.4}, chi-square quantile={:.6}", counts.len(), n, chi);

        let estimates = counts.proportions();
        let denom = 2.0 * (chi + n);
        let bounds: Vec<(f64, f64)> = counts
            .cells()
            .iter()
            .zip(&estimates)
            .map(|(&x, &p)| {
                let root = (chi * chi + 4.0 * x * chi * (1.0 - p)).sqrt();
                ((chi + 2.0 * x - root) / denom, (chi + 2.0 * x + root) / denom)
            })
            .collect();

        let mut intervals = SimultaneousIntervals::from_bounds(
            self.method(),
            self.confidence_level,
            self.sides,
            &estimates,
            &bounds,
        );
        if self.keep_region {
            debug!("Quesenberry-Hurst region volume={:.6e}", intervals.volume());
            intervals.unadjusted = Some(bounds);
        }
        Ok(intervals)
    }

    fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    fn method(&self) -> IntervalMethod {
        if self.keep_region {
            IntervalMethod::QuesenberryHurstRegion
        } else {
            IntervalMethod::QuesenberryHurst
        }
    }
}
