//! Sison-Glaz simultaneous confidence intervals
//!
//! Based on: Sison, C. P., & Glaz, J. (1995). Simultaneous confidence
//! intervals and sample size determination for multinomial proportions.
//! Journal of the American Statistical Association, 90(429), 366-369.
//!
//! The multinomial coverage `P(n_i - c <= X_i <= n_i + c for all i)` is
//! approximated by treating each cell as an independent Poisson variable
//! truncated to its window, matching the first four moments of the sum of
//! the truncated variables with an Edgeworth expansion, and conditioning on
//! the sum being `n`. The smallest integer half-width `c` whose coverage
//! exceeds the target level is found by a linear scan, and the final bounds
//! interpolate between the coverages either side of the target.

use crate::{
    CellCounts, ConfidenceLevel, IntervalMethod, SimultaneousIntervalEstimator,
    SimultaneousIntervals, Sides,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, instrument, trace};
use transflow_core::{math::distributions::poisson, Error, Result};

/// Terms of the Edgeworth polynomial used for the coverage density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeworthTerms {
    /// Skewness and kurtosis terms only; reproduces published reference
    /// outputs, which omit the squared-skewness term
    #[default]
    Reference,
    /// Adds `g1^2 He6(z) / 72`, the full four-moment expansion
    Full,
}

/// Moments of a Poisson variable truncated to `[lambda - c, lambda + c]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedMoments {
    /// Mean
    pub mean: f64,
    /// Second central moment
    pub variance: f64,
    /// Third central moment
    pub third: f64,
    /// Fourth central moment
    pub fourth: f64,
    /// Untruncated probability mass inside the window
    pub window_probability: f64,
}

impl TruncatedMoments {
    /// Compute the moments for half-width `c` and rate `lambda`
    ///
    /// Bounds are real-valued; Poisson probabilities are evaluated at their
    /// floors, so non-integer weights are accepted.
    pub fn new(c: f64, lambda: f64) -> Self {
        let upper = lambda + c;
        let lower = (lambda - c).max(0.0);

        let cdf_upper = poisson::cdf(upper, lambda);
        let below_lower = poisson::cdf(lower - 1.0, lambda);
        let window_probability = if lower > 0.0 {
            cdf_upper - below_lower
        } else {
            cdf_upper
        };

        // Factorial moments E[X(X-1)...(X-r+1)] of the truncated variable.
        let mut factorial = [0.0; 4];
        for (i, slot) in factorial.iter_mut().enumerate() {
            let r = (i + 1) as f64;
            let top = if upper - r >= 0.0 {
                cdf_upper - poisson::cdf(upper - r, lambda)
            } else {
                cdf_upper
            };
            let bottom = if lower - r - 1.0 >= 0.0 {
                below_lower - poisson::cdf(lower - r - 1.0, lambda)
            } else if lower - 1.0 >= 0.0 {
                below_lower
            } else {
                0.0
            };
            *slot = lambda.powi(i as i32 + 1) * (1.0 - (top - bottom) / window_probability);
        }

        let [m1, m2, m3, m4] = factorial;
        Self {
            mean: m1,
            variance: m2 + m1 - m1 * m1,
            third: m3 + m2 * (3.0 - 3.0 * m1) + (m1 - 3.0 * m1 * m1 + 2.0 * m1.powi(3)),
            fourth: m4
                + m3 * (6.0 - 4.0 * m1)
                + m2 * (7.0 - 12.0 * m1 + 6.0 * m1 * m1)
                + m1
                - 4.0 * m1 * m1
                + 6.0 * m1.powi(3)
                - 3.0 * m1.powi(4),
            window_probability,
        }
    }
}

/// Outcome of the half-width search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSearch {
    /// Integer half-width, one below the first `c` whose coverage exceeds the
    /// target
    pub c: f64,
    /// Linear interpolation weight between the two bracketing coverages
    pub delta: f64,
    /// Coverage just below the target
    pub coverage_below: f64,
    /// Coverage just above the target
    pub coverage_above: f64,
}

/// Sison-Glaz interval estimator (and its `c + 1` variant)
#[derive(Debug, Clone)]
pub struct SisonGlaz {
    confidence_level: ConfidenceLevel,
    sides: Sides,
    plus_one: bool,
    edgeworth: EdgeworthTerms,
}

impl SisonGlaz {
    /// Create a Sison-Glaz estimator
    pub fn new(confidence_level: ConfidenceLevel) -> Self {
        Self {
            confidence_level,
            sides: Sides::TwoSided,
            plus_one: false,
            edgeworth: EdgeworthTerms::Reference,
        }
    }

    /// Create the symmetric `p -/+ (c + 1)/n` variant
    pub fn c_plus_one(confidence_level: ConfidenceLevel) -> Self {
        Self {
            plus_one: true,
            ..Self::new(confidence_level)
        }
    }

    /// Report one-sided bounds
    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }

    /// Select the Edgeworth polynomial
    pub fn with_edgeworth(mut self, edgeworth: EdgeworthTerms) -> Self {
        self.edgeworth = edgeworth;
        self
    }

    /// Approximate multinomial coverage for half-width `c`
    pub fn coverage(&self, c: f64, counts: &CellCounts) -> f64 {
        let n = counts.total();

        let mut s1 = 0.0;
        let mut s2 = 0.0;
        let mut s3 = 0.0;
        let mut s4 = 0.0;
        let mut window_probability = 1.0;
        for &lambda in counts.cells() {
            let m = TruncatedMoments::new(c, lambda);
            s1 += m.mean;
            s2 += m.variance;
            s3 += m.third;
            // Fourth cumulant
            s4 += m.fourth - 3.0 * m.variance * m.variance;
            window_probability *= m.window_probability;
        }

        let prob_n = 1.0 / poisson::point_probability(n, n);
        let sd = s2.sqrt();
        let z = (n - s1) / sd;
        let g1 = s3 / s2.powf(1.5);
        let g2 = s4 / (s2 * s2);

        let z2 = z * z;
        let mut poly = 1.0
            + g1 * (z.powi(3) - 3.0 * z) / 6.0
            + g2 * (z2 * z2 - 6.0 * z2 + 3.0) / 24.0;
        if self.edgeworth == EdgeworthTerms::Full {
            poly += g1 * g1 * (z2.powi(3) - 15.0 * z2 * z2 + 45.0 * z2 - 15.0) / 72.0;
        }
        let density = poly * (-z2 / 2.0).exp() / (2.0 * PI).sqrt();

        prob_n * window_probability * density / sd
    }

    /// Scan `c = 1..=floor(n)` for the first coverage above the target
    ///
    /// # Errors
    /// [`Error::Numerical`] when no candidate crosses the target; callers
    /// can fall back to a closed-form method such as Goodman.
    #[instrument(skip(self, counts), fields(k = counts.len(), n = counts.total()))]
    pub fn search(&self, counts: &CellCounts) -> Result<CoverageSearch> {
        let target = self.sides.effective_level(self.confidence_level)?.value();
        let max_c = poisson::floor_count(counts.total()) as u64;

        let mut previous = 0.0;
        for c in 1..=max_c {
            let current = self.coverage(c as f64, counts);
            trace!("c={}, coverage={:.6}", c, current);
            if current > target && previous < target {
                let delta = (target - previous) / (current - previous);
                debug!(
                    "Sison-Glaz: c={}, delta={:.6}, coverage bracket=({:.6}, {:.6})",
                    c - 1,
                    delta,
                    previous,
                    current
                );
                return Ok(CoverageSearch {
                    c: (c - 1) as f64,
                    delta,
                    coverage_below: previous,
                    coverage_above: current,
                });
            }
            previous = current;
        }

        Err(Error::not_converged(
            format!("no half-width c in [1, {max_c}] reached coverage {target}"),
            counts.cells(),
        ))
    }
}

impl SimultaneousIntervalEstimator for SisonGlaz {
    fn intervals_for(&self, counts: &CellCounts) -> Result<SimultaneousIntervals> {
        let search = self.search(counts)?;
        let n = counts.total();
        let c = search.c;
        let estimates = counts.proportions();

        let bounds: Vec<(f64, f64)> = estimates
            .iter()
            .map(|&p| {
                if self.plus_one {
                    (p - c / n - 1.0 / n, p + c / n + 1.0 / n)
                } else {
                    (p - c / n, p + c / n + 2.0 * search.delta / n)
                }
            })
            .collect();

        Ok(SimultaneousIntervals::from_bounds(
            self.method(),
            self.confidence_level,
            self.sides,
            &estimates,
            &bounds,
        ))
    }

    fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    fn method(&self) -> IntervalMethod {
        if self.plus_one {
            IntervalMethod::CPlus1
        } else {
            IntervalMethod::SisonGlaz
        }
    }
}
