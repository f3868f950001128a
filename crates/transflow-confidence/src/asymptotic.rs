//! Asymptotic intervals based on one-degree-of-freedom chi-square quantiles
//!
//! These treat every cell as its own binomial proportion, so they are not
//! simultaneous in the strict sense; they are kept for comparison with the
//! multinomial methods.

use crate::{
    CellCounts, ConfidenceLevel, IntervalMethod, SimultaneousIntervalEstimator,
    SimultaneousIntervals, Sides,
};
use tracing::debug;
use transflow_core::{math::distributions::chi_squared, Result};

/// Which normal-approximation formula to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsymptoticKind {
    /// `p -/+ sqrt(chi p (1 - p) / n)`
    Wald,
    /// Wald widened by `1/(2n)` on each side
    WaldContinuityCorrected,
    /// Score interval `(chi + 2x -/+ sqrt(chi^2 + 4 x chi (1 - p))) / (2(chi + n))`
    Wilson,
}

/// Asymptotic interval estimator
#[derive(Debug, Clone)]
pub struct AsymptoticCI {
    /// Confidence level
    confidence_level: ConfidenceLevel,
    sides: Sides,
    kind: AsymptoticKind,
}

impl AsymptoticCI {
    /// Create a Wald interval estimator
    pub fn wald(confidence_level: ConfidenceLevel) -> Self {
        Self::with_kind(confidence_level, AsymptoticKind::Wald)
    }

    /// Create a continuity-corrected Wald interval estimator
    pub fn wald_cc(confidence_level: ConfidenceLevel) -> Self {
        Self::with_kind(confidence_level, AsymptoticKind::WaldContinuityCorrected)
    }

    /// Create a Wilson score interval estimator
    pub fn wilson(confidence_level: ConfidenceLevel) -> Self {
        Self::with_kind(confidence_level, AsymptoticKind::Wilson)
    }

    fn with_kind(confidence_level: ConfidenceLevel, kind: AsymptoticKind) -> Self {
        Self {
            confidence_level,
            sides: Sides::TwoSided,
            kind,
        }
    }

    /// Report one-sided bounds
    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }

    /// Formula in use
    pub fn kind(&self) -> AsymptoticKind {
        self.kind
    }
}

impl SimultaneousIntervalEstimator for AsymptoticCI {
    fn intervals_for(&self, counts: &CellCounts) -> Result<SimultaneousIntervals> {
        let level = self.sides.effective_level(self.confidence_level)?;
        let n = counts.total();
        let chi = chi_squared::quantile(level.value(), 1.0)?;
        debug!("{:?}: n={:.4}, chi-square quantile={:.6}", self.kind, n, chi);

        let estimates = counts.proportions();
        let bounds: Vec<(f64, f64)> = counts
            .cells()
            .iter()
            .zip(&estimates)
            .map(|(&x, &p)| match self.kind {
                AsymptoticKind::Wald => {
                    let margin = (chi * p * (1.0 - p) / n).sqrt();
                    (p - margin, p + margin)
                }
                AsymptoticKind::WaldContinuityCorrected => {
                    let margin = (chi * p * (1.0 - p) / n).sqrt() + 1.0 / (2.0 * n);
                    (p - margin, p + margin)
                }
                AsymptoticKind::Wilson => {
                    let root = (chi * chi + 4.0 * x * chi * (1.0 - p)).max(0.0).sqrt();
                    let denom = 2.0 * (chi + n);
                    ((chi + 2.0 * x - root) / denom, (chi + 2.0 * x + root) / denom)
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
        match self.kind {
            AsymptoticKind::Wald => IntervalMethod::Wald,
            AsymptoticKind::WaldContinuityCorrected => IntervalMethod::WaldCc,
            AsymptoticKind::Wilson => IntervalMethod::Wilson,
        }
    }
}
