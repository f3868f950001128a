//! High-level API for simultaneous confidence intervals
//!
//! Selects an estimator by [`IntervalMethod`] so callers can treat the method
//! as data (configuration, column names) rather than as a type.

use crate::{
    AsymptoticCI, ConfidenceLevel, EdgeworthTerms, Goodman, IntervalMethod, QuesenberryHurst,
    SimultaneousIntervalEstimator, SimultaneousIntervals, Sides, SisonGlaz,
};
use serde::{Deserialize, Serialize};
use transflow_core::Result;

/// Default confidence level
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Everything needed to compute one set of simultaneous intervals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalRequest {
    /// Method to run
    pub method: IntervalMethod,
    /// Confidence level
    pub confidence_level: ConfidenceLevel,
    /// Which bounds are informative
    #[serde(default)]
    pub sides: Sides,
    /// Edgeworth polynomial for the Sison-Glaz family
    #[serde(default)]
    pub edgeworth: EdgeworthTerms,
}

impl IntervalRequest {
    /// Two-sided request with the reference Edgeworth polynomial
    pub fn new(method: IntervalMethod, confidence_level: ConfidenceLevel) -> Self {
        Self {
            method,
            confidence_level,
            sides: Sides::TwoSided,
            edgeworth: EdgeworthTerms::Reference,
        }
    }

    /// Set the sides
    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }

    /// Set the Edgeworth polynomial
    pub fn with_edgeworth(mut self, edgeworth: EdgeworthTerms) -> Self {
        self.edgeworth = edgeworth;
        self
    }

    /// Build the estimator for this request
    pub fn estimator(&self) -> Box<dyn SimultaneousIntervalEstimator + Send + Sync> {
        let level = self.confidence_level;
        match self.method {
            IntervalMethod::Goodman => Box::new(Goodman::new(level).with_sides(self.sides)),
            IntervalMethod::GoodmanCc => {
                Box::new(Goodman::continuity_corrected(level).with_sides(self.sides))
            }
            IntervalMethod::SisonGlaz => Box::new(
                SisonGlaz::new(level)
                    .with_sides(self.sides)
                    .with_edgeworth(self.edgeworth),
            ),
            IntervalMethod::CPlus1 => Box::new(
                SisonGlaz::c_plus_one(level)
                    .with_sides(self.sides)
                    .with_edgeworth(self.edgeworth),
            ),
            IntervalMethod::Wald => Box::new(AsymptoticCI::wald(level).with_sides(self.sides)),
            IntervalMethod::WaldCc => Box::new(AsymptoticCI::wald_cc(level).with_sides(self.sides)),
            IntervalMethod::Wilson => Box::new(AsymptoticCI::wilson(level).with_sides(self.sides)),
            IntervalMethod::QuesenberryHurst => {
                Box::new(QuesenberryHurst::new(level).with_sides(self.sides))
            }
            IntervalMethod::QuesenberryHurstRegion => {
                Box::new(QuesenberryHurst::region(level).with_sides(self.sides))
            }
        }
    }

    /// Compute intervals for a raw cell vector
    pub fn compute(&self, cells: &[f64]) -> Result<SimultaneousIntervals> {
        self.estimator().simultaneous_intervals(cells)
    }
}

impl IntervalMethod {
    /// Build an estimator for this method
    pub fn estimator(
        self,
        confidence_level: ConfidenceLevel,
        sides: Sides,
        edgeworth: EdgeworthTerms,
    ) -> Box<dyn SimultaneousIntervalEstimator + Send + Sync> {
        IntervalRequest::new(self, confidence_level)
            .with_sides(sides)
            .with_edgeworth(edgeworth)
            .estimator()
    }
}

/// Compute two-sided simultaneous intervals for a cell vector
///
/// # Arguments
/// * `cells` - Non-negative counts or count-like weights, at least two
/// * `method` - Interval method
/// * `confidence_level` - Confidence level in (0, 1), e.g. 0.95
///
/// # Example
/// ```rust
/// use transflow_confidence::{simultaneous_confidence_intervals, IntervalMethod};
///
/// let ci = simultaneous_confidence_intervals(&[8.0, 2.0], IntervalMethod::Goodman, 0.95).unwrap();
/// assert_eq!(ci.len(), 2);
/// assert!(ci.intervals[0].contains(0.8));
/// ```
pub fn simultaneous_confidence_intervals(
    cells: &[f64],
    method: IntervalMethod,
    confidence_level: f64,
) -> Result<SimultaneousIntervals> {
    let level = ConfidenceLevel::try_new(confidence_level)?;
    IntervalRequest::new(method, level).compute(cells)
}
