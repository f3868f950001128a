//! Common types for simultaneous confidence intervals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use transflow_core::{utils::clip_unit, Error, Result};

/// A confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate (cell proportion)
    pub estimate: f64,
    /// Confidence level (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, estimate: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
            confidence_level,
        }
    }

    /// Interval for a cell that has no defined estimate
    pub fn undefined(confidence_level: f64) -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, confidence_level)
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Margin of error (half-width)
    pub fn margin_of_error(&self) -> f64 {
        self.width() / 2.0
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Whether every bound is a number
    pub fn is_defined(&self) -> bool {
        !(self.lower.is_nan() || self.upper.is_nan() || self.estimate.is_nan())
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.4}, {:.4}], estimate: {:.4}",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

/// Confidence level type with validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Create a new confidence level
    ///
    /// # Panics
    /// Panics if level is not in (0, 1)
    pub fn new(level: f64) -> Self {
        assert!(
            level > 0.0 && level < 1.0,
            "Confidence level must be in (0, 1)"
        );
        Self(level)
    }

    /// Create a confidence level, rejecting values outside (0, 1)
    pub fn try_new(level: f64) -> Result<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(Error::invalid_confidence_level(level))
        }
    }

    /// Get the confidence level value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the alpha level (1 - confidence level)
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Common confidence levels
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::NINETY_FIVE
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::try_new(level)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Which bounds of the interval are informative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    /// Both bounds at the stated level
    #[default]
    TwoSided,
    /// Lower bound only; the upper bound is reported as 1
    Left,
    /// Upper bound only; the lower bound is reported as 0
    Right,
}

impl Sides {
    /// Level the two-sided formulas must be evaluated at
    ///
    /// A one-sided bound at level `L` is one side of a two-sided interval at
    /// `1 - 2(1 - L)`.
    pub fn effective_level(&self, level: ConfidenceLevel) -> Result<ConfidenceLevel> {
        match self {
            Sides::TwoSided => Ok(level),
            Sides::Left | Sides::Right => {
                ConfidenceLevel::try_new(1.0 - 2.0 * level.alpha()).map_err(|_| {
                    Error::InvalidParameter(format!(
                        "One-sided intervals need a confidence level above 0.5, got {}",
                        level.value()
                    ))
                })
            }
        }
    }

    /// Replace the uninformative bound
    pub fn apply(&self, lower: f64, upper: f64) -> (f64, f64) {
        match self {
            Sides::TwoSided => (lower, upper),
            Sides::Left => (lower, 1.0),
            Sides::Right => (0.0, upper),
        }
    }
}

/// Named simultaneous interval methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalMethod {
    /// Goodman (1965) chi-square inversion
    Goodman,
    /// Goodman with a half-count continuity correction
    #[serde(rename = "goodmancc")]
    GoodmanCc,
    /// Sison and Glaz (1995) truncated Poisson search
    #[serde(rename = "sisonglaz")]
    SisonGlaz,
    /// Symmetric `c + 1` variant of the Sison-Glaz search
    #[serde(rename = "cplus1")]
    CPlus1,
    /// Normal approximation
    Wald,
    /// Normal approximation with a `1/(2n)` continuity term
    #[serde(rename = "waldcc")]
    WaldCc,
    /// Score interval with one degree of freedom
    Wilson,
    /// Quesenberry and Hurst (1964), bounds clipped to [0, 1]
    #[serde(rename = "qh")]
    QuesenberryHurst,
    /// Quesenberry and Hurst with raw bounds, adjusted bounds and region volume
    #[serde(rename = "qh_region")]
    QuesenberryHurstRegion,
}

impl IntervalMethod {
    /// Every method, in a stable order
    pub const ALL: [IntervalMethod; 9] = [
        IntervalMethod::Goodman,
        IntervalMethod::GoodmanCc,
        IntervalMethod::SisonGlaz,
        IntervalMethod::CPlus1,
        IntervalMethod::Wald,
        IntervalMethod::WaldCc,
        IntervalMethod::Wilson,
        IntervalMethod::QuesenberryHurst,
        IntervalMethod::QuesenberryHurstRegion,
    ];

    /// Short lower-case label, used as a column prefix
    pub fn label(&self) -> &'static str {
        match self {
            Self::Goodman => "goodman",
            Self::GoodmanCc => "goodmancc",
            Self::SisonGlaz => "sisonglaz",
            Self::CPlus1 => "cplus1",
            Self::Wald => "wald",
            Self::WaldCc => "waldcc",
            Self::Wilson => "wilson",
            Self::QuesenberryHurst => "qh",
            Self::QuesenberryHurstRegion => "qh_region",
        }
    }

    /// Whether the method runs the iterative coverage search
    pub fn is_iterative(&self) -> bool {
        matches!(self, Self::SisonGlaz | Self::CPlus1)
    }
}

impl fmt::Display for IntervalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IntervalMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.label() == wanted)
            .ok_or_else(|| Error::InvalidParameter(format!("Unknown interval method '{s}'")))
    }
}

/// Validated multinomial cell vector
///
/// Cells are counts or count-like weights: finite and non-negative with a
/// positive total. At least two cells are required since every method is
/// defined relative to the other categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CellCounts {
    cells: Vec<f64>,
    total: f64,
}

impl CellCounts {
    /// Validate and wrap a cell vector
    pub fn new(cells: &[f64]) -> Result<Self> {
        if cells.len() < 2 {
            return Err(Error::Validation(format!(
                "At least two cells are required, got {}",
                cells.len()
            )));
        }
        if cells.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite("cell counts"));
        }
        if let Some(&bad) = cells.iter().find(|&&x| x < 0.0) {
            return Err(Error::negative_value("cell count", bad));
        }
        let total: f64 = cells.iter().sum();
        if total <= 0.0 {
            return Err(Error::Validation(
                "Cell counts sum to zero; proportions are undefined".to_string(),
            ));
        }
        Ok(Self {
            cells: cells.to_vec(),
            total,
        })
    }

    /// Cell values
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Number of cells, `k`
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; construction rejects empty vectors
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of the cells, `n`
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Cell proportions `x / n`
    pub fn proportions(&self) -> Vec<f64> {
        self.cells.iter().map(|&x| x / self.total).collect()
    }
}

/// Simultaneous intervals for every cell of one multinomial vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimultaneousIntervals {
    /// Method that produced the intervals
    pub method: IntervalMethod,
    /// Requested confidence level
    pub confidence_level: f64,
    /// Which bounds are informative
    pub sides: Sides,
    /// Per-cell intervals, clipped to [0, 1]
    pub intervals: Vec<ConfidenceInterval>,
    /// Bounds before clipping, kept by the region variant only
    pub unadjusted: Option<Vec<(f64, f64)>>,
}

impl SimultaneousIntervals {
    /// Build intervals from raw per-cell bounds, clipping to [0, 1] and
    /// applying the requested sides
    pub fn from_bounds(
        method: IntervalMethod,
        level: ConfidenceLevel,
        sides: Sides,
        estimates: &[f64],
        bounds: &[(f64, f64)],
    ) -> Self {
        let intervals = estimates
            .iter()
            .zip(bounds)
            .map(|(&est, &(lower, upper))| {
                let (lower, upper) = sides.apply(clip_unit(lower), clip_unit(upper));
                ConfidenceInterval::new(lower, upper, est, level.value())
            })
            .collect();

        Self {
            method,
            confidence_level: level.value(),
            sides,
            intervals,
            unadjusted: None,
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether there are no cells
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Lower bounds in cell order
    pub fn lower(&self) -> Vec<f64> {
        self.intervals.iter().map(|ci| ci.lower).collect()
    }

    /// Upper bounds in cell order
    pub fn upper(&self) -> Vec<f64> {
        self.intervals.iter().map(|ci| ci.upper).collect()
    }

    /// Point estimates in cell order
    pub fn estimates(&self) -> Vec<f64> {
        self.intervals.iter().map(|ci| ci.estimate).collect()
    }

    /// Product of the clipped interval widths
    ///
    /// The volume of the joint confidence region as a hyper-rectangle.
    pub fn volume(&self) -> f64 {
        self.intervals.iter().map(|ci| ci.width()).product()
    }
}
