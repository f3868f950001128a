//! Simultaneous confidence intervals for multinomial proportions
//!
//! Given a vector of non-negative cell counts (or count-like weights), this
//! crate produces one interval per cell such that all intervals jointly cover
//! the true proportions at the requested level:
//!
//! - **Goodman**: chi-square inversion with `k - 1` degrees of freedom,
//!   optionally continuity corrected
//! - **Sison-Glaz**: truncated Poisson coverage search, plus the symmetric
//!   `c + 1` variant
//! - **Quesenberry-Hurst**: score-type bounds at `1 - alpha/k`, plain or with
//!   the unclipped region kept
//! - **Asymptotic**: Wald, continuity-corrected Wald and Wilson, for comparison
//!
//! # Examples
//!
//! ```rust
//! use transflow_confidence::{
//!     ConfidenceLevel, Goodman, SimultaneousIntervalEstimator,
//! };
//!
//! let goodman = Goodman::new(ConfidenceLevel::NINETY_FIVE);
//! let ci = goodman.simultaneous_intervals(&[8.0, 2.0]).unwrap();
//! println!("cell 0: [{:.3}, {:.3}]", ci.intervals[0].lower, ci.intervals[0].upper);
//! ```
//!
//! Methods can also be selected at runtime:
//!
//! ```rust
//! use transflow_confidence::{IntervalMethod, IntervalRequest, ConfidenceLevel, Sides};
//!
//! let method: IntervalMethod = "sisonglaz".parse().unwrap();
//! let request = IntervalRequest::new(method, ConfidenceLevel::NINETY_FIVE)
//!     .with_sides(Sides::TwoSided);
//! let ci = request.compute(&[5.0, 8.0, 2.0, 3.0]).unwrap();
//! assert_eq!(ci.len(), 4);
//! ```

pub mod api;
mod asymptotic;
mod goodman;
mod quesenberry_hurst;
mod sison_glaz;
mod traits;
mod types;

// Re-exports
pub use api::{simultaneous_confidence_intervals, IntervalRequest, DEFAULT_CONFIDENCE_LEVEL};
pub use asymptotic::{AsymptoticCI, AsymptoticKind};
pub use goodman::Goodman;
pub use quesenberry_hurst::QuesenberryHurst;
pub use sison_glaz::{CoverageSearch, EdgeworthTerms, SisonGlaz, TruncatedMoments};
pub use traits::SimultaneousIntervalEstimator;
pub use types::{
    CellCounts, ConfidenceInterval, ConfidenceLevel, IntervalMethod, Sides, SimultaneousIntervals,
};

// Convenience constructor
pub fn sison_glaz(confidence_level: f64) -> transflow_core::Result<SisonGlaz> {
    Ok(SisonGlaz::new(ConfidenceLevel::try_new(confidence_level)?))
}
