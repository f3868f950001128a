//! Error types for transmission flow estimation
//!
//! Provides a unified error type for all transflow crates.

use thiserror::Error;

/// Core error type for flow estimation and interval computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed or inconsistent input tables
    #[error("Validation error: {0}")]
    Validation(String),

    /// An iterative approximation did not reach its target
    #[error("Numerical error: {message} (cells: {cells:?})")]
    Numerical { message: String, cells: Vec<f64> },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure inside a distribution routine
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// A count or size that must be non-negative was negative
    pub fn negative_value(context: &str, value: f64) -> Self {
        Self::Validation(format!("{context} must be non-negative, got {value}"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Validation(format!("{context} contains NaN or infinite values"))
    }

    /// A linkage row references a group absent from the sampling table
    pub fn unknown_group(id: &str) -> Self {
        Self::Validation(format!(
            "linkage references group '{id}' which is not in the sampling table"
        ))
    }

    /// The same ordered pairing appears more than once in the linkage table
    pub fn duplicate_linkage(group_1: &str, group_2: &str) -> Self {
        Self::Validation(format!(
            "duplicate linkage row for pairing ({group_1}, {group_2})"
        ))
    }

    /// Sampled pair count does not fit in a `u64`
    pub fn pair_count_overflow(n1: u64, n2: u64) -> Self {
        Self::Validation(format!(
            "sampled sizes {n1} and {n2} give more pairs than can be counted"
        ))
    }

    /// A group is defined twice with different sizes
    pub fn conflicting_group(id: &str) -> Self {
        Self::Validation(format!(
            "group '{id}' is defined more than once with conflicting sizes"
        ))
    }

    /// Confidence level outside (0, 1)
    pub fn invalid_confidence_level(level: f64) -> Self {
        Self::InvalidParameter(format!("Confidence level {level} must be in (0, 1)"))
    }

    /// Create an error for a coverage search that never reached its target
    pub fn not_converged(message: impl Into<String>, cells: &[f64]) -> Self {
        Self::Numerical {
            message: message.into(),
            cells: cells.to_vec(),
        }
    }

    /// Whether this error signals bad input rather than a numerical failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this error is a convergence failure the caller may retry with
    /// another method
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::Numerical { .. })
    }
}

impl From<statrs::StatsError> for Error {
    fn from(err: statrs::StatsError) -> Self {
        Self::Computation(err.to_string())
    }
}
