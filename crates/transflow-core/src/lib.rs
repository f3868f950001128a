//! Core types shared by the transmission flow crates
//!
//! This crate provides the pieces every stage of the flow pipeline relies on:
//!
//! - **Errors**: the [`Error`] taxonomy (validation vs. numerical failure)
//! - **Distributions**: an accurate chi-square quantile and a Poisson CDF
//!   usable with real-valued, possibly zero, rates
//! - **Utilities**: NaN-aware sums and clipping helpers
//!
//! # Example
//!
//! ```rust
//! use transflow_core::math::distributions::chi_squared;
//!
//! let q = chi_squared::quantile(0.95, 1.0).unwrap();
//! assert!((q - 3.841458820694124).abs() < 1e-9);
//! ```

pub mod error;
pub mod math;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::math::distributions::{chi_squared, poisson};
    pub use crate::utils::{clip_unit, nan_sum};
    pub use crate::Result;
}
