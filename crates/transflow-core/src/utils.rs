//! Utility functions for working with data slices

/// Sum of the non-NaN entries of a slice
///
/// Undefined values (NaN) mark structurally under-sampled pairings and are
/// skipped rather than poisoning the total.
///
/// # Examples
///
/// ```rust
/// use transflow_core::utils::nan_sum;
///
/// assert_eq!(nan_sum(&[1.0, f64::NAN, 2.0]), 3.0);
/// assert_eq!(nan_sum(&[]), 0.0);
/// ```
pub fn nan_sum(data: &[f64]) -> f64 {
    data.iter().filter(|x| !x.is_nan()).sum()
}

/// Number of NaN entries in a slice
pub fn nan_count(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Clamp a value into [0, 1], leaving NaN untouched
///
/// # Examples
///
/// ```rust
/// use transflow_core::utils::clip_unit;
///
/// assert_eq!(clip_unit(-0.2), 0.0);
/// assert_eq!(clip_unit(1.3), 1.0);
/// assert!(clip_unit(f64::NAN).is_nan());
/// ```
pub fn clip_unit(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Divide each entry by the NaN-aware total
///
/// NaN entries stay NaN. A zero total yields NaN everywhere.
pub fn normalize(data: &[f64]) -> Vec<f64> {
    let total = nan_sum(data);
    data.iter().map(|&x| x / total).collect()
}
