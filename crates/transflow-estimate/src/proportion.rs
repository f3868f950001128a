//! Empirical linkage probability per pairing

use crate::linkage::LinkedPairing;

/// Fraction of possible sampled pairs that are linked
///
/// Returns NaN when no sampled pair can be formed. That is a legitimate
/// outcome for an under-sampled pairing, not an error.
///
/// # Example
/// ```rust
/// use transflow_estimate::p_hat;
///
/// assert_eq!(p_hat(8, 100), 0.08);
/// assert!(p_hat(0, 0).is_nan());
/// ```
pub fn p_hat(observed: u64, max_possible_pairs_in_sample: u64) -> f64 {
    if max_possible_pairs_in_sample == 0 {
        f64::NAN
    } else {
        observed as f64 / max_possible_pairs_in_sample as f64
    }
}

/// `p_hat` for every pairing, in input order
pub fn estimate_proportions(linked: &[LinkedPairing]) -> Vec<f64> {
    linked
        .iter()
        .map(|l| p_hat(l.num_linked_pairs_observed, l.pairing.max_possible_pairs_in_sample))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_p_hat() {
        assert_relative_eq!(p_hat(5, 45), 0.1111111111111111);
        assert_eq!(p_hat(0, 45), 0.0);
        assert_eq!(p_hat(45, 45), 1.0);
        assert!(p_hat(0, 0).is_nan());
    }
}
