//! Mathematical utilities for flow estimation
//!
//! Distribution helpers needed by the simultaneous interval engine. The
//! underlying densities come from `statrs`; this module adds the pieces
//! `statrs` does not provide directly (an accurate chi-square quantile and a
//! Poisson CDF that accepts real-valued arguments and a zero rate).

/// Distribution-related mathematical functions
pub mod distributions {
    /// Chi-square distribution utilities
    pub mod chi_squared {
        use crate::{Error, Result};
        use statrs::distribution::{ChiSquared, Continuous, ContinuousCDF};

        const MAX_NEWTON_STEPS: usize = 60;
        const RELATIVE_TOLERANCE: f64 = 1e-14;

        /// Quantile of the chi-square distribution with `df` degrees of freedom
        ///
        /// Starts from the `statrs` inverse CDF and polishes the root of
        /// `cdf(x) - p` with Newton steps, so results agree with reference
        /// tables to ~1e-12.
        pub fn quantile(p: f64, df: f64) -> Result<f64> {
            if !(p > 0.0 && p < 1.0) {
                return Err(Error::InvalidParameter(format!(
                    "Chi-square quantile probability {p} must be in (0, 1)"
                )));
            }
            if !(df > 0.0 && df.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "Chi-square degrees of freedom {df} must be positive"
                )));
            }

            let dist = ChiSquared::new(df)?;
            let mut x = dist.inverse_cdf(p);
            if !x.is_finite() || x <= 0.0 {
                x = df;
            }

            for _ in 0..MAX_NEWTON_STEPS {
                let density = dist.pdf(x);
                if !(density > 0.0 && density.is_finite()) {
                    break;
                }
                let step = (dist.cdf(x) - p) / density;
                let mut next = x - step;
                if next <= 0.0 {
                    next = x / 2.0;
                }
                let converged = (next - x).abs() <= RELATIVE_TOLERANCE * x.max(1.0);
                x = next;
                if converged {
                    break;
                }
            }

            if x.is_finite() && x > 0.0 {
                Ok(x)
            } else {
                Err(Error::Computation(format!(
                    "Chi-square quantile did not converge for p={p}, df={df}"
                )))
            }
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_relative_eq;

            #[test]
            fn test_known_quantiles() {
                assert_relative_eq!(
                    quantile(0.95, 1.0).unwrap(),
                    3.8414588206941245,
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    quantile(0.95, 3.0).unwrap(),
                    7.8147279032511765,
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    quantile(0.975, 1.0).unwrap(),
                    5.023886187314883,
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    quantile(0.90, 1.0).unwrap(),
                    2.705543454095415,
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    quantile(0.99, 6.0).unwrap(),
                    16.811893829770916,
                    epsilon = 1e-8
                );
            }

            #[test]
            fn test_round_trip_cdf() {
                let dist = ChiSquared::new(4.0).unwrap();
                for &p in &[0.01, 0.1, 0.5, 0.9, 0.999] {
                    let x = quantile(p, 4.0).unwrap();
                    assert!((dist.cdf(x) - p).abs() < 1e-12, "p={p}, x={x}");
                }
            }

            #[test]
            fn test_invalid_arguments() {
                assert!(quantile(0.0, 1.0).is_err());
                assert!(quantile(1.0, 1.0).is_err());
                assert!(quantile(0.5, 0.0).is_err());
                assert!(quantile(f64::NAN, 2.0).is_err());
            }
        }
    }

    /// Poisson distribution utilities
    pub mod poisson {
        use statrs::distribution::{DiscreteCDF, Poisson};

        /// Slack added before flooring a real-valued count
        ///
        /// Rescaled weights such as `theta_hat * n` land a few ulps below the
        /// integer they stand for.
        pub const INTEGER_FUZZ: f64 = 1e-7;

        /// Largest integer not above `q`, tolerating rounding just below it
        pub fn floor_count(q: f64) -> f64 {
            (q + INTEGER_FUZZ).floor()
        }

        /// `P(X <= q)` for `X ~ Poisson(lambda)`, with `q` floored
        ///
        /// Negative `q` gives 0 and a zero rate is the point mass at 0. Rates
        /// are assumed non-negative and finite.
        pub fn cdf(q: f64, lambda: f64) -> f64 {
            let q = floor_count(q);
            if q < 0.0 {
                return 0.0;
            }
            if lambda <= 0.0 {
                return 1.0;
            }
            match Poisson::new(lambda) {
                Ok(dist) => dist.cdf(q as u64),
                Err(_) => f64::NAN,
            }
        }

        /// `P(X = floor(q))` expressed as a CDF difference
        pub fn point_probability(q: f64, lambda: f64) -> f64 {
            cdf(q, lambda) - cdf(q - 1.0, lambda)
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_relative_eq;

            #[test]
            fn test_cdf_values() {
                // e^-2 * (1 + 2 + 2)
                assert_relative_eq!(cdf(2.0, 2.0), 5.0 * (-2.0f64).exp(), epsilon = 1e-12);
                assert_relative_eq!(cdf(2.7, 2.0), cdf(2.0, 2.0), epsilon = 1e-15);
                assert_eq!(cdf(-0.5, 3.0), 0.0);
            }

            #[test]
            fn test_cdf_tolerates_rounding_below_integer() {
                assert_eq!(floor_count(14.999999999999998), 15.0);
                assert_eq!(floor_count(14.9), 14.0);
                assert_eq!(cdf(2.9999999999999996, 2.0), cdf(3.0, 2.0));
                assert_eq!(
                    point_probability(14.999999999999998, 22.0),
                    point_probability(15.0, 22.0)
                );
            }

            #[test]
            fn test_zero_rate() {
                assert_eq!(cdf(0.0, 0.0), 1.0);
                assert_eq!(cdf(5.0, 0.0), 1.0);
                assert_eq!(cdf(-1.0, 0.0), 0.0);
            }

            #[test]
            fn test_point_probability() {
                let lambda: f64 = 10.0;
                let expected = (-lambda).exp() * lambda.powi(10) / 3628800.0;
                assert_relative_eq!(point_probability(10.0, lambda), expected, epsilon = 1e-12);
            }
        }
    }
}
