//! Property-based tests for the flow pipeline

use proptest::prelude::*;
use transflow_estimate::{
    estimate_transmission_flows, flow_estimates, max_population_pairs, max_sample_pairs,
    FlowConfig, ObservedLinkage, PopulationGroup,
};

/// Groups plus linkage counts that never exceed the sampled maximum
fn dataset() -> impl Strategy<Value = (Vec<PopulationGroup>, Vec<ObservedLinkage>)> {
    prop::collection::vec((0u64..15, 0.0..500.0f64), 2..5).prop_flat_map(|sizes| {
        let n = sizes.len();
        (Just(sizes), prop::collection::vec(0.0..=1.0f64, n * n))
    })
    .prop_map(|(sizes, fractions)| {
        let groups: Vec<PopulationGroup> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(sampled, population))| {
                PopulationGroup::new(format!("g{i}"), sampled, population)
            })
            .collect();
        let mut linkages = Vec::new();
        for (i, g1) in groups.iter().enumerate() {
            for (j, g2) in groups.iter().enumerate() {
                let max = max_sample_pairs(g1.sampled, g2.sampled, i == j).unwrap();
                let count = (fractions[i * groups.len() + j] * max as f64).floor() as u64;
                if count > 0 {
                    linkages.push(ObservedLinkage::new(g1.id.clone(), g2.id.clone(), count));
                }
            }
        }
        (groups, linkages)
    })
}

proptest! {
    #[test]
    fn prop_max_pairs_formula(n in 0u64..10_000, m in 0u64..10_000) {
        prop_assert_eq!(max_sample_pairs(n, m, false).unwrap(), n * m);
        let expected = if n <= 1 { 0 } else { n * (n - 1) / 2 };
        prop_assert_eq!(max_sample_pairs(n, n, true).unwrap(), expected);
        let pop = max_population_pairs(n as f64, n as f64, true);
        prop_assert!((pop - expected as f64).abs() < 1e-6);
    }

    #[test]
    fn prop_theta_hat_normalised((groups, linkages) in dataset()) {
        let flows = flow_estimates(&groups, &linkages, false).unwrap();
        prop_assert_eq!(flows.len(), groups.len() * groups.len());

        let defined: Vec<f64> = flows.iter().map(|f| f.theta_hat).filter(|t| !t.is_nan()).collect();
        if !defined.is_empty() {
            let sum: f64 = defined.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "theta_hat sums to {}", sum);
        }
        for f in &flows {
            prop_assert_eq!(f.p_hat.is_nan(), f.pairing.max_possible_pairs_in_sample == 0);
            if !f.p_hat.is_nan() {
                prop_assert!((0.0..=1.0).contains(&f.p_hat));
            }
        }
    }

    #[test]
    fn prop_report_intervals_bracket_estimates((groups, linkages) in dataset()) {
        let report = match estimate_transmission_flows(&groups, &linkages, &FlowConfig::default()) {
            Ok(report) => report,
            // Empty or degenerate link sets leave nothing to estimate.
            Err(e) => {
                prop_assert!(e.is_validation(), "unexpected error {}", e);
                return Ok(());
            }
        };

        for pair in report.rows.windows(2) {
            let (first, second) = (&pair[0].flow, &pair[1].flow);
            prop_assert!(first.num_linked_pairs_observed >= second.num_linked_pairs_observed);
        }
        for row in &report.rows {
            for ci in row.intervals.iter().filter(|ci| ci.is_defined()) {
                prop_assert!(ci.lower >= 0.0 && ci.upper <= 1.0);
                prop_assert!(ci.lower <= ci.estimate + 1e-12);
                prop_assert!(ci.upper >= ci.estimate - 1e-12);
            }
        }
    }
}
