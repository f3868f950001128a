//! Population flow estimates
//!
//! Each pairing's observed linkage probability is extrapolated to the
//! population and normalised across all pairings into the multinomial flow
//! vector `theta_hat`. Pairings with an undefined `p_hat` stay undefined and
//! are left out of the normalising sum.

use crate::linkage::LinkedPairing;
use crate::pairing::{max_population_pairs, GroupPairing};
use crate::proportion::estimate_proportions;
use crate::types::GroupTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use transflow_core::utils::{nan_count, nan_sum, normalize};

/// One row of the flow table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEstimate {
    #[serde(flatten)]
    pub pairing: GroupPairing,
    pub num_linked_pairs_observed: u64,
    /// Observed linkage probability, NaN when no sampled pair exists
    pub p_hat: f64,
    /// `max_possible_pairs_in_population * p_hat`
    pub est_linkedpairs_in_population: f64,
    /// Share of all estimated population linked pairs
    pub theta_hat: f64,
    /// Probability that a random population pair falls in this pairing and
    /// is linked; detailed mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_group_pairing_and_linked: Option<f64>,
    /// Probability of at least one link into group 2; detailed mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_hat: Option<f64>,
}

impl FlowEstimate {
    /// Whether the row carries a usable estimate
    pub fn is_defined(&self) -> bool {
        !self.theta_hat.is_nan()
    }
}

/// Normalise estimated linked pairs into `theta_hat`, skipping NaN entries
pub fn theta_hat(est_linkedpairs_in_population: &[f64]) -> Vec<f64> {
    normalize(est_linkedpairs_in_population)
}

/// `1 - (1 - p_hat)^population_size_group_2`
pub fn c_hat(p_hat: f64, population_group_2: f64) -> f64 {
    1.0 - (1.0 - p_hat).powf(population_group_2)
}

/// Compute flow estimates for joined pairings
///
/// With `detailed` set, `prob_group_pairing_and_linked` and `c_hat` are
/// filled in; `theta_hat` is identical either way.
#[instrument(skip_all, fields(pairings = linked.len(), detailed = detailed))]
pub fn estimate_flows(
    linked: Vec<LinkedPairing>,
    groups: &GroupTable,
    detailed: bool,
) -> Vec<FlowEstimate> {
    let p = estimate_proportions(&linked);
    let est: Vec<f64> = linked
        .iter()
        .zip(&p)
        .map(|(l, &p)| l.pairing.max_possible_pairs_in_population * p)
        .collect();
    let theta = theta_hat(&est);

    let total_population = groups.total_population();
    let total_population_pairs = max_population_pairs(total_population, total_population, true);
    debug!(
        "Estimated linked pairs in population: {:.4}; total population pairs: {:.1}",
        nan_sum(&est),
        total_population_pairs
    );

    let undefined = nan_count(&p);
    if undefined > 0 {
        warn!(
            "{} pairing(s) have no possible sampled pairs; their estimates are undefined",
            undefined
        );
    }
    if nan_sum(&est) == 0.0 {
        warn!("No linked pairs estimated in the population; theta_hat is undefined");
    }

    linked
        .into_iter()
        .zip(p)
        .zip(est)
        .zip(theta)
        .map(|(((l, p), est), theta)| {
            let (prob, c) = if detailed {
                (
                    Some(l.pairing.max_possible_pairs_in_population / total_population_pairs * p),
                    Some(c_hat(p, l.pairing.population_group_2)),
                )
            } else {
                (None, None)
            };
            FlowEstimate {
                pairing: l.pairing,
                num_linked_pairs_observed: l.num_linked_pairs_observed,
                p_hat: p,
                est_linkedpairs_in_population: est,
                theta_hat: theta,
                prob_group_pairing_and_linked: prob,
                c_hat: c,
            }
        })
        .collect()
}
