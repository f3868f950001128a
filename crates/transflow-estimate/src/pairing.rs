//! Enumeration of ordered group pairings
//!
//! Flows are directed, so every ordered pair `(g1, g2)` is a separate
//! pairing, self-pairs included: `N` groups give `N^2` pairings.

use crate::types::{GroupTable, PopulationGroup};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use transflow_core::{Error, Result};

/// One ordered pairing with its maximum possible pair counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPairing {
    pub group_1: String,
    pub group_2: String,
    pub sampled_group_1: u64,
    pub sampled_group_2: u64,
    pub population_group_1: f64,
    pub population_group_2: f64,
    /// Distinct pairs that can be formed among the sampled individuals
    pub max_possible_pairs_in_sample: u64,
    /// Distinct pairs that can be formed in the population
    pub max_possible_pairs_in_population: f64,
}

impl GroupPairing {
    /// Build the pairing `(from, to)`
    ///
    /// # Errors
    /// [`Error::Validation`] when the sampled pair count overflows.
    pub fn new(from: &PopulationGroup, to: &PopulationGroup) -> Result<Self> {
        let self_pair = from.id == to.id;
        Ok(Self {
            group_1: from.id.clone(),
            group_2: to.id.clone(),
            sampled_group_1: from.sampled,
            sampled_group_2: to.sampled,
            population_group_1: from.population,
            population_group_2: to.population,
            max_possible_pairs_in_sample: max_sample_pairs(from.sampled, to.sampled, self_pair)?,
            max_possible_pairs_in_population: max_population_pairs(
                from.population,
                to.population,
                self_pair,
            ),
        })
    }

    /// Whether both sides are the same group
    pub fn is_self_pair(&self) -> bool {
        self.group_1 == self.group_2
    }
}

/// Maximum number of sampled pairs
///
/// A self-pairing counts unordered pairs `n(n-1)/2`; a group with at most
/// one sampled individual has none. Counts that do not fit in a `u64` are a
/// validation error.
///
/// # Example
/// ```rust
/// use transflow_estimate::max_sample_pairs;
///
/// assert_eq!(max_sample_pairs(10, 10, true).unwrap(), 45);
/// assert_eq!(max_sample_pairs(10, 10, false).unwrap(), 100);
/// assert_eq!(max_sample_pairs(1, 1, true).unwrap(), 0);
/// assert!(max_sample_pairs(u64::MAX, 2, false).is_err());
/// ```
pub fn max_sample_pairs(n1: u64, n2: u64, self_pair: bool) -> Result<u64> {
    if self_pair {
        if n1 <= 1 {
            Ok(0)
        } else {
            n1.checked_mul(n1 - 1)
                .map(|pairs| pairs / 2)
                .ok_or_else(|| Error::pair_count_overflow(n1, n1))
        }
    } else {
        n1.checked_mul(n2).ok_or_else(|| Error::pair_count_overflow(n1, n2))
    }
}

/// Maximum number of population pairs, same rule as [`max_sample_pairs`]
/// on real-valued sizes
pub fn max_population_pairs(n1: f64, n2: f64, self_pair: bool) -> f64 {
    if self_pair {
        if n1 <= 1.0 {
            0.0
        } else {
            n1 * (n1 - 1.0) / 2.0
        }
    } else {
        n1 * n2
    }
}

/// All `N^2` ordered pairings, group 1 varying slowest
#[instrument(skip(groups), fields(groups = groups.len()))]
pub fn enumerate_pairings(groups: &GroupTable) -> Result<Vec<GroupPairing>> {
    let pairings = groups
        .groups()
        .iter()
        .flat_map(|from| groups.groups().iter().map(move |to| GroupPairing::new(from, to)))
        .collect::<Result<Vec<_>>>()?;
    debug!("Enumerated {} pairings", pairings.len());
    Ok(pairings)
}
