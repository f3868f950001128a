//! Joining observed linkage counts onto the enumerated pairings

use crate::pairing::GroupPairing;
use crate::types::{GroupTable, ObservedLinkage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};
use transflow_core::{Error, Result};

/// A pairing together with its observed linked-pair count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedPairing {
    pub pairing: GroupPairing,
    pub num_linked_pairs_observed: u64,
}

/// Left join linkage counts onto pairings by exact `(group_1, group_2)` key
///
/// Pairings without a linkage row get a count of zero. The key is ordered:
/// `(A, B)` and `(B, A)` are different pairings.
///
/// # Errors
/// * a linkage row names a group missing from `groups`
/// * the same ordered pairing appears in more than one linkage row
/// * a count exceeds the pairing's maximum possible sampled pairs
#[instrument(skip_all, fields(pairings = pairings.len(), linkages = linkages.len()))]
pub fn join_linkages(
    groups: &GroupTable,
    pairings: Vec<GroupPairing>,
    linkages: &[ObservedLinkage],
) -> Result<Vec<LinkedPairing>> {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::with_capacity(linkages.len());
    for linkage in linkages {
        for id in [&linkage.group_1, &linkage.group_2] {
            if !groups.contains(id) {
                return Err(Error::unknown_group(id));
            }
        }
        let key = (linkage.group_1.as_str(), linkage.group_2.as_str());
        if counts.insert(key, linkage.count).is_some() {
            return Err(Error::duplicate_linkage(&linkage.group_1, &linkage.group_2));
        }
    }

    let linked = pairings
        .into_iter()
        .map(|pairing| {
            let observed = counts
                .get(&(pairing.group_1.as_str(), pairing.group_2.as_str()))
                .copied()
                .unwrap_or(0);
            if observed > pairing.max_possible_pairs_in_sample {
                return Err(Error::Validation(format!(
                    "pairing ({}, {}) has {} observed linked pairs but at most {} sampled pairs",
                    pairing.group_1, pairing.group_2, observed, pairing.max_possible_pairs_in_sample
                )));
            }
            Ok(LinkedPairing {
                pairing,
                num_linked_pairs_observed: observed,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Joined {} linkage rows; {} pairings have no observed links",
        linkages.len(),
        linked.iter().filter(|l| l.num_linked_pairs_observed == 0).count()
    );
    Ok(linked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::enumerate_pairings;
    use crate::types::PopulationGroup;

    fn groups() -> GroupTable {
        GroupTable::new(&[
            PopulationGroup::new("A", 10, 100.0),
            PopulationGroup::new("B", 10, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_pairings_default_to_zero() {
        let groups = groups();
        let linked = join_linkages(
            &groups,
            enumerate_pairings(&groups).unwrap(),
            &[ObservedLinkage::new("A", "B", 8)],
        )
        .unwrap();
        let counts: Vec<_> = linked.iter().map(|l| l.num_linked_pairs_observed).collect();
        assert_eq!(counts, [0, 8, 0, 0]);
    }

    #[test]
    fn test_key_is_ordered() {
        let groups = groups();
        let linked = join_linkages(
            &groups,
            enumerate_pairings(&groups).unwrap(),
            &[ObservedLinkage::new("B", "A", 2)],
        )
        .unwrap();
        assert_eq!(linked[1].num_linked_pairs_observed, 0);
        assert_eq!(linked[2].num_linked_pairs_observed, 2);
    }

    #[test]
    fn test_unknown_group() {
        let groups = groups();
        let err = join_linkages(
            &groups,
            enumerate_pairings(&groups).unwrap(),
            &[ObservedLinkage::new("A", "C", 1)],
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("'C'"));
    }

    #[test]
    fn test_duplicate_linkage() {
        let groups = groups();
        let result = join_linkages(
            &groups,
            enumerate_pairings(&groups).unwrap(),
            &[ObservedLinkage::new("A", "B", 1), ObservedLinkage::new("A", "B", 1)],
        );
        assert!(matches!(result, Err(Error::Validation(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_count_above_maximum() {
        let groups = groups();
        let result = join_linkages(
            &groups,
            enumerate_pairings(&groups).unwrap(),
            &[ObservedLinkage::new("A", "A", 46)],
        );
        assert!(result.is_err());
    }
}
