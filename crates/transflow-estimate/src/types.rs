//! Input records and the validated group table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use transflow_core::{Error, Result};

/// One population group with its sampling information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationGroup {
    /// Group identifier
    pub id: String,
    /// Number of individuals sampled from the group
    pub sampled: u64,
    /// Estimated size of the group in the population
    pub population: f64,
}

impl PopulationGroup {
    pub fn new(id: impl Into<String>, sampled: u64, population: f64) -> Self {
        Self {
            id: id.into(),
            sampled,
            population,
        }
    }
}

/// Observed directed linked pairs between the samples of two groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedLinkage {
    /// Source group
    pub group_1: String,
    /// Recipient group
    pub group_2: String,
    /// Number of linked pairs found
    pub count: u64,
}

impl ObservedLinkage {
    pub fn new(group_1: impl Into<String>, group_2: impl Into<String>, count: u64) -> Self {
        Self {
            group_1: group_1.into(),
            group_2: group_2.into(),
            count,
        }
    }
}

/// Validated set of groups for one analysis run
///
/// Groups keep their first-seen order, which fixes the enumeration order of
/// pairings and therefore the tie order of the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTable {
    groups: Vec<PopulationGroup>,
    index: HashMap<String, usize>,
}

impl GroupTable {
    /// Validate and index a list of groups
    ///
    /// # Errors
    /// * no groups at all
    /// * a population size that is negative or not finite
    /// * the same identifier defined twice with different sizes
    ///
    /// Exact duplicates are collapsed into one group.
    pub fn new(groups: &[PopulationGroup]) -> Result<Self> {
        if groups.is_empty() {
            return Err(Error::Validation("The group table is empty".to_string()));
        }

        let mut table = Self {
            groups: Vec::with_capacity(groups.len()),
            index: HashMap::with_capacity(groups.len()),
        };
        for group in groups {
            if !group.population.is_finite() {
                return Err(Error::non_finite(&format!(
                    "population size of group '{}'",
                    group.id
                )));
            }
            if group.population < 0.0 {
                return Err(Error::negative_value(
                    &format!("population size of group '{}'", group.id),
                    group.population,
                ));
            }

            match table.index.get(&group.id) {
                Some(&existing) if table.groups[existing] == *group => {
                    warn!("Group '{}' is defined more than once; collapsing duplicates", group.id);
                }
                Some(_) => return Err(Error::conflicting_group(&group.id)),
                None => {
                    table.index.insert(group.id.clone(), table.groups.len());
                    table.groups.push(group.clone());
                }
            }
        }
        Ok(table)
    }

    /// Groups in first-seen order
    pub fn groups(&self) -> &[PopulationGroup] {
        &self.groups
    }

    /// Look up a group by identifier
    pub fn get(&self, id: &str) -> Option<&PopulationGroup> {
        self.index.get(id).map(|&i| &self.groups[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false; construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of the population sizes
    pub fn total_population(&self) -> f64 {
        self.groups.iter().map(|g| g.population).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_table_keeps_order() {
        let table = GroupTable::new(&[
            PopulationGroup::new("B", 3, 30.0),
            PopulationGroup::new("A", 5, 50.0),
        ])
        .unwrap();
        let ids: Vec<_> = table.groups().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
        assert_eq!(table.get("A").unwrap().sampled, 5);
        assert_eq!(table.total_population(), 80.0);
    }

    #[test]
    fn test_identical_duplicates_collapse() {
        let table = GroupTable::new(&[
            PopulationGroup::new("A", 5, 50.0),
            PopulationGroup::new("A", 5, 50.0),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_conflicting_duplicates_rejected() {
        let err = GroupTable::new(&[
            PopulationGroup::new("A", 5, 50.0),
            PopulationGroup::new("A", 6, 50.0),
        ])
        .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("conflicting"));
    }

    #[test]
    fn test_bad_population_rejected() {
        assert!(GroupTable::new(&[PopulationGroup::new("A", 1, -1.0)]).is_err());
        assert!(GroupTable::new(&[PopulationGroup::new("A", 1, f64::NAN)]).is_err());
        assert!(GroupTable::new(&[]).is_err());
    }
}
