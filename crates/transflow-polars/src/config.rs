//! Column naming for the input and output tables

/// Names of the columns read from the group and linkage tables
///
/// The group id columns are also used for the pairing columns of the output
/// table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowColumns {
    /// Group identifier in the group table
    pub group_id: String,
    /// Sampled individuals per group
    pub sampled_count: String,
    /// Population size per group
    pub population_count: String,
    /// Source group in the linkage table
    pub group1_id: String,
    /// Recipient group in the linkage table
    pub group2_id: String,
    /// Observed linked pairs in the linkage table
    pub observed_count: String,
}

impl Default for FlowColumns {
    fn default() -> Self {
        Self {
            group_id: "group_id".to_string(),
            sampled_count: "sampled_count".to_string(),
            population_count: "population_count".to_string(),
            group1_id: "group1_id".to_string(),
            group2_id: "group2_id".to_string(),
            observed_count: "observed_count".to_string(),
        }
    }
}

impl FlowColumns {
    /// Override the group table column names
    pub fn with_group_columns(
        mut self,
        group_id: impl Into<String>,
        sampled_count: impl Into<String>,
        population_count: impl Into<String>,
    ) -> Self {
        self.group_id = group_id.into();
        self.sampled_count = sampled_count.into();
        self.population_count = population_count.into();
        self
    }

    /// Override the linkage table column names
    pub fn with_linkage_columns(
        mut self,
        group1_id: impl Into<String>,
        group2_id: impl Into<String>,
        observed_count: impl Into<String>,
    ) -> Self {
        self.group1_id = group1_id.into();
        self.group2_id = group2_id.into();
        self.observed_count = observed_count.into();
        self
    }
}
