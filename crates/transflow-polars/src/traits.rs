//! Extension trait for flow estimation on Polars DataFrames

use crate::{FlowColumns, Result};
use polars::prelude::*;
use transflow_estimate::{FlowConfig, FlowReport};

/// Flow estimation on a group table `DataFrame`
///
/// `self` is the group table (one row per group); the linkage table is
/// passed in.
pub trait TransmissionFlowExt {
    /// Estimate flows using the default column names
    ///
    /// # Arguments
    /// * `linkages` - Linkage table; absent pairings count as zero
    /// * `config` - Confidence level, interval methods and report shape
    ///
    /// # Returns
    /// DataFrame with one row per ordered pairing, sorted by descending
    /// observed count
    fn transmission_flows(&self, linkages: &DataFrame, config: &FlowConfig) -> Result<DataFrame>;

    /// Estimate flows with custom column names
    fn transmission_flows_with_columns(
        &self,
        linkages: &DataFrame,
        columns: &FlowColumns,
        config: &FlowConfig,
    ) -> Result<DataFrame>;

    /// Estimate flows and keep the typed report
    fn transmission_flow_report(
        &self,
        linkages: &DataFrame,
        columns: &FlowColumns,
        config: &FlowConfig,
    ) -> Result<FlowReport>;
}
