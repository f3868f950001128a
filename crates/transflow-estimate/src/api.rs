//! High-level entry points running the whole pipeline

use crate::config::FlowConfig;
use crate::flow::{estimate_flows, FlowEstimate};
use crate::linkage::join_linkages;
use crate::pairing::enumerate_pairings;
use crate::report::{assemble_report, FlowReport};
use crate::types::{GroupTable, ObservedLinkage, PopulationGroup};
use tracing::{info, instrument};
use transflow_core::Result;

/// Flow estimates without intervals, in enumeration order
///
/// # Arguments
/// * `groups` - Sampling table, one row per group
/// * `linkages` - Observed linked pairs; absent pairings count as zero
/// * `detailed` - Also compute `prob_group_pairing_and_linked` and `c_hat`
pub fn flow_estimates(
    groups: &[PopulationGroup],
    linkages: &[ObservedLinkage],
    detailed: bool,
) -> Result<Vec<FlowEstimate>> {
    let table = GroupTable::new(groups)?;
    let linked = join_linkages(&table, enumerate_pairings(&table)?, linkages)?;
    Ok(estimate_flows(linked, &table, detailed))
}

/// Estimate transmission flows and their simultaneous intervals
///
/// # Example
/// ```rust
/// use transflow_estimate::{
///     estimate_transmission_flows, FlowConfig, ObservedLinkage, PopulationGroup,
/// };
///
/// let groups = [
///     PopulationGroup::new("A", 10, 100.0),
///     PopulationGroup::new("B", 10, 100.0),
/// ];
/// let linkages = [
///     ObservedLinkage::new("A", "A", 5),
///     ObservedLinkage::new("A", "B", 8),
///     ObservedLinkage::new("B", "A", 2),
///     ObservedLinkage::new("B", "B", 3),
/// ];
///
/// let report = estimate_transmission_flows(&groups, &linkages, &FlowConfig::default()).unwrap();
/// assert_eq!(report.len(), 4);
/// assert!((report.theta_hat_sum() - 1.0).abs() < 1e-9);
/// ```
#[instrument(skip_all, fields(groups = groups.len(), linkages = linkages.len()))]
pub fn estimate_transmission_flows(
    groups: &[PopulationGroup],
    linkages: &[ObservedLinkage],
    config: &FlowConfig,
) -> Result<FlowReport> {
    let table = GroupTable::new(groups)?;
    let pairings = enumerate_pairings(&table)?;
    if config.verbose {
        info!("{} groups, {} ordered pairings", table.len(), pairings.len());
    }

    let linked = join_linkages(&table, pairings, linkages)?;
    if config.verbose {
        let observed: u64 = linked.iter().map(|l| l.num_linked_pairs_observed).sum();
        info!("{} linked pairs observed across {} linkage rows", observed, linkages.len());
    }

    let flows = estimate_flows(linked, &table, config.outputs.detailed_fields);
    assemble_report(flows, config)
}
