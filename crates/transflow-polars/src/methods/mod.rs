//! DataFrame conversions and the extension trait implementation

mod input;
mod output;

pub use input::{groups_from_frame, linkages_from_frame};
pub use output::report_to_frame;

use crate::{FlowColumns, Result, TransmissionFlowExt};
use polars::prelude::*;
use transflow_estimate::{estimate_transmission_flows, FlowConfig, FlowReport};

impl TransmissionFlowExt for DataFrame {
    fn transmission_flow_report(
        &self,
        linkages: &DataFrame,
        columns: &FlowColumns,
        config: &FlowConfig,
    ) -> Result<FlowReport> {
        let groups = groups_from_frame(self, columns)?;
        let linkages = linkages_from_frame(linkages, columns)?;
        Ok(estimate_transmission_flows(&groups, &linkages, config)?)
    }

    fn transmission_flows_with_columns(
        &self,
        linkages: &DataFrame,
        columns: &FlowColumns,
        config: &FlowConfig,
    ) -> Result<DataFrame> {
        let report = self.transmission_flow_report(linkages, columns, config)?;
        report_to_frame(&report, columns)
    }

    fn transmission_flows(&self, linkages: &DataFrame, config: &FlowConfig) -> Result<DataFrame> {
        self.transmission_flows_with_columns(linkages, &FlowColumns::default(), config)
    }
}
