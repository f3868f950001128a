//! Transmission flow estimation between population groups
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`core`]: error taxonomy and distribution helpers
//! - [`confidence`]: simultaneous confidence intervals for multinomial
//!   proportions
//! - [`estimate`]: the flow pipeline from group and linkage tables to a
//!   sorted report
//! - `polars` (feature `polars`): DataFrame front end
//!
//! # Example
//!
//! ```rust
//! use transflow::prelude::*;
//!
//! let groups = [
//!     PopulationGroup::new("A", 10, 100.0),
//!     PopulationGroup::new("B", 10, 100.0),
//! ];
//! let linkages = [
//!     ObservedLinkage::new("A", "B", 8),
//!     ObservedLinkage::new("B", "A", 2),
//! ];
//!
//! let report = estimate_transmission_flows(&groups, &linkages, &FlowConfig::detailed()).unwrap();
//! for row in &report.rows {
//!     println!(
//!         "{} -> {}: theta_hat = {:.3}",
//!         row.flow.pairing.group_1, row.flow.pairing.group_2, row.flow.theta_hat
//!     );
//! }
//! ```

pub use transflow_confidence as confidence;
pub use transflow_core as core;
pub use transflow_estimate as estimate;
#[cfg(feature = "polars")]
pub use transflow_polars as polars;

pub use transflow_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use transflow_confidence::{
        simultaneous_confidence_intervals, ConfidenceInterval, ConfidenceLevel, EdgeworthTerms,
        IntervalMethod, IntervalRequest, SimultaneousIntervalEstimator, SimultaneousIntervals,
        Sides,
    };
    pub use transflow_core::{Error, Result};
    pub use transflow_estimate::{
        estimate_transmission_flows, flow_estimates, CountSource, FlowConfig, FlowReport,
        IntervalColumn, ObservedLinkage, PopulationGroup, ReportOutputs,
    };
    #[cfg(feature = "polars")]
    pub use transflow_polars::{FlowColumns, TransmissionFlowExt};
}
