//! Transmission flow estimation between population groups
//!
//! Turns per-group sampling information and observed linked-pair counts into
//! the bias-adjusted flow vector `theta_hat` over all ordered group pairings,
//! with simultaneous confidence intervals on both the observed counts and the
//! population estimates.
//!
//! The pipeline stages are public on their own:
//!
//! 1. [`enumerate_pairings`]: all `N^2` ordered pairings and their maximum
//!    possible pair counts
//! 2. [`join_linkages`]: observed counts onto pairings, zero when absent
//! 3. [`p_hat`] / [`estimate_flows`]: linkage probability and `theta_hat`
//! 4. [`assemble_report`]: interval columns and the final ordering
//!
//! [`estimate_transmission_flows`] runs them all.

pub mod api;
pub mod config;
mod flow;
mod linkage;
mod pairing;
mod proportion;
mod report;
mod types;

pub use api::{estimate_transmission_flows, flow_estimates};
pub use config::{FlowConfig, ReportOutputs};
pub use flow::{c_hat, estimate_flows, theta_hat, FlowEstimate};
pub use linkage::{join_linkages, LinkedPairing};
pub use pairing::{enumerate_pairings, max_population_pairs, max_sample_pairs, GroupPairing};
pub use proportion::{estimate_proportions, p_hat};
pub use report::{assemble_report, CountSource, FlowReport, FlowReportRow, IntervalColumn};
pub use types::{GroupTable, ObservedLinkage, PopulationGroup};
