//! Polars integration for transmission flow estimation
//!
//! Reads the group and linkage tables from DataFrames, runs the flow
//! pipeline and returns the report as a DataFrame.
//!
//! # Example
//!
//! ```rust,no_run
//! use polars::prelude::*;
//! use transflow_estimate::FlowConfig;
//! use transflow_polars::TransmissionFlowExt;
//!
//! let groups = df![
//!     "group_id" => ["A", "B"],
//!     "sampled_count" => [10i64, 10],
//!     "population_count" => [100.0, 100.0],
//! ]?;
//! let linkages = df![
//!     "group1_id" => ["A", "A", "B", "B"],
//!     "group2_id" => ["A", "B", "A", "B"],
//!     "observed_count" => [5i64, 8, 2, 3],
//! ]?;
//!
//! let flows = groups.transmission_flows(&linkages, &FlowConfig::default())?;
//! println!("{flows}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod methods;
mod traits;

pub use config::FlowColumns;
pub use error::{Error, Result};
pub use methods::{groups_from_frame, linkages_from_frame, report_to_frame};
pub use traits::TransmissionFlowExt;
