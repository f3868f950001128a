//! Whole-pipeline tests through the facade crate

use approx::assert_relative_eq;
use transflow::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scenario() -> (Vec<PopulationGroup>, Vec<ObservedLinkage>) {
    (
        vec![
            PopulationGroup::new("A", 10, 100.0),
            PopulationGroup::new("B", 10, 100.0),
        ],
        vec![
            ObservedLinkage::new("A", "A", 5),
            ObservedLinkage::new("A", "B", 8),
            ObservedLinkage::new("B", "A", 2),
            ObservedLinkage::new("B", "B", 3),
        ],
    )
}

#[test]
fn test_verbose_run_matches_quiet_run() -> anyhow::Result<()> {
    init_tracing();
    let (groups, linkages) = scenario();

    let quiet = estimate_transmission_flows(&groups, &linkages, &FlowConfig::detailed())?;
    let verbose = estimate_transmission_flows(
        &groups,
        &linkages,
        &FlowConfig::detailed().with_verbose(true),
    )?;
    assert_eq!(quiet, verbose);
    assert_relative_eq!(verbose.theta_hat_sum(), 1.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_sison_glaz_two_cells_through_facade() -> anyhow::Result<()> {
    init_tracing();
    let ci = simultaneous_confidence_intervals(&[8.0, 2.0], IntervalMethod::SisonGlaz, 0.95)?;
    assert_relative_eq!(ci.intervals[0].lower, 0.7, epsilon = 1e-9);
    assert_relative_eq!(ci.intervals[0].upper, 1.0);
    assert_relative_eq!(ci.intervals[1].lower, 0.1, epsilon = 1e-9);
    assert_relative_eq!(ci.intervals[1].upper, 0.48737380007736475, epsilon = 1e-8);
    Ok(())
}

#[test]
fn test_fallback_after_non_convergence() -> anyhow::Result<()> {
    init_tracing();
    let cells = [0.6, 0.5];
    let ci = match simultaneous_confidence_intervals(&cells, IntervalMethod::SisonGlaz, 0.95) {
        Ok(ci) => ci,
        Err(Error::Numerical { cells: failed, .. }) => {
            assert_eq!(failed, cells);
            simultaneous_confidence_intervals(&cells, IntervalMethod::Goodman, 0.95)?
        }
        Err(e) => return Err(e.into()),
    };
    assert_eq!(ci.method, IntervalMethod::Goodman);
    Ok(())
}

#[test]
fn test_report_json_shape() -> anyhow::Result<()> {
    let (groups, linkages) = scenario();
    let report = estimate_transmission_flows(&groups, &linkages, &FlowConfig::detailed())?;
    let json = serde_json::to_value(&report)?;
    let row = &json["rows"][0];
    assert!(row["c_hat"].is_number());
    assert_eq!(row["intervals"].as_array().map(Vec::len), Some(6));
    assert_eq!(json["columns"][5]["method"], "qh_region");
    Ok(())
}
