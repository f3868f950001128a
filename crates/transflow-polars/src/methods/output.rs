//! Writing a report as a DataFrame

use crate::{FlowColumns, Result};
use polars::prelude::*;
use transflow_confidence::IntervalMethod;
use transflow_estimate::{FlowReport, FlowReportRow};

fn f64_column(name: &str, values: Vec<f64>) -> Column {
    Series::new(name.into(), values).into()
}

fn u64_column(name: &str, values: Vec<u64>) -> Column {
    Series::new(name.into(), values).into()
}

fn pick<F: Fn(&FlowReportRow) -> f64>(rows: &[FlowReportRow], f: F) -> Vec<f64> {
    rows.iter().map(f).collect()
}

/// Convert a report into one row per pairing, in report order
///
/// Interval columns are named `<source>_<method>_{est,lower,upper}`; the
/// region variant adds `_raw_lower` and `_raw_upper`. Undefined values are
/// NaN.
pub fn report_to_frame(report: &FlowReport, columns: &FlowColumns) -> Result<DataFrame> {
    let rows = &report.rows;

    let mut out: Vec<Column> = vec![
        Series::new(
            columns.group1_id.as_str().into(),
            rows.iter().map(|r| r.flow.pairing.group_1.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns.group2_id.as_str().into(),
            rows.iter().map(|r| r.flow.pairing.group_2.clone()).collect::<Vec<_>>(),
        )
        .into(),
        u64_column(
            "sampled_group_1",
            rows.iter().map(|r| r.flow.pairing.sampled_group_1).collect(),
        ),
        u64_column(
            "sampled_group_2",
            rows.iter().map(|r| r.flow.pairing.sampled_group_2).collect(),
        ),
        f64_column("population_group_1", pick(rows, |r| r.flow.pairing.population_group_1)),
        f64_column("population_group_2", pick(rows, |r| r.flow.pairing.population_group_2)),
        u64_column(
            "max_possible_pairs_in_sample",
            rows.iter().map(|r| r.flow.pairing.max_possible_pairs_in_sample).collect(),
        ),
        f64_column(
            "max_possible_pairs_in_population",
            pick(rows, |r| r.flow.pairing.max_possible_pairs_in_population),
        ),
        u64_column(
            "num_linked_pairs_observed",
            rows.iter().map(|r| r.flow.num_linked_pairs_observed).collect(),
        ),
        f64_column("p_hat", pick(rows, |r| r.flow.p_hat)),
        f64_column(
            "est_linkedpairs_in_population",
            pick(rows, |r| r.flow.est_linkedpairs_in_population),
        ),
        f64_column("theta_hat", pick(rows, |r| r.flow.theta_hat)),
    ];

    if rows.iter().any(|r| r.flow.c_hat.is_some()) {
        out.push(f64_column(
            "prob_group_pairing_and_linked",
            pick(rows, |r| r.flow.prob_group_pairing_and_linked.unwrap_or(f64::NAN)),
        ));
        out.push(f64_column("c_hat", pick(rows, |r| r.flow.c_hat.unwrap_or(f64::NAN))));
    }

    for (idx, column) in report.columns.iter().enumerate() {
        let prefix = column.prefix();
        out.push(f64_column(&format!("{prefix}_est"), pick(rows, |r| r.intervals[idx].estimate)));
        out.push(f64_column(&format!("{prefix}_lower"), pick(rows, |r| r.intervals[idx].lower)));
        out.push(f64_column(&format!("{prefix}_upper"), pick(rows, |r| r.intervals[idx].upper)));
        if column.method == IntervalMethod::QuesenberryHurstRegion {
            out.push(f64_column(
                &format!("{prefix}_raw_lower"),
                pick(rows, |r| r.unadjusted[idx].map_or(f64::NAN, |(lower, _)| lower)),
            ));
            out.push(f64_column(
                &format!("{prefix}_raw_upper"),
                pick(rows, |r| r.unadjusted[idx].map_or(f64::NAN, |(_, upper)| upper)),
            ));
        }
    }

    Ok(DataFrame::new(out)?)
}
