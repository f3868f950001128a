//! Report assembly: flow estimates joined with simultaneous intervals
//!
//! Intervals are computed per column, where a column is one method applied
//! to one count source:
//!
//! - **observed**: the observed linked-pair counts of every pairing
//! - **estimated**: `theta_hat` rescaled to the observed total, over the
//!   pairings with a defined estimate
//!
//! Rows are then ordered by descending observed count, ties kept in
//! enumeration order.

use crate::config::FlowConfig;
use crate::flow::FlowEstimate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};
use transflow_confidence::{
    ConfidenceInterval, IntervalMethod, IntervalRequest, SimultaneousIntervals,
};
use transflow_core::Result;

/// Which count vector an interval column is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSource {
    Observed,
    Estimated,
}

impl CountSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Estimated => "estimated",
        }
    }
}

/// One method applied to one count source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalColumn {
    pub source: CountSource,
    pub method: IntervalMethod,
}

impl IntervalColumn {
    pub fn new(source: CountSource, method: IntervalMethod) -> Self {
        Self { source, method }
    }

    /// Column prefix such as `estimated_sisonglaz`
    pub fn prefix(&self) -> String {
        format!("{}_{}", self.source.label(), self.method.label())
    }
}

impl fmt::Display for IntervalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// A flow row with one interval per report column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReportRow {
    #[serde(flatten)]
    pub flow: FlowEstimate,
    /// Intervals in [`FlowReport::columns`] order; NaN for undefined rows
    pub intervals: Vec<ConfidenceInterval>,
    /// Unclipped bounds, present for region-variant columns only
    pub unadjusted: Vec<Option<(f64, f64)>>,
}

/// The final output table of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    /// Interval columns in attachment order
    pub columns: Vec<IntervalColumn>,
    /// Rows sorted by descending observed count
    pub rows: Vec<FlowReportRow>,
    /// Joint region volume per column
    pub region_volumes: Vec<f64>,
    /// Rows whose estimate is undefined
    pub undefined_rows: usize,
    pub confidence_level: f64,
}

impl FlowReport {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, column: IntervalColumn) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    /// Interval of `row` in `column`
    pub fn interval(&self, row: usize, column: IntervalColumn) -> Option<&ConfidenceInterval> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.intervals.get(idx)
    }

    /// Find a row by its ordered pairing
    pub fn row(&self, group_1: &str, group_2: &str) -> Option<&FlowReportRow> {
        self.rows
            .iter()
            .find(|r| r.flow.pairing.group_1 == group_1 && r.flow.pairing.group_2 == group_2)
    }

    /// `theta_hat` column in report order
    pub fn theta_hat(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.flow.theta_hat).collect()
    }

    /// Sum of the defined `theta_hat` values; 1 up to rounding
    pub fn theta_hat_sum(&self) -> f64 {
        transflow_core::utils::nan_sum(&self.theta_hat())
    }
}

/// Intervals for one column, spread back over all rows
struct ColumnResult {
    intervals: Vec<ConfidenceInterval>,
    unadjusted: Vec<Option<(f64, f64)>>,
    volume: f64,
}

/// Scatter a column's intervals onto the rows they were computed for
fn scatter(
    computed: SimultaneousIntervals,
    row_indices: &[usize],
    n_rows: usize,
) -> ColumnResult {
    let mut intervals = vec![ConfidenceInterval::undefined(computed.confidence_level); n_rows];
    let mut unadjusted = vec![None; n_rows];
    for (pos, &row) in row_indices.iter().enumerate() {
        intervals[row] = computed.intervals[pos];
        if let Some(raw) = &computed.unadjusted {
            unadjusted[row] = Some(raw[pos]);
        }
    }
    ColumnResult {
        intervals,
        unadjusted,
        volume: computed.volume(),
    }
}

/// Cells and their row positions for one count source
fn source_cells(flows: &[FlowEstimate], source: CountSource) -> (Vec<f64>, Vec<usize>) {
    match source {
        CountSource::Observed => (
            flows.iter().map(|f| f.num_linked_pairs_observed as f64).collect(),
            (0..flows.len()).collect(),
        ),
        CountSource::Estimated => {
            let total_observed: f64 = flows
                .iter()
                .map(|f| f.num_linked_pairs_observed as f64)
                .sum();
            flows
                .iter()
                .enumerate()
                .filter(|(_, f)| f.is_defined())
                .map(|(i, f)| (f.theta_hat * total_observed, i))
                .unzip()
        }
    }
}

fn compute_column(
    flows: &[FlowEstimate],
    column: IntervalColumn,
    config: &FlowConfig,
) -> Result<ColumnResult> {
    let (cells, rows) = source_cells(flows, column.source);
    let computed = IntervalRequest::new(column.method, config.confidence_level)
        .with_sides(config.sides)
        .with_edgeworth(config.edgeworth)
        .compute(&cells)?;
    debug!("{}: {} cells, volume={:.6e}", column, cells.len(), computed.volume());
    Ok(scatter(computed, &rows, flows.len()))
}

/// Attach the configured interval columns and sort the rows
///
/// # Errors
/// Propagates the interval engine's errors, e.g. a zero observed total or a
/// Sison-Glaz search that does not converge.
#[instrument(skip_all, fields(rows = flows.len()))]
pub fn assemble_report(flows: Vec<FlowEstimate>, config: &FlowConfig) -> Result<FlowReport> {
    let columns: Vec<IntervalColumn> = config
        .outputs
        .observed_methods
        .iter()
        .map(|&m| IntervalColumn::new(CountSource::Observed, m))
        .chain(
            config
                .outputs
                .estimated_methods
                .iter()
                .map(|&m| IntervalColumn::new(CountSource::Estimated, m)),
        )
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<ColumnResult> = {
        use rayon::prelude::*;
        columns
            .par_iter()
            .map(|&column| compute_column(&flows, column, config))
            .collect::<Result<_>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<ColumnResult> = columns
        .iter()
        .map(|&column| compute_column(&flows, column, config))
        .collect::<Result<_>>()?;

    let region_volumes = results.iter().map(|r| r.volume).collect();
    let undefined_rows = flows.iter().filter(|f| !f.is_defined()).count();

    let mut rows: Vec<FlowReportRow> = flows
        .into_iter()
        .enumerate()
        .map(|(i, flow)| FlowReportRow {
            flow,
            intervals: results.iter().map(|r| r.intervals[i]).collect(),
            unadjusted: results.iter().map(|r| r.unadjusted[i]).collect(),
        })
        .collect();
    // Stable, so ties keep enumeration order
    rows.sort_by(|a, b| {
        b.flow
            .num_linked_pairs_observed
            .cmp(&a.flow.num_linked_pairs_observed)
    });

    let report = FlowReport {
        columns,
        rows,
        region_volumes,
        undefined_rows,
        confidence_level: config.confidence_level.value(),
    };
    if config.verbose {
        info!(
            "Report: {} rows, {} undefined, {} interval columns, theta_hat sum {:.12}",
            report.len(),
            report.undefined_rows,
            report.columns.len(),
            report.theta_hat_sum()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::GroupPairing;
    use crate::types::PopulationGroup;

    fn flow(id: &str, observed: u64, theta: f64) -> FlowEstimate {
        let group = PopulationGroup::new(id, 10, 100.0);
        FlowEstimate {
            pairing: GroupPairing::new(&group, &group).unwrap(),
            num_linked_pairs_observed: observed,
            p_hat: observed as f64 / 45.0,
            est_linkedpairs_in_population: 0.0,
            theta_hat: theta,
            prob_group_pairing_and_linked: None,
            c_hat: None,
        }
    }

    #[test]
    fn test_column_prefix() {
        let column =
            IntervalColumn::new(CountSource::Estimated, IntervalMethod::QuesenberryHurstRegion);
        assert_eq!(column.prefix(), "estimated_qh_region");
        assert_eq!(
            IntervalColumn::new(CountSource::Observed, IntervalMethod::Goodman).to_string(),
            "observed_goodman"
        );
    }

    #[test]
    fn test_estimated_cells_skip_undefined() {
        let flows = [flow("A", 2, 0.25), flow("B", 0, f64::NAN), flow("C", 6, 0.75)];
        let (cells, rows) = source_cells(&flows, CountSource::Estimated);
        assert_eq!(rows, [0, 2]);
        assert_eq!(cells, [2.0, 6.0]);

        let (cells, rows) = source_cells(&flows, CountSource::Observed);
        assert_eq!(rows, [0, 1, 2]);
        assert_eq!(cells, [2.0, 0.0, 6.0]);
    }

    #[test]
    fn test_undefined_rows_get_nan_intervals() {
        let flows = vec![flow("A", 2, 0.25), flow("B", 0, f64::NAN), flow("C", 6, 0.75)];
        let report = assemble_report(flows, &FlowConfig::default()).unwrap();

        assert_eq!(report.undefined_rows, 1);
        let estimated = IntervalColumn::new(CountSource::Estimated, IntervalMethod::Goodman);
        let observed = IntervalColumn::new(CountSource::Observed, IntervalMethod::Goodman);
        // Sorted: C (6), A (2), B (0)
        assert_eq!(report.rows[0].flow.pairing.group_1, "C");
        assert!(!report.interval(2, estimated).unwrap().is_defined());
        assert!(report.interval(2, observed).unwrap().is_defined());
        assert!(report.interval(0, estimated).unwrap().is_defined());
    }

    #[test]
    fn test_stable_sort_on_ties() {
        let flows = vec![flow("A", 3, 0.3), flow("B", 4, 0.4), flow("C", 3, 0.3)];
        let report = assemble_report(flows, &FlowConfig::default()).unwrap();
        let order: Vec<_> = report
            .rows
            .iter()
            .map(|r| r.flow.pairing.group_1.as_str())
            .collect();
        assert_eq!(order, ["B", "A", "C"]);
    }
}
