//! Configuration for a flow estimation run

use serde::{Deserialize, Serialize};
use transflow_confidence::{ConfidenceLevel, EdgeworthTerms, IntervalMethod, Sides};

/// Which outputs a report carries
///
/// Basic and detailed reports share one code path; they differ only in the
/// fields and interval methods requested here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutputs {
    /// Fill in `prob_group_pairing_and_linked` and `c_hat`
    pub detailed_fields: bool,
    /// Methods run on the observed linked-pair counts
    pub observed_methods: Vec<IntervalMethod>,
    /// Methods run on the rescaled population estimates
    pub estimated_methods: Vec<IntervalMethod>,
}

impl ReportOutputs {
    /// Goodman intervals on observed and estimated counts
    pub fn basic() -> Self {
        Self {
            detailed_fields: false,
            observed_methods: vec![IntervalMethod::Goodman],
            estimated_methods: vec![IntervalMethod::Goodman],
        }
    }

    /// Detailed fields, Goodman on observed counts and the full set of
    /// multinomial methods on estimated counts
    pub fn detailed() -> Self {
        Self {
            detailed_fields: true,
            observed_methods: vec![IntervalMethod::Goodman],
            estimated_methods: vec![
                IntervalMethod::Goodman,
                IntervalMethod::GoodmanCc,
                IntervalMethod::SisonGlaz,
                IntervalMethod::QuesenberryHurst,
                IntervalMethod::QuesenberryHurstRegion,
            ],
        }
    }
}

impl Default for ReportOutputs {
    fn default() -> Self {
        Self::basic()
    }
}

/// Parameters for [`crate::estimate_transmission_flows`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Joint confidence level of every interval family
    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
    #[serde(default)]
    pub sides: Sides,
    /// Edgeworth polynomial used by the Sison-Glaz search
    #[serde(default)]
    pub edgeworth: EdgeworthTerms,
    #[serde(default)]
    pub outputs: ReportOutputs,
    /// Emit per-stage summaries at info level; never changes results
    #[serde(default)]
    pub verbose: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            confidence_level: ConfidenceLevel::NINETY_FIVE,
            sides: Sides::TwoSided,
            edgeworth: EdgeworthTerms::Reference,
            outputs: ReportOutputs::basic(),
            verbose: false,
        }
    }
}

impl FlowConfig {
    /// Default settings with the detailed report shape
    pub fn detailed() -> Self {
        Self {
            outputs: ReportOutputs::detailed(),
            ..Self::default()
        }
    }

    pub fn with_confidence_level(mut self, confidence_level: ConfidenceLevel) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }

    pub fn with_edgeworth(mut self, edgeworth: EdgeworthTerms) -> Self {
        self.edgeworth = edgeworth;
        self
    }

    pub fn with_outputs(mut self, outputs: ReportOutputs) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
