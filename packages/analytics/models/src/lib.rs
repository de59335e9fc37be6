#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Correlation result types for the significance report.
//!
//! These types carry full-precision values; the `display_*` helpers apply
//! the report's fixed formatting (r to 3 decimals, p to 13 decimals).

use mercury_map_basin_models::{Metric, MineType};
use serde::{Deserialize, Serialize};

/// Pearson correlation and significance for one (mine type, metric) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCorrelation {
    /// Concentration measure correlated against distance.
    pub metric: Metric,
    /// Pearson correlation coefficient, in [-1, 1].
    pub r: f64,
    /// Two-tailed p-value, in [0, 1].
    pub p_value: f64,
    /// Number of complete (distance, metric) pairs behind the estimate.
    pub n: usize,
}

impl MetricCorrelation {
    /// Correlation formatted for display (3 decimals).
    #[must_use]
    pub fn display_r(&self) -> String {
        format!("{:.3}", self.r)
    }

    /// P-value formatted for display (13 decimals).
    #[must_use]
    pub fn display_p(&self) -> String {
        format!("{:.13}", self.p_value)
    }
}

/// Outcome of one (mine type, metric) computation.
///
/// A degenerate pair carries its failure reason instead of suppressing the
/// rest of its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricOutcome {
    /// The pair yielded a well-defined correlation.
    Computed(MetricCorrelation),
    /// The pair was degenerate; the reason is human-readable.
    Degenerate {
        /// The metric that could not be correlated.
        metric: Metric,
        /// Why the computation was undefined.
        reason: String,
    },
}

impl MetricOutcome {
    /// The metric this outcome belongs to.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        match self {
            Self::Computed(result) => result.metric,
            Self::Degenerate { metric, .. } => *metric,
        }
    }
}

/// All metric outcomes for one mine type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCorrelations {
    /// The group's mine type.
    pub mine_type: MineType,
    /// One outcome per metric, in [`Metric::all`] order.
    pub outcomes: Vec<MetricOutcome>,
}

/// The full correlation report: one group per mine type present in the
/// survey. Recomputed on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationReport {
    /// Per-group results, in [`MineType::all`] order.
    pub groups: Vec<GroupCorrelations>,
}
