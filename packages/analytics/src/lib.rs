#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Correlation and significance engine for the contamination survey.
//!
//! For each mine type, correlates distance-to-mine against the three
//! mercury concentration measures over the pairwise-complete working set,
//! and derives a two-tailed p-value from Student's t distribution. A
//! degenerate (group, metric) pair fails on its own; it never suppresses
//! the other pairs' results.

pub mod special;

use mercury_map_analytics_models::{
    CorrelationReport, GroupCorrelations, MetricCorrelation, MetricOutcome,
};
use mercury_map_basin_models::{ContaminationSample, Metric, MineType};
use thiserror::Error;

/// Minimum number of complete pairs for a defined t statistic (df = n − 2).
pub const MIN_SAMPLES: usize = 3;

/// Errors for a degenerate (mine type, metric) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Fewer complete pairs than [`MIN_SAMPLES`].
    #[error("too few samples: {n} complete pairs, need at least {MIN_SAMPLES}")]
    TooFewSamples {
        /// Number of complete pairs found.
        n: usize,
    },

    /// One of the columns is constant, so the correlation is undefined.
    #[error("zero variance: correlation undefined")]
    ZeroVariance,
}

/// Pearson correlation coefficient between two equal-length series.
///
/// The result is clamped to [-1, 1] to absorb floating-point rounding in
/// the perfect-correlation cases.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if fewer than [`MIN_SAMPLES`] pairs are given
/// or either series has zero variance.
#[allow(clippy::cast_precision_loss)]
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, AnalyticsError> {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < MIN_SAMPLES {
        return Err(AnalyticsError::TooFewSamples { n });
    }

    let len = n as f64;
    let mean_x = x.iter().sum::<f64>() / len;
    let mean_y = y.iter().sum::<f64>() / len;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance = dx.mul_add(dy, covariance);
        variance_x = dx.mul_add(dx, variance_x);
        variance_y = dy.mul_add(dy, variance_y);
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return Err(AnalyticsError::ZeroVariance);
    }

    Ok((covariance / denominator).clamp(-1.0, 1.0))
}

/// Two-tailed p-value for correlation `r` over `n` complete pairs.
///
/// t = r·√(n−2) / √(1−r²), p = 2·(1 − F(|t|)) with df = n − 2. Perfect
/// correlation of either sign drives t to infinity and yields p = 0; the
/// positive and negative cases are treated identically.
///
/// # Errors
///
/// Returns [`AnalyticsError::TooFewSamples`] if `n` is below
/// [`MIN_SAMPLES`].
#[allow(clippy::cast_precision_loss)]
pub fn two_tailed_p_value(r: f64, n: usize) -> Result<f64, AnalyticsError> {
    if n < MIN_SAMPLES {
        return Err(AnalyticsError::TooFewSamples { n });
    }

    let df = (n - 2) as f64;
    let t = if r.abs() >= 1.0 {
        f64::INFINITY
    } else {
        r * df.sqrt() / (1.0 - r * r).sqrt()
    };

    Ok(2.0 * (1.0 - special::students_t_cdf(t.abs(), df)))
}

/// Correlates one metric against distance within a group's working set.
///
/// Only rows where both the distance and the metric cell are present enter
/// the computation (pairwise-complete).
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the working set is degenerate.
pub fn metric_correlation(
    samples: &[ContaminationSample],
    metric: Metric,
) -> Result<MetricCorrelation, AnalyticsError> {
    let (distances, values): (Vec<f64>, Vec<f64>) = samples
        .iter()
        .filter_map(|s| Some((s.distance_km?, s.metric(metric)?)))
        .unzip();

    let r = pearson(&distances, &values)?;
    let p_value = two_tailed_p_value(r, distances.len())?;

    Ok(MetricCorrelation {
        metric,
        r,
        p_value,
        n: distances.len(),
    })
}

/// Builds the full correlation report, grouped by mine type.
///
/// Only mine types present in the survey produce a group. Every metric in
/// a group gets an outcome; degenerate pairs carry their failure reason so
/// the rest of the table still renders.
#[must_use]
pub fn correlate_by_mine_type(samples: &[ContaminationSample]) -> CorrelationReport {
    let mut groups = Vec::new();

    for &mine_type in MineType::all() {
        let group: Vec<ContaminationSample> = samples
            .iter()
            .copied()
            .filter(|s| s.mine_type == Some(mine_type))
            .collect();
        if group.is_empty() {
            continue;
        }

        let outcomes = Metric::all()
            .iter()
            .map(|&metric| match metric_correlation(&group, metric) {
                Ok(result) => MetricOutcome::Computed(result),
                Err(e) => {
                    log::warn!("{mine_type}/{metric}: {e}");
                    MetricOutcome::Degenerate {
                        metric,
                        reason: e.to_string(),
                    }
                }
            })
            .collect();

        groups.push(GroupCorrelations {
            mine_type,
            outcomes,
        });
    }

    CorrelationReport { groups }
}
