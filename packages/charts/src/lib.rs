#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scatter chart construction for the contamination survey.
//!
//! Builds Vega-Lite specs relating distance-to-mine to a chosen mercury
//! measure. Rows missing either coerced value are dropped; points are
//! colored by mine type with a fixed qualitative palette, and the chart
//! supports pan/zoom entirely in the display layer.

use mercury_map_basin_models::{ContaminationSample, Metric, MineType};
use thiserror::Error;

/// Mark size for every plotted point.
const CIRCLE_SIZE: u32 = 60;

/// Fixed qualitative palette keyed by mine type.
const COLOR_SCHEME: &str = "set1";

/// Errors raised while building a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    /// No rows survived filtering and coercion.
    #[error("no plottable rows for {metric}")]
    NoRows {
        /// The metric that was requested on the y axis.
        metric: Metric,
    },
}

/// A built chart: heading, Vega-Lite document, and how many points made it
/// through filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Heading displayed above the embed.
    pub title: String,
    /// The Vega-Lite document.
    pub spec: serde_json::Value,
    /// Number of plotted points.
    pub point_count: usize,
}

/// Builds a scatter chart of distance against the chosen metric.
///
/// Applies the optional mine-type pre-filter, then keeps only rows where
/// the category and both numeric cells are present. The y field is named
/// after the metric's column so axis titles match the survey vocabulary.
///
/// # Errors
///
/// Returns [`ChartError::NoRows`] if nothing survives filtering.
pub fn scatter_chart(
    samples: &[ContaminationSample],
    filter: Option<MineType>,
    metric: Metric,
    title: &str,
) -> Result<ChartSpec, ChartError> {
    let column = metric.to_string();

    let values: Vec<serde_json::Value> = samples
        .iter()
        .filter(|s| filter.is_none() || s.mine_type == filter)
        .filter_map(|s| {
            let mine_type = s.mine_type?;
            let distance = s.distance_km?;
            let value = s.metric(metric)?;

            let mut row = serde_json::Map::new();
            row.insert("distance_km".to_owned(), distance.into());
            row.insert(column.clone(), value.into());
            row.insert("mine_type".to_owned(), mine_type.to_string().into());
            Some(serde_json::Value::Object(row))
        })
        .collect();

    if values.is_empty() {
        return Err(ChartError::NoRows { metric });
    }
    let point_count = values.len();

    let spec = serde_json::json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "width": "container",
        "data": {"values": values},
        "mark": {"type": "circle", "size": CIRCLE_SIZE},
        "encoding": {
            "x": {"field": "distance_km", "type": "quantitative"},
            "y": {"field": column, "type": "quantitative"},
            "color": {
                "field": "mine_type",
                "type": "nominal",
                "scale": {"scheme": COLOR_SCHEME}
            },
            "tooltip": [
                {"field": "distance_km", "type": "quantitative"},
                {"field": column, "type": "quantitative"},
                {"field": "mine_type", "type": "nominal"}
            ]
        },
        "params": [{"name": "pan_zoom", "select": "interval", "bind": "scales"}]
    });

    Ok(ChartSpec {
        title: title.to_owned(),
        spec,
        point_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(
        mine_type: Option<MineType>,
        distance_km: Option<f64>,
        mean_value: Option<f64>,
        mean_carnivorous_value: Option<f64>,
    ) -> ContaminationSample {
        ContaminationSample {
            mine_type,
            distance_km,
            mean_value,
            mean_carnivorous_value,
            mean_non_carnivorous_value: None,
        }
    }

    #[test]
    fn drops_rows_missing_either_coerced_value() {
        // Mirrors the survey arriving as ("1.5","3.2",Illegal),
        // ("bad","4.0",Legal), ("2.0","bad",Illegal) after coercion.
        let samples = [
            sample(Some(MineType::Illegal), Some(1.5), Some(3.2), None),
            sample(Some(MineType::Legal), None, Some(4.0), None),
            sample(Some(MineType::Illegal), Some(2.0), None, None),
        ];
        let chart = scatter_chart(&samples, None, Metric::MeanValue, "all mines").unwrap();
        assert_eq!(chart.point_count, 1);

        let values = &chart.spec["data"]["values"];
        assert_eq!(values.as_array().unwrap().len(), 1);
        assert!((values[0]["distance_km"].as_f64().unwrap() - 1.5).abs() < f64::EPSILON);
        assert!((values[0]["mean_value"].as_f64().unwrap() - 3.2).abs() < f64::EPSILON);
        assert_eq!(values[0]["mine_type"], "Illegal");
    }

    #[test]
    fn mine_type_filter_applies_before_plotting() {
        let samples = [
            sample(Some(MineType::Illegal), Some(1.0), Some(2.0), None),
            sample(Some(MineType::Legal), Some(3.0), Some(4.0), None),
        ];
        let chart =
            scatter_chart(&samples, Some(MineType::Illegal), Metric::MeanValue, "t").unwrap();
        assert_eq!(chart.point_count, 1);
        assert_eq!(chart.spec["data"]["values"][0]["mine_type"], "Illegal");
    }

    #[test]
    fn y_field_is_named_after_the_metric() {
        let samples = [sample(
            Some(MineType::Illegal),
            Some(1.0),
            Some(2.0),
            Some(5.0),
        )];
        let chart = scatter_chart(
            &samples,
            Some(MineType::Illegal),
            Metric::MeanCarnivorousValue,
            "t",
        )
        .unwrap();
        assert_eq!(chart.spec["encoding"]["y"]["field"], "mean_carnivorous_value");
        assert!(
            (chart.spec["data"]["values"][0]["mean_carnivorous_value"]
                .as_f64()
                .unwrap()
                - 5.0)
                .abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn chart_is_colored_by_mine_type_with_fixed_scheme() {
        let samples = [sample(Some(MineType::Illegal), Some(1.0), Some(2.0), None)];
        let chart = scatter_chart(&samples, None, Metric::MeanValue, "t").unwrap();
        assert_eq!(chart.spec["encoding"]["color"]["field"], "mine_type");
        assert_eq!(
            chart.spec["encoding"]["color"]["scale"]["scheme"],
            COLOR_SCHEME
        );
    }

    #[test]
    fn chart_binds_pan_zoom_to_scales() {
        let samples = [sample(Some(MineType::Illegal), Some(1.0), Some(2.0), None)];
        let chart = scatter_chart(&samples, None, Metric::MeanValue, "t").unwrap();
        assert_eq!(chart.spec["params"][0]["bind"], "scales");
    }

    #[test]
    fn empty_result_is_an_error() {
        let samples = [sample(Some(MineType::Legal), Some(1.0), Some(2.0), None)];
        let err = scatter_chart(&samples, Some(MineType::Illegal), Metric::MeanValue, "t")
            .unwrap_err();
        assert_eq!(
            err,
            ChartError::NoRows {
                metric: Metric::MeanValue
            }
        );
    }

    #[test]
    fn uncategorized_rows_are_dropped() {
        let samples = [
            sample(None, Some(1.0), Some(2.0), None),
            sample(Some(MineType::Legal), Some(3.0), Some(4.0), None),
        ];
        let chart = scatter_chart(&samples, None, Metric::MeanValue, "t").unwrap();
        assert_eq!(chart.point_count, 1);
    }
}
