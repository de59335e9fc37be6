#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial layer composition for the basin map.
//!
//! Aggregates the three point datasets into styled scatterplot layers and
//! places the initial camera at the unweighted mean of each dataset's mean
//! coordinate, so a sparse dataset carries the same visual weight as a
//! dense one. The composed spec serializes to camelCase JSON for the
//! deck.gl embed in the report page.

use mercury_map_basin_models::{FishKillSite, MinePoint};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color with 0-255 channels.
pub type Rgba = [u8; 4];

/// Illegal mines render red.
pub const ILLEGAL_MINE_COLOR: Rgba = [255, 0, 0, 160];
/// Fish poisoning sites render blue.
pub const FISH_KILL_COLOR: Rgba = [0, 0, 255, 160];
/// Legal-mine centroids render green.
pub const LEGAL_MINE_COLOR: Rgba = [0, 255, 0, 160];

/// Hover text template; placeholders are substituted per point.
pub const TOOLTIP_TEXT: &str = "Latitude: {latitude}\nLongitude: {longitude}";

const MINE_RADIUS_METERS: f64 = 10_000.0;
const FISH_KILL_RADIUS_METERS: f64 = 20_000.0;
const DEFAULT_ZOOM: f64 = 5.0;
const DEFAULT_PITCH: f64 = 40.0;

/// Errors raised while composing the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A dataset has no points, so its mean coordinate is undefined.
    #[error("dataset `{dataset}` is empty")]
    EmptyDataset {
        /// Which dataset was empty.
        dataset: &'static str,
    },
}

/// A point rendered on a scatterplot layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl From<MinePoint> for LayerPoint {
    fn from(point: MinePoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl From<FishKillSite> for LayerPoint {
    fn from(site: FishKillSite) -> Self {
        Self {
            latitude: site.latitude,
            longitude: site.longitude,
        }
    }
}

/// One styled, pickable scatterplot layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterplotLayer {
    /// Layer identifier used by the embed.
    pub id: String,
    /// The points to draw.
    pub data: Vec<LayerPoint>,
    /// Fill color for every point.
    pub color: Rgba,
    /// Point radius in meters.
    pub radius_meters: f64,
    /// Whether hovering a point raises the tooltip.
    pub pickable: bool,
}

/// Camera placement for the initial render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Camera latitude.
    pub latitude: f64,
    /// Camera longitude.
    pub longitude: f64,
    /// Initial zoom level.
    pub zoom: f64,
    /// Camera tilt in degrees, non-zero for 3D relief.
    pub pitch: f64,
}

/// A legend entry paired with each layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Human-readable layer label.
    pub label: String,
    /// Swatch color, matching the layer.
    pub color: Rgba,
}

/// The composed map: layers, camera, tooltip template, legend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSpec {
    /// Layers in draw order.
    pub layers: Vec<ScatterplotLayer>,
    /// Initial camera placement.
    pub view_state: ViewState,
    /// Hover text template.
    pub tooltip: String,
    /// Legend entries in layer order.
    pub legend: Vec<LegendEntry>,
}

/// Composes the three datasets into a map spec.
///
/// The camera centers on the unweighted mean of the three per-dataset mean
/// coordinates, not the global mean of all points.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyDataset`] if any dataset has no points.
pub fn compose(
    illegal_mines: &[MinePoint],
    fish_kill_sites: &[FishKillSite],
    legal_mine_centroids: &[MinePoint],
) -> Result<MapSpec, ComposeError> {
    let illegal: Vec<LayerPoint> = illegal_mines.iter().copied().map(Into::into).collect();
    let fish_kill: Vec<LayerPoint> = fish_kill_sites.iter().copied().map(Into::into).collect();
    let legal: Vec<LayerPoint> = legal_mine_centroids
        .iter()
        .copied()
        .map(Into::into)
        .collect();

    let centers = [
        mean_center(&illegal, "illegal_mines")?,
        mean_center(&fish_kill, "fish_kill")?,
        mean_center(&legal, "legal_mines")?,
    ];
    #[allow(clippy::cast_precision_loss)]
    let count = centers.len() as f64;
    let latitude = centers.iter().map(|c| c.0).sum::<f64>() / count;
    let longitude = centers.iter().map(|c| c.1).sum::<f64>() / count;

    let layers = vec![
        ScatterplotLayer {
            id: "illegal-mines".to_owned(),
            data: illegal,
            color: ILLEGAL_MINE_COLOR,
            radius_meters: MINE_RADIUS_METERS,
            pickable: true,
        },
        ScatterplotLayer {
            id: "fish-kill-sites".to_owned(),
            data: fish_kill,
            color: FISH_KILL_COLOR,
            radius_meters: FISH_KILL_RADIUS_METERS,
            pickable: true,
        },
        ScatterplotLayer {
            id: "legal-mines".to_owned(),
            data: legal,
            color: LEGAL_MINE_COLOR,
            radius_meters: MINE_RADIUS_METERS,
            pickable: true,
        },
    ];

    let legend = vec![
        LegendEntry {
            label: "Illegal Mines".to_owned(),
            color: ILLEGAL_MINE_COLOR,
        },
        LegendEntry {
            label: "Legal Mines".to_owned(),
            color: LEGAL_MINE_COLOR,
        },
        LegendEntry {
            label: "Fish Poisoning Sites".to_owned(),
            color: FISH_KILL_COLOR,
        },
    ];

    Ok(MapSpec {
        layers,
        view_state: ViewState {
            latitude,
            longitude,
            zoom: DEFAULT_ZOOM,
            pitch: DEFAULT_PITCH,
        },
        tooltip: TOOLTIP_TEXT.to_owned(),
        legend,
    })
}

/// Mean coordinate of one dataset.
#[allow(clippy::cast_precision_loss)]
fn mean_center(points: &[LayerPoint], dataset: &'static str) -> Result<(f64, f64), ComposeError> {
    if points.is_empty() {
        return Err(ComposeError::EmptyDataset { dataset });
    }
    let len = points.len() as f64;
    let latitude = points.iter().map(|p| p.latitude).sum::<f64>() / len;
    let longitude = points.iter().map(|p| p.longitude).sum::<f64>() / len;
    Ok((latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine(latitude: f64, longitude: f64) -> MinePoint {
        MinePoint {
            latitude,
            longitude,
        }
    }

    fn site(latitude: f64, longitude: f64) -> FishKillSite {
        FishKillSite {
            latitude,
            longitude,
        }
    }

    #[test]
    fn camera_is_mean_of_dataset_means() {
        let spec = compose(
            &[mine(0.0, 0.0)],
            &[site(10.0, 10.0)],
            &[mine(20.0, 20.0)],
        )
        .unwrap();
        assert!((spec.view_state.latitude - 10.0).abs() < 1e-12);
        assert!((spec.view_state.longitude - 10.0).abs() < 1e-12);
    }

    #[test]
    fn dataset_cardinality_does_not_skew_the_camera() {
        // Five illegal mines at the origin against one point each in the
        // other datasets: a global mean would sit near the origin, the
        // per-dataset mean stays at (10, 10).
        let illegal = vec![mine(0.0, 0.0); 5];
        let spec = compose(&illegal, &[site(10.0, 10.0)], &[mine(20.0, 20.0)]).unwrap();
        assert!((spec.view_state.latitude - 10.0).abs() < 1e-12);
        assert!((spec.view_state.longitude - 10.0).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_is_a_validation_error() {
        let err = compose(&[], &[site(1.0, 1.0)], &[mine(2.0, 2.0)]).unwrap_err();
        assert_eq!(
            err,
            ComposeError::EmptyDataset {
                dataset: "illegal_mines"
            }
        );

        let err = compose(&[mine(1.0, 1.0)], &[], &[mine(2.0, 2.0)]).unwrap_err();
        assert_eq!(
            err,
            ComposeError::EmptyDataset {
                dataset: "fish_kill"
            }
        );
    }

    #[test]
    fn layers_carry_fixed_styling() {
        let spec = compose(&[mine(0.0, 0.0)], &[site(1.0, 1.0)], &[mine(2.0, 2.0)]).unwrap();
        assert_eq!(spec.layers.len(), 3);

        let illegal = &spec.layers[0];
        assert_eq!(illegal.color, ILLEGAL_MINE_COLOR);
        assert!((illegal.radius_meters - 10_000.0).abs() < f64::EPSILON);
        assert!(illegal.pickable);

        let fish_kill = &spec.layers[1];
        assert_eq!(fish_kill.color, FISH_KILL_COLOR);
        assert!((fish_kill.radius_meters - 20_000.0).abs() < f64::EPSILON);

        assert_eq!(spec.layers[2].color, LEGAL_MINE_COLOR);
    }

    #[test]
    fn view_state_uses_tilted_camera() {
        let spec = compose(&[mine(0.0, 0.0)], &[site(1.0, 1.0)], &[mine(2.0, 2.0)]).unwrap();
        assert!((spec.view_state.zoom - 5.0).abs() < f64::EPSILON);
        assert!((spec.view_state.pitch - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tooltip_exposes_both_coordinates() {
        let spec = compose(&[mine(0.0, 0.0)], &[site(1.0, 1.0)], &[mine(2.0, 2.0)]).unwrap();
        assert!(spec.tooltip.contains("{latitude}"));
        assert!(spec.tooltip.contains("{longitude}"));
    }

    #[test]
    fn spec_serializes_to_camel_case() {
        let spec = compose(&[mine(0.0, 0.0)], &[site(1.0, 1.0)], &[mine(2.0, 2.0)]).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("viewState").is_some());
        assert!(json["layers"][0].get("radiusMeters").is_some());
    }
}
