#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Well-known-text polygon parsing and centroid reduction.
//!
//! Legal-mine boundaries arrive as WKT `POLYGON`/`MULTIPOLYGON` strings.
//! Each boundary is reduced to its planar area centroid so it can join the
//! point datasets on the map as a single marker.

use std::str::FromStr as _;

use geo::{Centroid as _, MultiPolygon};
use thiserror::Error;

/// Errors raised while reducing a WKT boundary to a point.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The text is not syntactically valid WKT.
    #[error("invalid WKT: {0}")]
    Parse(String),

    /// The WKT is valid but describes something other than a polygon.
    #[error("unsupported geometry type: expected POLYGON or MULTIPOLYGON")]
    Unsupported,

    /// The polygon is empty, so its centroid is undefined.
    #[error("degenerate polygon: centroid undefined")]
    DegeneratePolygon,
}

/// A polygon reduced to its area centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonCentroid {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Parses a WKT polygon and returns its planar area centroid.
///
/// Accepts `POLYGON` and `MULTIPOLYGON` geometries. The centroid always
/// lies within the bounding box of the input coordinates; for a convex
/// polygon it lies inside the polygon itself. Pure function.
///
/// # Errors
///
/// Returns [`GeometryError`] if the text is not valid WKT, describes a
/// non-polygon geometry, or the polygon is empty.
pub fn polygon_centroid(text: &str) -> Result<PolygonCentroid, GeometryError> {
    let parsed =
        wkt::Wkt::<f64>::from_str(text).map_err(|e| GeometryError::Parse(e.to_string()))?;
    let geometry =
        geo::Geometry::<f64>::try_from(parsed).map_err(|e| GeometryError::Parse(e.to_string()))?;

    let multi_polygon = match geometry {
        geo::Geometry::MultiPolygon(mp) => mp,
        geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
        _ => return Err(GeometryError::Unsupported),
    };

    let centroid = multi_polygon
        .centroid()
        .ok_or(GeometryError::DegeneratePolygon)?;

    Ok(PolygonCentroid {
        latitude: centroid.y(),
        longitude: centroid.x(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_centroid_is_center() {
        let c = polygon_centroid("POLYGON((0 0, 2 0, 2 2, 0 2, 0 0))").unwrap();
        assert!((c.longitude - 1.0).abs() < 1e-9, "x: {}", c.longitude);
        assert!((c.latitude - 1.0).abs() < 1e-9, "y: {}", c.latitude);
    }

    #[test]
    fn l_shape_centroid_stays_in_bounding_box() {
        // Two rectangles: 4x1 along the x axis plus 1x2 stacked above the
        // left end. Area centroid works out to (1.5, 1.0).
        let c = polygon_centroid("POLYGON((0 0, 4 0, 4 1, 1 1, 1 3, 0 3, 0 0))").unwrap();
        assert!((c.longitude - 1.5).abs() < 1e-9, "x: {}", c.longitude);
        assert!((c.latitude - 1.0).abs() < 1e-9, "y: {}", c.latitude);
        assert!(c.longitude >= 0.0 && c.longitude <= 4.0);
        assert!(c.latitude >= 0.0 && c.latitude <= 3.0);
    }

    #[test]
    fn convex_polygon_contains_its_centroid() {
        let c = polygon_centroid("POLYGON((0 0, 3 0, 3 3, 0 3, 0 0))").unwrap();
        assert!(c.longitude > 0.0 && c.longitude < 3.0);
        assert!(c.latitude > 0.0 && c.latitude < 3.0);
    }

    #[test]
    fn multipolygon_centroid_weights_by_area() {
        // Two unit squares symmetric about x = 2 give a centroid at x = 2.
        let c = polygon_centroid(
            "MULTIPOLYGON(((0 0, 1 0, 1 1, 0 1, 0 0)), ((3 0, 4 0, 4 1, 3 1, 3 0)))",
        )
        .unwrap();
        assert!((c.longitude - 2.0).abs() < 1e-9, "x: {}", c.longitude);
        assert!((c.latitude - 0.5).abs() < 1e-9, "y: {}", c.latitude);
    }

    #[test]
    fn malformed_wkt_is_a_parse_error() {
        assert!(matches!(
            polygon_centroid("POLYGON((0 0, 1 1"),
            Err(GeometryError::Parse(_))
        ));
        assert!(matches!(
            polygon_centroid("not wkt at all"),
            Err(GeometryError::Parse(_))
        ));
    }

    #[test]
    fn non_polygon_geometry_is_unsupported() {
        assert!(matches!(
            polygon_centroid("POINT(1 2)"),
            Err(GeometryError::Unsupported)
        ));
        assert!(matches!(
            polygon_centroid("LINESTRING(0 0, 1 1)"),
            Err(GeometryError::Unsupported)
        ));
    }

    #[test]
    fn empty_polygon_has_no_centroid() {
        assert!(matches!(
            polygon_centroid("POLYGON EMPTY"),
            Err(GeometryError::DegeneratePolygon)
        ));
    }
}
