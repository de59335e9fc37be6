//! Typed loaders for the four study datasets.
//!
//! Each loader owns the mapping from one file's columns to its record type.
//! Point rows with unparseable coordinates are skipped with a warning;
//! survey cells are coerced individually into optional values. Malformed
//! WKT in the legal-mines file fails that load outright.

use std::io::Read;
use std::path::Path;

use mercury_map_basin_models::{ContaminationSample, FishKillSite, MinePoint};
use mercury_map_geometry::polygon_centroid;

use crate::{LoadError, Table, parsing};

const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const GEOMETRY: &str = "geometry";
const MINE_TYPE: &str = "mine_type";
const DISTANCE_KM: &str = "distance_km";
const MEAN_VALUE: &str = "mean_value";
const MEAN_CARNIVOROUS_VALUE: &str = "mean_carnivorous_value";
const MEAN_NON_CARNIVOROUS_VALUE: &str = "mean_non_carnivorous_value";

/// Reads mine locations from a point dataset (`latitude`, `longitude`).
///
/// # Errors
///
/// Returns [`LoadError`] if the stream is not CSV or a coordinate column is
/// missing.
pub fn read_mine_points(reader: impl Read, file: &str) -> Result<Vec<MinePoint>, LoadError> {
    let points = read_coordinates(reader, file)?;
    Ok(points
        .into_iter()
        .map(|(latitude, longitude)| MinePoint {
            latitude,
            longitude,
        })
        .collect())
}

/// Loads mine locations from a point dataset file.
///
/// # Errors
///
/// See [`read_mine_points`]; additionally fails if the file cannot be
/// opened.
pub fn load_mine_points(path: &Path) -> Result<Vec<MinePoint>, LoadError> {
    read_mine_points(std::fs::File::open(path)?, &path.display().to_string())
}

/// Reads fish die-off sites from a point dataset (`latitude`, `longitude`).
///
/// # Errors
///
/// Returns [`LoadError`] if the stream is not CSV or a coordinate column is
/// missing.
pub fn read_fish_kill_sites(reader: impl Read, file: &str) -> Result<Vec<FishKillSite>, LoadError> {
    let points = read_coordinates(reader, file)?;
    Ok(points
        .into_iter()
        .map(|(latitude, longitude)| FishKillSite {
            latitude,
            longitude,
        })
        .collect())
}

/// Loads fish die-off sites from a point dataset file.
///
/// # Errors
///
/// See [`read_fish_kill_sites`]; additionally fails if the file cannot be
/// opened.
pub fn load_fish_kill_sites(path: &Path) -> Result<Vec<FishKillSite>, LoadError> {
    read_fish_kill_sites(std::fs::File::open(path)?, &path.display().to_string())
}

/// Reads legal-mine boundaries (`geometry` WKT column) and reduces each to
/// its area centroid.
///
/// Every row must carry a valid polygon; one malformed boundary fails the
/// whole load so the map never silently drops a licensed site.
///
/// # Errors
///
/// Returns [`LoadError`] if the stream is not CSV, the `geometry` column is
/// missing, or any WKT cell fails to parse or reduce.
pub fn read_legal_mine_centroids(
    reader: impl Read,
    file: &str,
) -> Result<Vec<MinePoint>, LoadError> {
    let table = Table::from_reader(reader)?;
    let geometry_idx = table
        .column(GEOMETRY)
        .ok_or_else(|| missing(GEOMETRY, file))?;

    let mut centroids = Vec::with_capacity(table.len());
    for row in table.rows() {
        let centroid =
            polygon_centroid(row.get(geometry_idx).unwrap_or("")).map_err(|source| {
                LoadError::Geometry {
                    file: file.to_owned(),
                    source,
                }
            })?;
        centroids.push(MinePoint {
            latitude: centroid.latitude,
            longitude: centroid.longitude,
        });
    }

    log::info!(
        "{file}: reduced {} boundaries to centroids",
        centroids.len()
    );
    Ok(centroids)
}

/// Loads legal-mine centroids from a boundary dataset file.
///
/// # Errors
///
/// See [`read_legal_mine_centroids`]; additionally fails if the file cannot
/// be opened.
pub fn load_legal_mine_centroids(path: &Path) -> Result<Vec<MinePoint>, LoadError> {
    read_legal_mine_centroids(std::fs::File::open(path)?, &path.display().to_string())
}

/// Reads contamination survey rows, coercing every cell independently.
///
/// A cell that fails coercion becomes `None`; the row itself is always
/// kept, since different computations drop different column subsets.
///
/// # Errors
///
/// Returns [`LoadError`] if the stream is not CSV or any of the five survey
/// columns is missing.
pub fn read_contamination_samples(
    reader: impl Read,
    file: &str,
) -> Result<Vec<ContaminationSample>, LoadError> {
    let table = Table::from_reader(reader)?;

    let mine_type_idx = table
        .column(MINE_TYPE)
        .ok_or_else(|| missing(MINE_TYPE, file))?;
    let distance_idx = table
        .column(DISTANCE_KM)
        .ok_or_else(|| missing(DISTANCE_KM, file))?;
    let mean_idx = table
        .column(MEAN_VALUE)
        .ok_or_else(|| missing(MEAN_VALUE, file))?;
    let carnivorous_idx = table
        .column(MEAN_CARNIVOROUS_VALUE)
        .ok_or_else(|| missing(MEAN_CARNIVOROUS_VALUE, file))?;
    let non_carnivorous_idx = table
        .column(MEAN_NON_CARNIVOROUS_VALUE)
        .ok_or_else(|| missing(MEAN_NON_CARNIVOROUS_VALUE, file))?;

    let mut samples = Vec::with_capacity(table.len());
    let mut uncategorized = 0usize;
    for row in table.rows() {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let sample = ContaminationSample {
            mine_type: parsing::coerce_mine_type(cell(mine_type_idx)),
            distance_km: parsing::coerce_numeric(cell(distance_idx)),
            mean_value: parsing::coerce_numeric(cell(mean_idx)),
            mean_carnivorous_value: parsing::coerce_numeric(cell(carnivorous_idx)),
            mean_non_carnivorous_value: parsing::coerce_numeric(cell(non_carnivorous_idx)),
        };
        if sample.mine_type.is_none() {
            uncategorized += 1;
        }
        samples.push(sample);
    }

    if uncategorized > 0 {
        log::warn!("{file}: {uncategorized} rows have an unrecognized mine_type label");
    }
    log::info!("{file}: loaded {} survey rows", samples.len());
    Ok(samples)
}

/// Loads contamination survey rows from a file.
///
/// # Errors
///
/// See [`read_contamination_samples`]; additionally fails if the file
/// cannot be opened.
pub fn load_contamination_samples(path: &Path) -> Result<Vec<ContaminationSample>, LoadError> {
    read_contamination_samples(std::fs::File::open(path)?, &path.display().to_string())
}

/// Shared latitude/longitude extraction for the point datasets. Rows with
/// unparseable coordinates are skipped with a warning.
fn read_coordinates(reader: impl Read, file: &str) -> Result<Vec<(f64, f64)>, LoadError> {
    let table = Table::from_reader(reader)?;
    let lat_idx = table
        .column(LATITUDE)
        .ok_or_else(|| missing(LATITUDE, file))?;
    let lng_idx = table
        .column(LONGITUDE)
        .ok_or_else(|| missing(LONGITUDE, file))?;

    let mut points = Vec::with_capacity(table.len());
    let mut skipped = 0usize;
    for row in table.rows() {
        match parsing::coerce_lat_lng(row.get(lat_idx).unwrap_or(""), row.get(lng_idx).unwrap_or(""))
        {
            Some(pair) => points.push(pair),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("{file}: skipped {skipped} rows with unparseable coordinates");
    }
    log::info!("{file}: loaded {} points", points.len());
    Ok(points)
}

fn missing(column: &'static str, file: &str) -> LoadError {
    LoadError::MissingColumn {
        column,
        file: file.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use mercury_map_basin_models::MineType;

    use super::*;

    #[test]
    fn loads_point_dataset_with_mixed_case_headers() {
        let csv = "Latitude,Longitude,Name\n-3.1,-60.0,a\n-4.2,-61.5,b\n";
        let points = read_mine_points(csv.as_bytes(), "illegal_mines.csv").unwrap();
        assert_eq!(points.len(), 2);
        assert!((points[0].latitude - -3.1).abs() < f64::EPSILON);
        assert!((points[1].longitude - -61.5).abs() < f64::EPSILON);
    }

    #[test]
    fn skips_rows_with_unparseable_coordinates() {
        let csv = "latitude,longitude\n-3.1,-60.0\nbad,-61.0\n-4.0,\n";
        let sites = read_fish_kill_sites(csv.as_bytes(), "fish_kill.csv").unwrap();
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn missing_coordinate_column_is_an_error() {
        let csv = "latitude,name\n-3.1,a\n";
        let err = read_mine_points(csv.as_bytes(), "illegal_mines.csv").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "longitude",
                ..
            }
        ));
    }

    #[test]
    fn reduces_wkt_boundaries_to_centroids() {
        let csv = "id,GEOMETRY\n1,\"POLYGON((0 0, 2 0, 2 2, 0 2, 0 0))\"\n";
        let centroids = read_legal_mine_centroids(csv.as_bytes(), "lmines.csv").unwrap();
        assert_eq!(centroids.len(), 1);
        assert!((centroids[0].latitude - 1.0).abs() < 1e-9);
        assert!((centroids[0].longitude - 1.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_wkt_fails_the_load() {
        let csv = "geometry\n\"POLYGON((0 0, 2 0\"\n";
        let err = read_legal_mine_centroids(csv.as_bytes(), "lmines.csv").unwrap_err();
        assert!(matches!(err, LoadError::Geometry { .. }));
    }

    #[test]
    fn survey_cells_are_coerced_independently() {
        let csv = "mine_type,distance_km,mean_value,mean_carnivorous_value,mean_non_carnivorous_value\n\
                   Illegal,1.5,3.2,4.1,2.2\n\
                   Legal,bad,4.0,1.0,1.0\n\
                   Illegal,2.0,bad,0.5,0.5\n";
        let samples = read_contamination_samples(csv.as_bytes(), "fk.csv").unwrap();
        assert_eq!(samples.len(), 3);

        assert_eq!(samples[0].mine_type, Some(MineType::Illegal));
        assert_eq!(samples[0].distance_km, Some(1.5));
        assert_eq!(samples[0].mean_value, Some(3.2));

        assert_eq!(samples[1].mine_type, Some(MineType::Legal));
        assert_eq!(samples[1].distance_km, None);
        assert_eq!(samples[1].mean_value, Some(4.0));

        assert_eq!(samples[2].distance_km, Some(2.0));
        assert_eq!(samples[2].mean_value, None);
    }

    #[test]
    fn unknown_mine_type_label_becomes_none() {
        let csv = "mine_type,distance_km,mean_value,mean_carnivorous_value,mean_non_carnivorous_value\n\
                   Abandoned,1.0,1.0,1.0,1.0\n";
        let samples = read_contamination_samples(csv.as_bytes(), "fk.csv").unwrap();
        assert_eq!(samples[0].mine_type, None);
        assert_eq!(samples[0].distance_km, Some(1.0));
    }

    #[test]
    fn missing_survey_column_is_an_error() {
        let csv = "mine_type,distance_km,mean_value\nIllegal,1.0,2.0\n";
        let err = read_contamination_samples(csv.as_bytes(), "fk.csv").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "mean_carnivorous_value",
                ..
            }
        ));
    }
}
