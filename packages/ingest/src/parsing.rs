//! Cell-level coercion helpers.
//!
//! The survey files contain occasional non-numeric garbage. Each cell is
//! parsed on its own; a failure becomes `None`, so a bad cell only excludes
//! its row from the computations that need that column.

use mercury_map_basin_models::MineType;

/// Parses a decimal cell. Empty, non-numeric, and non-finite values become
/// `None`.
#[must_use]
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a mine-type category cell (case-insensitive). Unrecognized labels
/// become `None`.
#[must_use]
pub fn coerce_mine_type(cell: &str) -> Option<MineType> {
    cell.trim().parse::<MineType>().ok()
}

/// Parses a latitude/longitude cell pair. Either cell failing drops the
/// pair.
#[must_use]
pub fn coerce_lat_lng(lat: &str, lng: &str) -> Option<(f64, f64)> {
    Some((coerce_numeric(lat)?, coerce_numeric(lng)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(coerce_numeric("1.5"), Some(1.5));
        assert_eq!(coerce_numeric(" -3.25 "), Some(-3.25));
        assert_eq!(coerce_numeric("10"), Some(10.0));
    }

    #[test]
    fn garbage_becomes_none() {
        assert_eq!(coerce_numeric("bad"), None);
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("   "), None);
        assert_eq!(coerce_numeric("1.2.3"), None);
    }

    #[test]
    fn non_finite_values_become_none() {
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("inf"), None);
        assert_eq!(coerce_numeric("-inf"), None);
    }

    #[test]
    fn mine_type_coercion_is_case_insensitive() {
        assert_eq!(coerce_mine_type(" illegal "), Some(MineType::Illegal));
        assert_eq!(coerce_mine_type("Legal"), Some(MineType::Legal));
        assert_eq!(coerce_mine_type("unknown"), None);
        assert_eq!(coerce_mine_type(""), None);
    }

    #[test]
    fn lat_lng_requires_both_cells() {
        assert_eq!(coerce_lat_lng("1.0", "2.0"), Some((1.0, 2.0)));
        assert_eq!(coerce_lat_lng("bad", "2.0"), None);
        assert_eq!(coerce_lat_lng("1.0", ""), None);
    }
}
