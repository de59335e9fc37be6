#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loading for the mercury contamination study.
//!
//! Reads the four input CSV files into typed records. Headers are trimmed
//! and lowercased on load so column lookup is case-insensitive; numeric
//! cells are coerced individually, with garbage values becoming `None`
//! rather than failing the load. A missing file or a missing required
//! column is a hard [`LoadError`].

pub mod datasets;
pub mod parsing;

use std::io::Read;

/// Errors raised while loading an input dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing column `{column}` in {file}")]
    MissingColumn {
        /// The lowercase column name that was expected.
        column: &'static str,
        /// Label of the file being loaded.
        file: String,
    },

    /// A geometry cell could not be reduced to a centroid.
    #[error("geometry error in {file}: {source}")]
    Geometry {
        /// Label of the file being loaded.
        file: String,
        /// The underlying parse or reduction failure.
        #[source]
        source: mercury_map_geometry::GeometryError,
    },
}

/// An in-memory CSV table with trimmed, lowercased headers.
///
/// Rows are kept as raw string records; all typing happens cell by cell in
/// the dataset loaders so that one bad cell never poisons its neighbors.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    /// Reads a table from any CSV byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the stream is not well-formed CSV.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            rows.push(result?);
        }

        Ok(Self { headers, rows })
    }

    /// Reads a table from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be opened or is not
    /// well-formed CSV.
    pub fn from_path(path: &std::path::Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Index of a column by its lowercase name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the raw data rows.
    pub fn rows(&self) -> std::slice::Iter<'_, csv::StringRecord> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_trimmed_and_lowercased() {
        let table = Table::from_reader(" Latitude ,LONGITUDE\n1.0,2.0\n".as_bytes()).unwrap();
        assert_eq!(table.column("latitude"), Some(0));
        assert_eq!(table.column("longitude"), Some(1));
        assert_eq!(table.column("Latitude"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_column_lookup_is_none() {
        let table = Table::from_reader("a,b\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.column("geometry"), None);
    }

    #[test]
    fn flexible_rows_are_kept() {
        let table = Table::from_reader("a,b,c\n1,2\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }
}
