#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core domain types for the mercury contamination study.
//!
//! This crate defines the shared vocabulary used across the entire
//! mercury-map system: the regulatory status of a mining site, the three
//! concentration measures recorded per survey row, and the point/sample
//! records the loaders produce.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Regulatory status of a mining site.
///
/// Survey rows label each sample with the kind of mine it was taken near.
/// Parsing is case-insensitive so `"illegal"` and `"Illegal"` both match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum MineType {
    /// Unlicensed artisanal or wildcat operation.
    Illegal,
    /// Operation registered with the national mining authority.
    Legal,
}

impl MineType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Illegal, Self::Legal]
    }
}

/// One of the three mercury concentration measures recorded per sample.
///
/// The `Display` form is the lowercase CSV column name holding the measure,
/// and is also what tables and chart axes show.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    /// Mean Hg concentration across all sampled fish.
    MeanValue,
    /// Mean Hg concentration across carnivorous species only.
    MeanCarnivorousValue,
    /// Mean Hg concentration across non-carnivorous species only.
    MeanNonCarnivorousValue,
}

impl Metric {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MeanValue,
            Self::MeanCarnivorousValue,
            Self::MeanNonCarnivorousValue,
        ]
    }
}

/// A mining site reduced to a single map point.
///
/// Illegal mines arrive as points; legal mines arrive as WKT boundaries and
/// are reduced to their area centroid before taking this shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinePoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A fish die-off sampling site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishKillSite {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One measurement row from the contamination survey.
///
/// Every cell is coerced independently on load; `None` marks a cell that
/// failed numeric (or categorical) coercion. The loaded table is never
/// mutated afterwards; each downstream computation takes its own
/// pairwise-complete view of the columns it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContaminationSample {
    /// Kind of mine the sample relates to.
    pub mine_type: Option<MineType>,
    /// Distance from the sampling site to the mine, in kilometers.
    pub distance_km: Option<f64>,
    /// Mean Hg concentration across all sampled fish.
    pub mean_value: Option<f64>,
    /// Mean Hg concentration across carnivorous species.
    pub mean_carnivorous_value: Option<f64>,
    /// Mean Hg concentration across non-carnivorous species.
    pub mean_non_carnivorous_value: Option<f64>,
}

impl ContaminationSample {
    /// Returns the cell holding the requested metric.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::MeanValue => self.mean_value,
            Metric::MeanCarnivorousValue => self.mean_carnivorous_value,
            Metric::MeanNonCarnivorousValue => self.mean_non_carnivorous_value,
        }
    }
}
