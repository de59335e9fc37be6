#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report assembly for the basin contamination study.
//!
//! Each section owns its own data snapshot and its own recovery boundary:
//! a failure inside one section becomes that section's error banner and
//! never suppresses the others. The survey file is even re-read per chart,
//! so the three charts cannot share a common failure.

pub mod html;

use std::path::Path;

use mercury_map_analytics_models::CorrelationReport;
use mercury_map_basin_models::{Metric, MineType};
use mercury_map_charts::ChartSpec;
use mercury_map_compose::MapSpec;
use thiserror::Error;

/// Default directory holding the four input files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Illegal-mine point dataset.
pub const ILLEGAL_MINES_FILE: &str = "illegal_mines.csv";
/// Fish die-off point dataset.
pub const FISH_KILL_FILE: &str = "fish_kill.csv";
/// Legal-mine boundary dataset (WKT polygons).
pub const LEGAL_MINES_FILE: &str = "lmines.csv";
/// Contamination survey table.
pub const CONTAMINATION_FILE: &str = "fk.csv";

/// Report title.
pub const REPORT_TITLE: &str = "Gold Mining and Mercury Poisoning: A Spatial Analysis of \
                                Selected Environmental Contaminants in the Amazon";

/// Bibliography rendered at the foot of the report.
pub const REFERENCES: &[&str] = &[
    "Basta, Paulo Cesar, et al. \"Nota Técnica: maio 2023: Análise regional dos níveis de \
     mercúrio em peixes consumidos pela população da Amazônia brasileira: um alerta em saúde \
     pública e uma ameaça à segurança alimentar.\" (2023).",
    "Earth Genome. \"Mining-Detector/Data/Airstrips/Illegal-Airstrips-NYT-Intercept-Public.csv \
     at Main · Earthrise-Media/Mining-Detector.\" GitHub, 2024, \
     github.com/earthrise-media/mining-detector/blob/main/data/airstrips/Illegal-Airstrips-NYT-Intercept-Public.csv. \
     Accessed 14 Sept. 2024.",
    "\"Sistema de Informações Geográficas Da Mineração (SIGMINE).\" Dados.gov.br, 1 July 2021, \
     dados.gov.br/dados/conjuntos-dados/sistema-de-informacoes-geograficas-da-mineracao-sigmine. \
     Accessed 24 Oct. 2024.",
];

/// Failure caught by one section's recovery boundary.
#[derive(Debug, Error)]
pub enum SectionError {
    /// A dataset failed to load.
    #[error(transparent)]
    Load(#[from] mercury_map_ingest::LoadError),

    /// The map view could not be composed.
    #[error(transparent)]
    Compose(#[from] mercury_map_compose::ComposeError),

    /// A chart could not be built.
    #[error(transparent)]
    Chart(#[from] mercury_map_charts::ChartError),
}

/// One chart slot: its heading plus the build outcome.
#[derive(Debug)]
pub struct ChartSection {
    /// Heading displayed above the chart or its banner.
    pub title: &'static str,
    /// The built chart, or the failure its boundary caught.
    pub outcome: Result<ChartSpec, SectionError>,
}

/// The assembled report. Every section is present, carrying either its
/// content or the error its boundary caught.
#[derive(Debug)]
pub struct Report {
    /// The composed basin map.
    pub map: Result<MapSpec, SectionError>,
    /// Per-group correlation tables.
    pub correlations: Result<CorrelationReport, SectionError>,
    /// The three study charts, in fixed order.
    pub charts: Vec<ChartSection>,
    /// Bibliography entries.
    pub references: &'static [&'static str],
}

struct ChartDef {
    filter: Option<MineType>,
    metric: Metric,
    title: &'static str,
}

const CHART_DEFS: &[ChartDef] = &[
    ChartDef {
        filter: None,
        metric: Metric::MeanValue,
        title: "Distance and Mean Concentration of Hg Value",
    },
    ChartDef {
        filter: Some(MineType::Illegal),
        metric: Metric::MeanValue,
        title: "Distance and Mean Concentration of Hg Value in Illegal Mines Only",
    },
    ChartDef {
        filter: Some(MineType::Illegal),
        metric: Metric::MeanCarnivorousValue,
        title: "Distance and Mean Concentration of Hg Value of Carnivorous Fish in Illegal \
                Mines Only",
    },
];

/// Builds the full report from the data directory.
///
/// Every section runs behind its own boundary; the returned report always
/// has an entry per section, and section failures are logged here so the
/// renderer only has to display them.
#[must_use]
pub fn build(data_dir: &Path) -> Report {
    let map = build_map_section(data_dir);
    if let Err(e) = &map {
        log::error!("map section failed: {e}");
    }

    let correlations = build_correlation_section(data_dir);
    if let Err(e) = &correlations {
        log::error!("correlation section failed: {e}");
    }

    let charts = CHART_DEFS
        .iter()
        .map(|def| {
            let outcome = build_chart(data_dir, def);
            if let Err(e) = &outcome {
                log::error!("chart \"{}\" failed: {e}", def.title);
            }
            ChartSection {
                title: def.title,
                outcome,
            }
        })
        .collect();

    Report {
        map,
        correlations,
        charts,
        references: REFERENCES,
    }
}

/// Loads the three point datasets and composes the map.
fn build_map_section(data_dir: &Path) -> Result<MapSpec, SectionError> {
    let illegal =
        mercury_map_ingest::datasets::load_mine_points(&data_dir.join(ILLEGAL_MINES_FILE))?;
    let fish_kill =
        mercury_map_ingest::datasets::load_fish_kill_sites(&data_dir.join(FISH_KILL_FILE))?;
    let legal =
        mercury_map_ingest::datasets::load_legal_mine_centroids(&data_dir.join(LEGAL_MINES_FILE))?;
    Ok(mercury_map_compose::compose(&illegal, &fish_kill, &legal)?)
}

/// Loads the survey and runs the correlation engine. Degenerate pairs are
/// carried inside the report; only a load failure trips this boundary.
fn build_correlation_section(data_dir: &Path) -> Result<CorrelationReport, SectionError> {
    let samples = mercury_map_ingest::datasets::load_contamination_samples(
        &data_dir.join(CONTAMINATION_FILE),
    )?;
    Ok(mercury_map_analytics::correlate_by_mine_type(&samples))
}

/// Builds one chart from its own snapshot of the survey file.
fn build_chart(data_dir: &Path, def: &ChartDef) -> Result<ChartSpec, SectionError> {
    let samples = mercury_map_ingest::datasets::load_contamination_samples(
        &data_dir.join(CONTAMINATION_FILE),
    )?;
    Ok(mercury_map_charts::scatter_chart(
        &samples, def.filter, def.metric, def.title,
    )?)
}
