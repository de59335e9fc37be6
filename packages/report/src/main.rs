#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI tool for building the contamination study report.
//!
//! Loads the four input CSV files, assembles every report section behind
//! its own recovery boundary, and writes the result as one self-contained
//! HTML document.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mercury_map_report", about = "Contamination report builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the report and write it as a standalone HTML file
    Render {
        /// Directory containing the four input CSV files
        #[arg(long, default_value = mercury_map_report::DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        /// Output path for the rendered document
        #[arg(long, default_value = "report.html")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { data_dir, output } => {
            log::info!("Building report from {}", data_dir.display());
            let report = mercury_map_report::build(&data_dir);
            let page = mercury_map_report::html::render(&report);
            std::fs::write(&output, page)?;
            log::info!("Report written to {}", output.display());
        }
    }

    Ok(())
}
