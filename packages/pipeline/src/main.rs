#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the borough trends pipeline.

use std::path::PathBuf;

use borough_trends_pipeline::progress::{IndicatifProgress, init_logger};
use borough_trends_pipeline::{RunConfig, export, run};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "borough_trends", about = "Borough trends batch pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the report tables
    Run {
        /// Road collision JSON export
        #[arg(long)]
        collisions: PathBuf,
        /// Crime outcomes JSON export
        #[arg(long)]
        crimes: PathBuf,
        /// IMD JSON export for the local authority
        #[arg(long)]
        imd: PathBuf,
        /// Population CSV with `lsoa_code` and `all_ages` columns
        #[arg(long)]
        population: PathBuf,
        /// Optional boundary JSON export; enables the GeoJSON output
        #[arg(long)]
        boundaries: Option<PathBuf>,
        /// Directory the output tables are written into
        #[arg(long, default_value = "out")]
        out: PathBuf,
        /// Maximum number of records per event dataset (for testing)
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Convert a boundary JSON export to GeoJSON without running the pipeline
    Boundaries {
        /// Boundary JSON export
        #[arg(long)]
        input: PathBuf,
        /// Output GeoJSON file
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            collisions,
            crimes,
            imd,
            population,
            boundaries,
            out,
            limit,
        } => {
            let config = RunConfig {
                collisions,
                crimes,
                imd,
                population,
                boundaries,
                out_dir: out,
                limit,
            };
            let summary = run(&config, &|msg| IndicatifProgress::records_bar(&multi, msg))?;
            println!(
                "Wrote {} trend row(s) across {} area(s) to {} ({} record(s) dropped)",
                summary.trend_rows,
                summary.areas,
                config.out_dir.display(),
                summary.dropped,
            );
        }
        Commands::Boundaries { input, output } => {
            use borough_trends_geography::boundary;
            let boundaries = boundary::read_boundaries(&input)?;
            let collection = boundary::to_feature_collection(&boundaries);
            export::write_geojson(&output, &collection)?;
            println!("Wrote {} boundary feature(s) to {}", boundaries.len(), output.display());
        }
    }

    Ok(())
}
