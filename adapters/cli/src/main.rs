#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Garden Defence simulation headlessly.

mod config;
mod layout_transfer;
mod simulation;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use garden_defence_core::{CellCoord, PlantKind};
use garden_defence_system_bootstrap::Bootstrap;
use garden_defence_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::SimulationConfig, layout_transfer::GardenLayoutSnapshot, simulation::Simulation,
};

/// Command-line arguments accepted by the Garden Defence binary.
#[derive(Debug, Parser)]
#[command(name = "garden-defence", about = "Headless lawn defence simulation")]
struct CliArgs {
    /// TOML file overriding the default simulation parameters.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for zombie rows and sun drops; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run before declaring the lawn safe.
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// Length of a single driver frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Layout string (`garden:v1:...`) planted before the run starts.
    #[arg(long, value_name = "ENCODED")]
    layout: Option<String>,
    /// Prints the final lawn as a layout string.
    #[arg(long)]
    export_layout: bool,
    /// Plant to buy before the run, written as `KIND@COLUMN,ROW`.
    #[arg(long = "plant", value_name = "KIND@COLUMN,ROW", value_parser = parse_plant_request)]
    plants: Vec<PlantRequest>,
    /// Collects every sun that reaches the ground.
    #[arg(long)]
    autoplay: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlantRequest {
    kind: PlantKind,
    cell: CellCoord,
}

fn parse_plant_request(value: &str) -> Result<PlantRequest, String> {
    let (kind, cell) = value
        .split_once('@')
        .ok_or_else(|| format!("expected KIND@COLUMN,ROW, got '{value}'"))?;
    let kind: PlantKind = kind.parse().map_err(|error| format!("{error}"))?;
    let (column, row) = cell
        .split_once(',')
        .ok_or_else(|| format!("expected COLUMN,ROW, got '{cell}'"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid column '{column}': {error}"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid row '{row}': {error}"))?;
    Ok(PlantRequest {
        kind,
        cell: CellCoord::new(column, row),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Entry point for the Garden Defence command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    ensure!(args.frame_ms > 0, "--frame-ms must be positive");

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut simulation = Simulation::new(&config, args.autoplay);
    println!("{}", Bootstrap.welcome_banner(simulation.world()));

    if let Some(encoded) = &args.layout {
        let layout =
            GardenLayoutSnapshot::decode(encoded).context("failed to decode --layout string")?;
        let geometry = Bootstrap.geometry(simulation.world());
        if layout.columns != geometry.columns || layout.rows != geometry.rows {
            bail!(
                "layout is {}x{} but the lawn is {}x{}",
                layout.columns,
                layout.rows,
                geometry.columns,
                geometry.rows
            );
        }
        let planted = simulation
            .plant_layout(&layout)
            .context("failed to plant layout")?;
        info!(planted, "layout planted");
    }

    for request in &args.plants {
        let _ = simulation.place(request.kind, request.cell).with_context(|| {
            format!(
                "failed to plant {} at column {} row {}",
                request.kind,
                request.cell.column(),
                request.cell.row()
            )
        })?;
    }

    let summary = simulation.run(
        Duration::from_secs(args.seconds),
        Duration::from_millis(args.frame_ms),
    );
    println!("{summary}");

    if args.export_layout {
        let world = simulation.world();
        let geometry = query::geometry(world);
        let layout = GardenLayoutSnapshot::capture(
            geometry.columns,
            geometry.rows,
            &query::plant_view(world),
        );
        println!("{}", layout.encode().context("failed to encode layout")?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plant_request() {
        assert_eq!(
            parse_plant_request("peashooter@2,3"),
            Ok(PlantRequest {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(2, 3),
            })
        );
    }

    #[test]
    fn rejects_malformed_plant_request() {
        assert!(parse_plant_request("peashooter").is_err());
        assert!(parse_plant_request("peashooter@2").is_err());
        assert!(parse_plant_request("marigold@0,0").is_err());
        assert!(parse_plant_request("wallnut@a,0").is_err());
    }

    #[test]
    fn arguments_parse_with_defaults() {
        let args = CliArgs::try_parse_from([
            "garden-defence",
            "--plant",
            "sunflower@0,0",
            "--plant",
            "wallnut@3,1",
            "--autoplay",
        ])
        .expect("arguments parse");
        assert_eq!(args.seconds, 120);
        assert_eq!(args.frame_ms, 16);
        assert_eq!(args.plants.len(), 2);
        assert!(args.autoplay);
    }
}
