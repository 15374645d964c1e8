#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line host that carves mazes and materializes them in a console world.

mod config;
mod console_world;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_forge_system_instances::MazeInstanceManager;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::{config::MazeConfig, console_world::ConsoleWorld};

/// Carves perfect mazes and spawns one wall object per wall cell.
#[derive(Debug, Parser)]
#[command(name = "maze-forge", version)]
struct Args {
    /// TOML file providing defaults for the remaining options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Side length of the square grid (odd, 3 to 4095).
    #[arg(long)]
    size: Option<u32>,
    /// Seed for a reproducible maze.
    #[arg(long)]
    seed: Option<u64>,
    /// World units between adjacent walls.
    #[arg(long)]
    spacing: Option<f32>,
    /// Number of regenerations to run back to back.
    #[arg(long)]
    regenerations: Option<u32>,
    /// Print every live wall with its label and position.
    #[arg(long)]
    list_walls: bool,
    /// Skip drawing the final maze.
    #[arg(long)]
    no_render: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<MazeConfig> {
        let mut config = match &self.config {
            Some(path) => MazeConfig::load(path)?,
            None => MazeConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(spacing) = self.spacing {
            config.cell_spacing = spacing;
        }
        if let Some(regenerations) = self.regenerations {
            config.regenerations = regenerations;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Entry point for the Maze Forge command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut world = ConsoleWorld::default();
    let mut manager = MazeInstanceManager::with_cell_spacing(config.cell_spacing);
    for round in 1..=config.regenerations {
        let report = manager
            .regenerate(config.size, &mut rng, &mut world)
            .with_context(|| format!("regeneration {round} failed"))?;
        info!(
            "regeneration {round}/{}: start {}, {} rooms, {} walls destroyed, {} spawned",
            config.regenerations,
            report.start,
            report.carve.rooms_visited,
            report.destroyed,
            report.spawned
        );
    }
    info!("{} walls alive", world.live_count());

    if args.list_walls {
        for line in world.listing() {
            println!("{line}");
        }
    }
    if !args.no_render {
        print!("{}", world.render(config.size, manager.cell_spacing()));
    }
    Ok(())
}
