use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use hex_terrain::ascii;
use hex_terrain::{MapConfig, TileInfoTable, World, WorldError, WorldSeeds};

#[derive(Parser, Debug)]
#[command(name = "hex_terrain")]
#[command(about = "Generate hex terrain maps and place tribe start locations")]
struct Args {
    /// Map radius in tiles (overrides the config file)
    #[arg(short, long)]
    radius: Option<i32>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON map configuration; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with a tiles.json overriding the built-in terrain metadata
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of tribes to place
    #[arg(short, long, default_value = "2")]
    tribes: usize,

    /// Skip printing the ASCII map
    #[arg(long)]
    no_map: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("failed to load map config {}", path.display()))?,
        None => MapConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.radius = radius;
    }

    let infos = match &args.data_dir {
        Some(dir) => TileInfoTable::load_from(dir)
            .with_context(|| format!("failed to load terrain data from {}", dir.display()))?,
        None => TileInfoTable::defaults().context("built-in terrain data is invalid")?,
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let seeds = WorldSeeds::from_master(seed);
    info!(%seeds, "Using seeds");

    let mut world = World::generate(config, seeds, &infos).context("world generation failed")?;

    match world.place_tribes(args.tribes) {
        Ok(ids) => info!(placed = ids.len(), "Placed tribes"),
        Err(WorldError::CouldNotPlace { requested, placed }) => {
            warn!(requested, placed, "Not enough room for every tribe")
        }
        Err(e) => return Err(e).context("tribe placement failed"),
    }

    println!("Seed: {}", world.seed());
    println!("Radius: {} ({} tiles)", world.grid().radius(), world.grid().len());
    println!("Walkable tiles: {}", world.graph().vertex_count());
    println!();
    print!("{}", ascii::biome_stats(world.grid()));

    if !world.settlements().is_empty() {
        println!();
        for settlement in world.settlements() {
            println!("  {} at {}", settlement.name, settlement.coord);
        }
    }

    if !args.no_map {
        println!();
        print!("{}", ascii::render_map(world.grid()));
        println!();
        print!("{}", ascii::biome_legend());
    }

    Ok(())
}
