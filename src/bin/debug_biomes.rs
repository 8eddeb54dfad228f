//! Debug script to compare biome distributions across seeds
//!
//! Usage: debug_biomes [radius] [seed_count] [first_seed]

use std::collections::BTreeMap;

use hex_terrain::ascii::{biome_char, render_map};
use hex_terrain::{BiomeType, MapConfig, TileGrid, TileInfoTable, WorldSeeds};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let radius: i32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    let seed_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(8);
    let first_seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(12345);

    let config = MapConfig::default().with_radius(radius);
    let infos = TileInfoTable::defaults()?;

    println!("=== BIOME DEBUG (radius {}, {} seeds from {}) ===", radius, seed_count, first_seed);
    println!();

    let mut totals: BTreeMap<BiomeType, usize> = BTreeMap::new();
    let mut tile_total = 0;

    for seed in first_seed..first_seed + seed_count {
        let grid = TileGrid::allocate(&config, &WorldSeeds::from_master(seed), &infos)?;
        let counts = grid.biome_counts();

        let line: Vec<String> = BiomeType::all()
            .iter()
            .map(|b| format!("{}{:>4}", biome_char(*b), counts.get(b).copied().unwrap_or(0)))
            .collect();
        println!("seed {:>8}: {}", seed, line.join("  "));

        for (biome, count) in counts {
            *totals.entry(biome).or_insert(0) += count;
        }
        tile_total += grid.len();

        if seed == first_seed {
            println!();
            print!("{}", render_map(&grid));
            println!();
        }
    }

    println!();
    println!("Average share over {} tiles:", tile_total);
    for (biome, count) in &totals {
        println!(
            "  {} {:<12} {:5.1}%",
            biome_char(*biome),
            biome.display_name(),
            100.0 * *count as f64 / tile_total.max(1) as f64
        );
    }

    Ok(())
}
