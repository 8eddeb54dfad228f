//! ASCII rendering for hex maps
//!
//! Rows are printed north (`+r`) first. Each row is indented by half a cell
//! per step away from the equator so the hexagon keeps its shape.

use std::fmt::Write;

use crate::grid::TileGrid;
use crate::hex::HexCoord;
use crate::terrain::BiomeType;
use crate::tile::Tile;

/// Glyph drawn for a tile hosting a settlement.
pub const SETTLEMENT_CHAR: char = '@';

/// Get ASCII character for a biome
pub fn biome_char(biome: BiomeType) -> char {
    match biome {
        BiomeType::Land => '.',
        BiomeType::Water => '~',
        BiomeType::DeepWater => '=',
        BiomeType::Beach => ',',
        BiomeType::Forest => 'T',
        BiomeType::Mountain => '^',
        BiomeType::Toundra => '*',
    }
}

/// Character for a tile: its settlement if any, else its biome.
pub fn tile_char(tile: &Tile) -> char {
    if tile.has_settlement() {
        SETTLEMENT_CHAR
    } else {
        biome_char(tile.biome)
    }
}

/// Render a map to ASCII string
pub fn render_map(grid: &TileGrid) -> String {
    let n = grid.radius() as i32;
    let mut result = String::new();

    for r in (-n..=n).rev() {
        let q_min = (-n).max(-r - n);
        let q_max = n.min(-r + n);

        result.push_str(&" ".repeat(r.unsigned_abs() as usize));
        let row: Vec<String> = (q_min..=q_max)
            .map(|q| {
                grid.get(HexCoord::new(q, r))
                    .map(tile_char)
                    .unwrap_or(' ')
                    .to_string()
            })
            .collect();
        result.push_str(&row.join(" "));
        result.push('\n');
    }

    result
}

/// Generate legend for biome characters
pub fn biome_legend() -> String {
    let mut legend = String::from("=== BIOME LEGEND ===\n");
    for biome in BiomeType::all() {
        let _ = writeln!(legend, "  {} {}", biome_char(*biome), biome);
    }
    let _ = writeln!(legend, "  {} Settlement", SETTLEMENT_CHAR);
    legend
}

/// Biome counts with percentages, one line per biome present.
pub fn biome_stats(grid: &TileGrid) -> String {
    let total = grid.len().max(1) as f64;
    let mut out = String::new();
    for (biome, count) in grid.biome_counts() {
        let _ = writeln!(
            out,
            "  {} {:<12} {:>5} ({:5.1}%)",
            biome_char(biome),
            biome.display_name(),
            count,
            100.0 * count as f64 / total
        );
    }
    out
}
