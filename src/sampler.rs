//! Location sampling
//!
//! Picks spread-out tiles (tribe starts) and judges whether a tile is a
//! reasonable place for a settlement.

use rand::Rng;
use tracing::{debug, warn};

use crate::grid::TileGrid;
use crate::terrain::BiomeType;
use crate::tile::Tile;

/// Random trials per separation distance before relaxing it.
pub const TRIALS_PER_SEPARATION: usize = 10;

/// Distance of the ring inspected around a settlement candidate.
pub const SETTLEMENT_SURROUNDINGS: u32 = 2;

/// A candidate whose surrounding ring has this many tiles or fewer sits on
/// the clipped map edge. A full ring has 12.
pub const MIN_SURROUNDING_TILES: usize = 7;

/// Random selection over the tiles of one grid.
pub struct LocationSampler<'a> {
    grid: &'a TileGrid,
}

impl<'a> LocationSampler<'a> {
    pub fn new(grid: &'a TileGrid) -> Self {
        Self { grid }
    }

    /// A tile can host a settlement when it has none yet, the ring two steps
    /// out is not clipped by the map edge and less than a third of that ring
    /// is water or tundra.
    pub fn is_valid_settlement(&self, tile: &Tile) -> bool {
        if tile.has_settlement() {
            return false;
        }

        let around = self.grid.ring_at(tile.coord(), SETTLEMENT_SURROUNDINGS);
        if around.len() <= MIN_SURROUNDING_TILES {
            return false;
        }

        let barren = around
            .iter()
            .filter(|t| t.biome.is_water() || t.biome == BiomeType::Toundra)
            .count();
        barren * 3 < around.len()
    }

    /// Choose `count` tiles matching `predicate`, as far apart as possible.
    ///
    /// Separation starts at `max_separation` and drops by one after
    /// `TRIALS_PER_SEPARATION` failed trials. Returns exactly `count` tiles,
    /// or nothing if even a separation of 1 does not fit them.
    pub fn evenly_located_tiles(
        &self,
        count: usize,
        max_separation: u32,
        predicate: impl Fn(&Tile) -> bool,
        rng: &mut impl Rng,
    ) -> Vec<&'a Tile> {
        self.evenly_located(count, max_separation, predicate, rng)
            .map(|(tiles, _)| tiles)
            .unwrap_or_default()
    }

    /// Like [`Self::evenly_located_tiles`], but also reports the separation
    /// the tiles were placed at. Every pair is at least that far apart.
    pub fn evenly_located(
        &self,
        count: usize,
        max_separation: u32,
        predicate: impl Fn(&Tile) -> bool,
        rng: &mut impl Rng,
    ) -> Option<(Vec<&'a Tile>, u32)> {
        if count == 0 {
            return None;
        }

        let candidates = self.grid.all_tiles(predicate);
        if candidates.len() >= count {
            for separation in (1..=max_separation.max(1)).rev() {
                for _ in 0..TRIALS_PER_SEPARATION {
                    let chosen = Self::trial(&candidates, count, separation, rng);
                    if chosen.len() == count {
                        debug!(count, separation, "Placed evenly located tiles");
                        return Some((chosen, separation));
                    }
                }
            }
        }

        warn!(
            count,
            max_separation,
            candidates = candidates.len(),
            "Could not find evenly located tiles"
        );
        None
    }

    /// One greedy pass: pick at random, drop everything closer than
    /// `separation`, repeat.
    fn trial(
        candidates: &[&'a Tile],
        count: usize,
        separation: u32,
        rng: &mut impl Rng,
    ) -> Vec<&'a Tile> {
        let mut pool = candidates.to_vec();
        let mut chosen = Vec::with_capacity(count);

        while chosen.len() < count && !pool.is_empty() {
            let picked = pool.swap_remove(rng.gen_range(0..pool.len()));
            pool.retain(|t| t.coord().distance(picked.coord()) >= separation);
            chosen.push(picked);
        }

        chosen
    }
}
