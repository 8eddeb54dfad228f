//! The tile grid
//!
//! Owns every tile of a hexagonal map. Generation classifies each coordinate,
//! applies the polar pass and attaches terrain metadata. Lookups outside the
//! footprint return nothing rather than failing.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use tracing::debug;

use crate::config::MapConfig;
use crate::error::WorldError;
use crate::hex::{HexCoord, HexLayout};
use crate::ids::TileId;
use crate::seeds::WorldSeeds;
use crate::terrain::{BiomeType, TerrainClassifier};
use crate::tile::Tile;
use crate::tile_info::TileInfoTable;
use crate::tilemap::HexTilemap;

/// All tiles of a map, indexed by coordinate and by id.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: HexTilemap<Tile>,
    by_id: HashMap<TileId, HexCoord>,
    layout: HexLayout,
}

impl TileGrid {
    /// Build and classify every tile within `config.radius` of the origin.
    pub fn allocate(
        config: &MapConfig,
        seeds: &WorldSeeds,
        infos: &TileInfoTable,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        infos.require_all()?;

        let radius = config.radius()?;
        let classifier = TerrainClassifier::from_config(config, seeds)?;
        let mut grid = Self::empty(radius, config.layout());

        // Pass 1: classification, identity, metadata
        let mut rng = WorldSeeds::rng(seeds.tiles);
        for coord in HexCoord::ORIGIN.hexagon(radius) {
            let id = grid.fresh_id(&mut rng);
            let mut tile = Tile::new(coord, id, grid.layout);
            tile.apply_info(infos.get(classifier.classify(coord))?, &mut rng);
            grid.place(tile);
        }

        // Pass 2: polar banding
        let toundra = infos.get(BiomeType::Toundra)?;
        let banding = config.polar_banding;
        let mut polar_rng = WorldSeeds::rng(seeds.polar);
        let mut frozen = 0;
        for (row, depth) in banding.rows(radius) {
            let changed = grid.for_each_matching(
                |tile| tile.coord().r == row,
                |tile| {
                    if banding.roll(radius, depth, &mut polar_rng) {
                        tile.apply_info(toundra, &mut rng);
                    }
                },
            );
            frozen += changed
                .iter()
                .filter(|c| grid.get(**c).map(|t| t.biome) == Some(BiomeType::Toundra))
                .count();
        }

        debug!(
            radius,
            tiles = grid.len(),
            polar_rows = banding.row_count(radius),
            frozen,
            "Allocated tile grid"
        );
        Ok(grid)
    }

    /// A grid with no tiles yet.
    pub fn empty(radius: u32, layout: HexLayout) -> Self {
        Self {
            tiles: HexTilemap::new(radius),
            by_id: HashMap::new(),
            layout,
        }
    }

    /// Store `tile` at its own coordinate.
    ///
    /// # Panics
    /// If the coordinate is outside the footprint.
    pub fn place(&mut self, tile: Tile) {
        let coord = tile.coord();
        let id = tile.id();
        if let Some(old) = self.tiles.insert(coord, tile) {
            self.by_id.remove(&old.id());
        }
        self.by_id.insert(id, coord);
    }

    /// Random id not yet used by this grid.
    fn fresh_id(&self, rng: &mut impl Rng) -> TileId {
        loop {
            let id = TileId(rng.gen());
            if !self.by_id.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn radius(&self) -> u32 {
        self.tiles.radius()
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// Mutable access for explicit terrain overrides.
    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(coord)
    }

    pub fn tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.by_id.get(&id).and_then(|coord| self.get(*coord))
    }

    /// Tiles in row-major order (`r` ascending, then `q`).
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().map(|(_, tile)| tile)
    }

    /// Existing neighbors of `coord`; off-map neighbors are skipped.
    pub fn neighbors_of(&self, coord: HexCoord) -> Vec<&Tile> {
        coord.neighbors().into_iter().filter_map(|c| self.get(c)).collect()
    }

    /// Existing tiles at distance 1 through `radius` of `coord`, nearest
    /// ring first. The center is not included.
    pub fn ring_of(&self, coord: HexCoord, radius: u32) -> Vec<&Tile> {
        (1..=radius)
            .flat_map(|d| coord.ring(d))
            .filter_map(|c| self.get(c))
            .collect()
    }

    /// Existing tiles at exactly `distance` from `coord`.
    pub fn ring_at(&self, coord: HexCoord, distance: u32) -> Vec<&Tile> {
        if distance == 0 {
            return Vec::new();
        }
        coord.ring(distance).into_iter().filter_map(|c| self.get(c)).collect()
    }

    /// Run `action` on every tile accepted by `predicate`, in row-major
    /// order. Returns the coordinates visited.
    pub fn for_each_matching(
        &mut self,
        predicate: impl Fn(&Tile) -> bool,
        mut action: impl FnMut(&mut Tile),
    ) -> Vec<HexCoord> {
        let mut visited = Vec::new();
        for (coord, tile) in self.tiles.iter_mut() {
            if predicate(tile) {
                action(tile);
                visited.push(coord);
            }
        }
        visited
    }

    /// Every tile accepted by `predicate`, row-major.
    pub fn all_tiles(&self, predicate: impl Fn(&Tile) -> bool) -> Vec<&Tile> {
        self.iter().filter(|tile| predicate(tile)).collect()
    }

    pub fn biome_counts(&self) -> BTreeMap<BiomeType, usize> {
        let mut counts = BTreeMap::new();
        for tile in self.iter() {
            *counts.entry(tile.biome).or_insert(0) += 1;
        }
        counts
    }

    // =========================================================================
    // Borders
    // =========================================================================

    /// Matching vertex pairs of the tiles at `a` and `b`. Empty if either is
    /// off the map or they are not adjacent.
    pub fn shared_vertices(&self, a: HexCoord, b: HexCoord) -> Vec<(usize, usize)> {
        match (self.get(a), self.get(b)) {
            (Some(ta), Some(tb)) => ta.shared_vertices(tb),
            _ => Vec::new(),
        }
    }

    /// Neighbors of `coord` that also own its vertex `index`, with the
    /// index on their side. An inner corner is shared by two neighbors.
    pub fn tiles_sharing_vertex(&self, coord: HexCoord, index: usize) -> Vec<(HexCoord, usize)> {
        let Some(point) = self.get(coord).and_then(|t| t.vertices().get(index)).map(|v| v.point)
        else {
            return Vec::new();
        };
        self.neighbors_of(coord)
            .into_iter()
            .filter_map(|n| n.vertex_at(point).map(|i| (n.coord(), i)))
            .collect()
    }
}
