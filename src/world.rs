//! World container
//!
//! Bundles the tile grid, the mobility graph and the settlements of one
//! generated map. Construction runs every pass before anything is handed
//! out; afterwards terrain only changes through the methods here.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::MapConfig;
use crate::error::WorldError;
use crate::grid::TileGrid;
use crate::hex::HexCoord;
use crate::ids::{IdGenerator, SettlementId};
use crate::mobility::MobilityGraph;
use crate::naming;
use crate::sampler::LocationSampler;
use crate::seeds::WorldSeeds;
use crate::terrain::BiomeType;
use crate::tile::{DecorationKind, Tile};
use crate::tile_info::{TileInfo, TileInfoTable};

/// A founded settlement.
#[derive(Clone, Debug, PartialEq)]
pub struct Settlement {
    pub id: SettlementId,
    pub name: String,
    pub coord: HexCoord,
}

/// All generated world data bundled together
pub struct World {
    /// Seeds used for generation (allows recreation)
    pub seeds: WorldSeeds,
    config: MapConfig,
    grid: TileGrid,
    graph: MobilityGraph,
    settlements: Vec<Settlement>,
    ids: IdGenerator,
    /// Placement and naming draws after construction
    rng: ChaCha8Rng,
}

impl World {
    /// Run the full pipeline: terrain, mobility graph, then decorations.
    pub fn generate(
        config: MapConfig,
        seeds: WorldSeeds,
        infos: &TileInfoTable,
    ) -> Result<Self, WorldError> {
        info!(radius = config.radius, seed = seeds.master, "Generating world");

        let mut grid = TileGrid::allocate(&config, &seeds, infos)?;
        let graph = MobilityGraph::build(&grid);
        let decorated = decorate(&mut grid, infos, &seeds)?;

        for (biome, count) in grid.biome_counts() {
            debug!(%biome, count, "Biome distribution");
        }
        info!(
            tiles = grid.len(),
            walkable = graph.vertex_count(),
            decorated,
            "World generated"
        );

        Ok(Self {
            rng: WorldSeeds::rng(seeds.placement),
            seeds,
            config,
            grid,
            graph,
            settlements: Vec::new(),
            ids: IdGenerator::new(),
        })
    }

    /// Convenience accessor for master seed
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn graph(&self) -> &MobilityGraph {
        &self.graph
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.grid.get(coord)
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn settlement(&self, id: SettlementId) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.id == id)
    }

    pub fn sampler(&self) -> LocationSampler<'_> {
        LocationSampler::new(&self.grid)
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Tiles a land unit at `from` can reach spending at most
    /// `movement_points` steps. Candidates are the walkable tiles within that
    /// distance; each is kept if the graph reaches it in time.
    pub fn move_range(&self, from: HexCoord, movement_points: u32) -> Vec<&Tile> {
        if movement_points == 0 {
            return Vec::new();
        }
        let Some(start) = self.grid.get(from) else {
            return Vec::new();
        };

        self.grid
            .ring_of(from, movement_points)
            .into_iter()
            .filter(|candidate| candidate.is_walkable())
            .filter(|candidate| {
                let steps = self.graph.shortest_path(start.id(), candidate.id()).len();
                steps > 0 && steps <= movement_points as usize
            })
            .collect()
    }

    // =========================================================================
    // Terrain overrides
    // =========================================================================

    /// Replace the terrain of one tile. The decoration is swapped to match
    /// the new biome and the mobility graph is rebuilt if walkability changed.
    pub fn override_terrain(&mut self, coord: HexCoord, info: &TileInfo) -> Result<(), WorldError> {
        let tile = self.grid.get_mut(coord).ok_or(WorldError::NoTile(coord))?;
        let was_walkable = tile.is_walkable();
        tile.apply_info(info, &mut self.rng);

        let wanted = DecorationKind::for_biome(tile.biome);
        if tile.decoration.as_ref().map(|d| d.kind) != wanted {
            tile.decoration = None;
            if !tile.has_settlement() {
                tile.decorate(&info.decorations, &mut self.rng);
            }
        }
        if was_walkable != info.biome.is_walkable() {
            self.rebuild_mobility();
        }
        Ok(())
    }

    /// Rebuild the mobility graph from the current terrain.
    pub fn rebuild_mobility(&mut self) {
        self.graph = MobilityGraph::build(&self.grid);
    }

    // =========================================================================
    // Settlements
    // =========================================================================

    /// Found a settlement at `coord`.
    pub fn found_settlement(&mut self, coord: HexCoord) -> Result<SettlementId, WorldError> {
        let tile = self.grid.get_mut(coord).ok_or(WorldError::NoTile(coord))?;
        if !tile.is_walkable() {
            return Err(WorldError::NotWalkable(coord));
        }
        if tile.has_settlement() {
            return Err(WorldError::AlreadySettled(coord));
        }

        let id = self.ids.next_settlement();
        tile.found_settlement(id);

        let name = naming::settlement_name(&mut self.rng);
        info!(%coord, %name, "Founded settlement");
        self.settlements.push(Settlement { id, name, coord });
        Ok(id)
    }

    /// Pick `count` spread-out start locations and found a settlement on
    /// each. Nothing is founded unless all of them fit.
    pub fn place_tribes(&mut self, count: usize) -> Result<Vec<SettlementId>, WorldError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let coords: Vec<HexCoord> = {
            let sampler = LocationSampler::new(&self.grid);
            sampler
                .evenly_located_tiles(
                    count,
                    self.config.start_separation,
                    |t| t.is_walkable() && sampler.is_valid_settlement(t),
                    &mut self.rng,
                )
                .into_iter()
                .map(Tile::coord)
                .collect()
        };

        if coords.len() < count {
            return Err(WorldError::CouldNotPlace {
                requested: count,
                placed: coords.len(),
            });
        }

        coords.into_iter().map(|c| self.found_settlement(c)).collect()
    }
}

/// Put tree and mountain assets on every forest and mountain tile.
fn decorate(grid: &mut TileGrid, infos: &TileInfoTable, seeds: &WorldSeeds) -> Result<usize, WorldError> {
    let mut rng = WorldSeeds::rng(seeds.decorations);
    let mut decorated = 0;
    for biome in [BiomeType::Forest, BiomeType::Mountain] {
        let assets = &infos.get(biome)?.decorations;
        decorated += grid
            .for_each_matching(
                |t| t.biome == biome,
                |t| {
                    t.decorate(assets, &mut rng);
                },
            )
            .len();
    }
    Ok(decorated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainThresholds;

    /// Thresholds that make every tile `biome`, for Land, Water or Forest.
    fn uniform(biome: BiomeType) -> TerrainThresholds {
        TerrainThresholds {
            deep_water: -1.0,
            water: if biome == BiomeType::Water { 1000.0 } else { -1.0 },
            forest: if biome == BiomeType::Forest { 1000.0 } else { -1.0 },
            mountain: 1000.0,
        }
    }

    fn world_of(radius: i32, biome: BiomeType) -> World {
        let mut config = MapConfig::default().with_radius(radius);
        config.thresholds = uniform(biome);
        // No polar rows so the map stays uniform
        config.polar_banding.numerator = 0;
        let infos = TileInfoTable::defaults().unwrap();
        World::generate(config, WorldSeeds::from_master(21), &infos).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let infos = TileInfoTable::defaults().unwrap();
        let a = World::generate(MapConfig::default(), WorldSeeds::from_master(5), &infos).unwrap();
        let b = World::generate(MapConfig::default(), WorldSeeds::from_master(5), &infos).unwrap();
        for (ta, tb) in a.grid().iter().zip(b.grid().iter()) {
            assert_eq!(ta.biome, tb.biome);
            assert_eq!(ta.decoration, tb.decoration);
        }
        assert_eq!(a.graph().vertex_count(), b.graph().vertex_count());
    }

    #[test]
    fn test_decorations_follow_biome() {
        let infos = TileInfoTable::defaults().unwrap();
        let world = World::generate(MapConfig::default(), WorldSeeds::from_master(8), &infos).unwrap();
        for tile in world.grid().iter() {
            let expected = DecorationKind::for_biome(tile.biome);
            assert_eq!(tile.decoration.as_ref().map(|d| d.kind), expected);
        }
    }

    #[test]
    fn test_graph_has_no_water() {
        let infos = TileInfoTable::defaults().unwrap();
        let world = World::generate(MapConfig::default(), WorldSeeds::from_master(13), &infos).unwrap();
        for tile in world.grid().iter() {
            assert_eq!(world.graph().contains(tile.id()), tile.is_walkable());
        }
    }

    #[test]
    fn test_move_range_on_open_land() {
        let world = world_of(4, BiomeType::Land);
        assert!(world.move_range(HexCoord::ORIGIN, 0).is_empty());
        assert_eq!(world.move_range(HexCoord::ORIGIN, 1).len(), 6);
        assert_eq!(world.move_range(HexCoord::ORIGIN, 2).len(), 18);
        assert!(world.move_range(HexCoord::new(9, 9), 2).is_empty());
    }

    #[test]
    fn test_move_range_goes_around_water() {
        let mut world = world_of(4, BiomeType::Land);
        let infos = TileInfoTable::defaults().unwrap();
        let water = infos.get(BiomeType::Water).unwrap();

        // Wall off every neighbor of the origin except west
        for coord in HexCoord::ORIGIN.neighbors().into_iter().take(5) {
            world.override_terrain(coord, water).unwrap();
        }
        let in_reach: Vec<HexCoord> = world
            .move_range(HexCoord::ORIGIN, 2)
            .into_iter()
            .map(Tile::coord)
            .collect();

        // West plus the three land tiles adjacent to it at distance 2
        assert_eq!(in_reach.len(), 4);
        assert!(in_reach.contains(&HexCoord::new(-1, 0)));
        assert!(in_reach.contains(&HexCoord::new(-2, 0)));
        // East side is two steps away as the crow flies but not on foot
        assert!(!in_reach.contains(&HexCoord::new(2, 0)));
    }

    #[test]
    fn test_override_swaps_decoration() {
        let infos = TileInfoTable::defaults().unwrap();
        let kind = |w: &World, c| w.tile(c).and_then(|t| t.decoration.as_ref().map(|d| d.kind));

        let mut world = world_of(4, BiomeType::Forest);
        assert_eq!(kind(&world, HexCoord::ORIGIN), Some(DecorationKind::Trees));

        let mountain = infos.get(BiomeType::Mountain).unwrap();
        world.override_terrain(HexCoord::ORIGIN, mountain).unwrap();
        let tile = world.tile(HexCoord::ORIGIN).unwrap();
        assert_eq!(tile.biome, BiomeType::Mountain);
        assert_eq!(kind(&world, HexCoord::ORIGIN), Some(DecorationKind::Mountain));
        assert!(mountain.decorations.contains(&tile.decoration.as_ref().unwrap().asset));

        // Same kind again keeps the decoration
        let before = world.tile(HexCoord::ORIGIN).unwrap().decoration.clone();
        world.override_terrain(HexCoord::ORIGIN, mountain).unwrap();
        assert_eq!(world.tile(HexCoord::ORIGIN).unwrap().decoration, before);

        world
            .override_terrain(HexCoord::ORIGIN, infos.get(BiomeType::Land).unwrap())
            .unwrap();
        assert_eq!(kind(&world, HexCoord::ORIGIN), None);

        let mut world = world_of(4, BiomeType::Land);
        let c = HexCoord::new(1, -1);
        assert_eq!(kind(&world, c), None);
        world
            .override_terrain(c, infos.get(BiomeType::Forest).unwrap())
            .unwrap();
        assert_eq!(kind(&world, c), Some(DecorationKind::Trees));

        for tile in world.grid().iter() {
            assert_eq!(tile.decoration.as_ref().map(|d| d.kind), DecorationKind::for_biome(tile.biome));
        }
    }

    #[test]
    fn test_found_settlement() {
        let mut world = world_of(4, BiomeType::Land);
        let before = *world.tile(HexCoord::ORIGIN).map(|t| &t.resources).unwrap();

        let id = world.found_settlement(HexCoord::ORIGIN).unwrap();
        let tile = world.tile(HexCoord::ORIGIN).unwrap();
        assert_eq!(tile.settlement, Some(id));
        assert_eq!(tile.resources.gold, before.gold + 1);
        assert_eq!(tile.resources.science, before.science + 2);
        assert!(!world.settlement(id).unwrap().name.is_empty());

        assert!(matches!(
            world.found_settlement(HexCoord::ORIGIN),
            Err(WorldError::AlreadySettled(_))
        ));
        assert!(matches!(
            world.found_settlement(HexCoord::new(7, 7)),
            Err(WorldError::NoTile(_))
        ));
    }

    #[test]
    fn test_water_world() {
        let mut world = world_of(4, BiomeType::Water);
        assert_eq!(world.graph().vertex_count(), 0);
        assert!(matches!(
            world.found_settlement(HexCoord::ORIGIN),
            Err(WorldError::NotWalkable(_))
        ));
        assert!(matches!(
            world.place_tribes(1),
            Err(WorldError::CouldNotPlace { requested: 1, placed: 0 })
        ));
        assert!(world.settlements().is_empty());
    }

    #[test]
    fn test_place_tribes() {
        let mut world = world_of(8, BiomeType::Land);
        let ids = world.place_tribes(3).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(world.settlements().len(), 3);
        for s in world.settlements() {
            assert_eq!(world.tile(s.coord).unwrap().settlement, Some(s.id));
        }
        assert!(world.place_tribes(0).unwrap().is_empty());
    }
}
