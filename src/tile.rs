//! Map tiles
//!
//! A tile is a hex cell with a biome, a yield, a defense modifier and the six
//! corner vertices used to trace borders and rivers between neighbors.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hex::{HexCoord, HexLayout, Point};
use crate::ids::{SettlementId, TileId};
use crate::terrain::BiomeType;
use crate::tile_info::TileInfo;

/// Distance under which two corners count as the same vertex, as a fraction
/// of the hex size. Corners of neighboring hexes are computed separately and
/// differ by float rounding, so exact comparison would miss shared edges.
pub const VERTEX_MATCH_TOLERANCE: f32 = 0.1;

/// Defense modifier a tile is raised to when a settlement is founded on it.
pub const SETTLEMENT_DEFENSE_MODIFIER: f32 = 0.5;

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Gold,
    Food,
    Science,
}

/// Per-turn yield of a tile. Missing entries are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub gold: u32,
    pub food: u32,
    pub science: u32,
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Gold => self.gold,
            ResourceKind::Food => self.food,
            ResourceKind::Science => self.science,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = match kind {
            ResourceKind::Gold => &mut self.gold,
            ResourceKind::Food => &mut self.food,
            ResourceKind::Science => &mut self.science,
        };
        *slot = slot.saturating_add(amount);
    }
}

// =============================================================================
// VERTICES
// =============================================================================

/// One corner of a tile, with the indices of the two adjacent corners of the
/// same tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub point: Point,
    /// `[previous, next]` around the hexagon
    pub neighbors: [usize; 2],
}

impl Vertex {
    /// True if `point` lies within `tolerance_sq` (squared pixels) of this corner.
    pub fn matches(&self, point: Point, tolerance_sq: f32) -> bool {
        self.point.distance_squared(point) < tolerance_sq
    }
}

fn compute_vertices(layout: &HexLayout, coord: HexCoord) -> [Vertex; 6] {
    let corners = layout.corners(coord);
    std::array::from_fn(|i| Vertex {
        point: corners[i],
        neighbors: [(i + 5) % 6, (i + 1) % 6],
    })
}

// =============================================================================
// DECORATIONS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationKind {
    Trees,
    Mountain,
}

impl DecorationKind {
    /// Which decoration a biome receives, if any.
    pub fn for_biome(biome: BiomeType) -> Option<Self> {
        match biome {
            BiomeType::Forest => Some(Self::Trees),
            BiomeType::Mountain => Some(Self::Mountain),
            _ => None,
        }
    }
}

/// Asset drawn on top of a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub asset: String,
}

// =============================================================================
// TILE
// =============================================================================

#[derive(Clone, Debug)]
pub struct Tile {
    coord: HexCoord,
    id: TileId,
    layout: HexLayout,
    vertices: [Vertex; 6],
    pub biome: BiomeType,
    pub sprite_key: String,
    pub resources: Resources,
    pub defense_modifier: f32,
    pub decoration: Option<Decoration>,
    pub settlement: Option<SettlementId>,
}

impl Tile {
    /// A bare land tile; vertices are computed once here.
    pub fn new(coord: HexCoord, id: TileId, layout: HexLayout) -> Self {
        Self {
            coord,
            id,
            layout,
            vertices: compute_vertices(&layout, coord),
            biome: BiomeType::Land,
            sprite_key: String::new(),
            resources: Resources::default(),
            defense_modifier: 0.0,
            decoration: None,
            settlement: None,
        }
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Pixel center for renderers.
    pub fn center(&self) -> Point {
        self.layout.center(self.coord)
    }

    pub fn vertices(&self) -> &[Vertex; 6] {
        &self.vertices
    }

    pub fn is_walkable(&self) -> bool {
        self.biome.is_walkable()
    }

    pub fn has_settlement(&self) -> bool {
        self.settlement.is_some()
    }

    /// Take biome, sprite, yield and defense from `info`. A key list gets one
    /// entry picked at random.
    pub fn apply_info(&mut self, info: &TileInfo, rng: &mut impl Rng) {
        self.biome = info.biome;
        self.sprite_key = info.key.pick(rng).unwrap_or_default().to_string();
        self.resources = info.resources;
        self.defense_modifier = info.defense_modifier;
    }

    /// Put a decoration matching the biome on this tile, picking one of
    /// `assets` at random. Returns false if the biome takes none.
    pub fn decorate(&mut self, assets: &[String], rng: &mut impl Rng) -> bool {
        let Some(kind) = DecorationKind::for_biome(self.biome) else {
            return false;
        };
        let Some(asset) = assets.choose(rng) else {
            return false;
        };
        self.decoration = Some(Decoration {
            kind,
            asset: asset.clone(),
        });
        true
    }

    /// Mark this tile as a settlement site: +1 gold, +2 science, raised
    /// defense, decoration removed.
    pub fn found_settlement(&mut self, settlement: SettlementId) {
        self.settlement = Some(settlement);
        self.resources.add(ResourceKind::Gold, 1);
        self.resources.add(ResourceKind::Science, 2);
        self.defense_modifier = self.defense_modifier.max(SETTLEMENT_DEFENSE_MODIFIER);
        self.decoration = None;
    }

    // -------------------------------------------------------------------------
    // Vertex matching
    // -------------------------------------------------------------------------

    /// Squared matching tolerance in pixels for this tile's layout.
    pub fn vertex_tolerance_sq(&self) -> f32 {
        let tolerance = self.layout.size * VERTEX_MATCH_TOLERANCE;
        tolerance * tolerance
    }

    /// Index of this tile's vertex at `point`, within tolerance.
    pub fn vertex_at(&self, point: Point) -> Option<usize> {
        let tolerance_sq = self.vertex_tolerance_sq();
        self.vertices.iter().position(|v| v.matches(point, tolerance_sq))
    }

    pub fn has_vertex_at(&self, point: Point) -> bool {
        self.vertex_at(point).is_some()
    }

    /// Pairs `(mine, theirs)` of vertex indices at the same point.
    /// Neighbors share exactly two; non-adjacent tiles share none.
    ///
    /// # Panics
    /// If the tiles were laid out with different layouts.
    pub fn shared_vertices(&self, other: &Tile) -> Vec<(usize, usize)> {
        assert_eq!(
            self.layout, other.layout,
            "cannot match vertices of {} and {} across layouts",
            self.coord, other.coord
        );
        let tolerance_sq = self.vertex_tolerance_sq();
        let mut shared = Vec::new();
        for (i, v) in self.vertices.iter().enumerate() {
            for (j, o) in other.vertices.iter().enumerate() {
                if v.matches(o.point, tolerance_sq) {
                    shared.push((i, j));
                }
            }
        }
        shared
    }

    pub fn random_vertex(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.vertices.len())
    }

    /// Shortest walk along this tile's border from vertex `from` to vertex
    /// `to`, both included. Empty when they are the same vertex.
    pub fn shortest_edge_path(&self, from: usize, to: usize) -> Vec<usize> {
        let backward = self.edge_walk(from, to, 0);
        let forward = self.edge_walk(from, to, 1);
        if backward.len() < forward.len() {
            backward
        } else {
            forward
        }
    }

    /// Walk the border in one direction (0 = previous, 1 = next).
    fn edge_walk(&self, from: usize, to: usize, direction: usize) -> Vec<usize> {
        if from == to {
            return Vec::new();
        }
        let mut path = vec![from];
        let mut current = from;
        for _ in 0..self.vertices.len() {
            current = self.vertices[current].neighbors[direction];
            path.push(current);
            if current == to {
                break;
            }
        }
        path
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}
