//! Walkability graph
//!
//! Vertices are walkable tiles, edges join grid neighbors that are both
//! walkable. Every edge costs one movement point. The graph is built once
//! from a finished grid and only read afterwards.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::grid::TileGrid;
use crate::ids::TileId;

/// Adjacency sets keyed by tile id.
#[derive(Clone, Debug, Default)]
pub struct MobilityGraph {
    adjacency: HashMap<TileId, HashSet<TileId>>,
}

impl MobilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph over the walkable tiles of `grid`.
    pub fn build(grid: &TileGrid) -> Self {
        let mut graph = Self::new();
        for tile in grid.iter().filter(|t| t.is_walkable()) {
            let neighbors = grid
                .neighbors_of(tile.coord())
                .into_iter()
                .filter(|n| n.is_walkable())
                .map(|n| n.id());
            graph.add_vertex(grid, tile.id(), neighbors);
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Built mobility graph"
        );
        graph
    }

    /// Insert `id` with the given neighbors, replacing any earlier entry.
    ///
    /// # Panics
    /// If `id` or any neighbor has no tile in `grid`.
    pub fn add_vertex(
        &mut self,
        grid: &TileGrid,
        id: TileId,
        neighbors: impl IntoIterator<Item = TileId>,
    ) {
        let neighbors: HashSet<TileId> = neighbors.into_iter().collect();
        for vertex in std::iter::once(&id).chain(&neighbors) {
            assert!(
                grid.tile_by_id(*vertex).is_some(),
                "mobility vertex {} has no tile in the grid",
                vertex
            );
        }
        self.insert_vertex(id, neighbors);
    }

    fn insert_vertex(&mut self, id: TileId, neighbors: impl IntoIterator<Item = TileId>) {
        self.adjacency.insert(id, neighbors.into_iter().collect());
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn neighbors(&self, id: TileId) -> Option<&HashSet<TileId>> {
        self.adjacency.get(&id)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Directed edge count; each neighbor pair counts twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum()
    }

    /// Fewest-step route from `from` to `to`, excluding `from` and ending
    /// with `to`. Empty when the endpoints are equal, either is missing, or
    /// no route exists.
    pub fn shortest_path(&self, from: TileId, to: TileId) -> Vec<TileId> {
        if from == to || !self.contains(from) || !self.contains(to) {
            return Vec::new();
        }

        let mut came_from: HashMap<TileId, TileId> = HashMap::new();
        let mut frontier = VecDeque::from([from]);
        came_from.insert(from, from);

        while let Some(current) = frontier.pop_front() {
            if current == to {
                break;
            }
            let Some(neighbors) = self.adjacency.get(&current) else {
                continue;
            };
            for &next in neighbors {
                if !came_from.contains_key(&next) {
                    came_from.insert(next, current);
                    frontier.push_back(next);
                }
            }
        }

        if !came_from.contains_key(&to) {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            path.push(current);
            current = came_from[&current];
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::hex::HexCoord;
    use crate::seeds::WorldSeeds;
    use crate::tile_info::TileInfoTable;

    fn grid() -> TileGrid {
        let config = MapConfig::default().with_radius(3);
        let infos = TileInfoTable::defaults().unwrap();
        TileGrid::allocate(&config, &WorldSeeds::from_master(4), &infos).unwrap()
    }

    /// An id no tile of `grid` carries.
    fn stray_id(grid: &TileGrid) -> TileId {
        (0..).map(TileId).find(|id| grid.tile_by_id(*id).is_none()).unwrap()
    }

    /// 0 - 1 - 2 - 3, plus an isolated pair 10 - 11
    fn line_graph() -> MobilityGraph {
        let mut g = MobilityGraph::new();
        g.insert_vertex(TileId(0), [TileId(1)]);
        g.insert_vertex(TileId(1), [TileId(0), TileId(2)]);
        g.insert_vertex(TileId(2), [TileId(1), TileId(3)]);
        g.insert_vertex(TileId(3), [TileId(2)]);
        g.insert_vertex(TileId(10), [TileId(11)]);
        g.insert_vertex(TileId(11), [TileId(10)]);
        g
    }

    #[test]
    fn test_shortest_path_excludes_start() {
        let g = line_graph();
        assert_eq!(
            g.shortest_path(TileId(0), TileId(3)),
            vec![TileId(1), TileId(2), TileId(3)]
        );
        assert_eq!(g.shortest_path(TileId(2), TileId(1)), vec![TileId(1)]);
    }

    #[test]
    fn test_no_path_is_empty() {
        let g = line_graph();
        assert!(g.shortest_path(TileId(1), TileId(1)).is_empty());
        assert!(g.shortest_path(TileId(0), TileId(11)).is_empty());
        assert!(g.shortest_path(TileId(0), TileId(99)).is_empty());
    }

    #[test]
    fn test_add_vertex_accepts_grid_tiles() {
        let grid = grid();
        let a = grid.get(HexCoord::ORIGIN).unwrap().id();
        let b = grid.get(HexCoord::new(1, 0)).unwrap().id();
        let mut g = MobilityGraph::new();
        g.add_vertex(&grid, a, [b]);
        g.add_vertex(&grid, b, [a]);
        assert_eq!(g.shortest_path(a, b), vec![b]);
    }

    #[test]
    #[should_panic(expected = "has no tile in the grid")]
    fn test_add_vertex_without_tile_panics() {
        let grid = grid();
        let mut g = MobilityGraph::new();
        g.add_vertex(&grid, stray_id(&grid), []);
    }

    #[test]
    #[should_panic(expected = "has no tile in the grid")]
    fn test_add_vertex_with_stray_neighbor_panics() {
        let grid = grid();
        let a = grid.get(HexCoord::ORIGIN).unwrap().id();
        let mut g = MobilityGraph::new();
        g.add_vertex(&grid, a, [stray_id(&grid)]);
    }

    #[test]
    fn test_build_only_holds_grid_tiles() {
        let grid = grid();
        let g = MobilityGraph::build(&grid);
        for tile in grid.iter() {
            assert_eq!(g.contains(tile.id()), tile.is_walkable());
            for n in g.neighbors(tile.id()).into_iter().flatten() {
                assert!(grid.tile_by_id(*n).is_some_and(|t| t.is_walkable()));
            }
        }
    }

    #[test]
    fn test_add_vertex_overwrites() {
        let mut g = line_graph();
        g.insert_vertex(TileId(1), [TileId(2)]);
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.neighbors(TileId(1)).map(HashSet::len), Some(1));
        // 0 -> 1 still exists, 1 -> 0 does not
        assert!(g.shortest_path(TileId(1), TileId(0)).is_empty());
        assert_eq!(g.shortest_path(TileId(0), TileId(2)).len(), 2);
    }

    #[test]
    fn test_bfs_takes_the_short_way_round() {
        // Square 0-1-2-3-0 with a long detour 0-4-5-6-2
        let mut g = MobilityGraph::new();
        g.insert_vertex(TileId(0), [TileId(1), TileId(3), TileId(4)]);
        g.insert_vertex(TileId(1), [TileId(0), TileId(2)]);
        g.insert_vertex(TileId(2), [TileId(1), TileId(3), TileId(6)]);
        g.insert_vertex(TileId(3), [TileId(0), TileId(2)]);
        g.insert_vertex(TileId(4), [TileId(0), TileId(5)]);
        g.insert_vertex(TileId(5), [TileId(4), TileId(6)]);
        g.insert_vertex(TileId(6), [TileId(5), TileId(2)]);
        assert_eq!(g.shortest_path(TileId(0), TileId(2)).len(), 2);
        assert_eq!(g.shortest_path(TileId(4), TileId(3)).len(), 2);
    }
}
