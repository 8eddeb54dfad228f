//! Axial hex coordinates
//!
//! Pure value math over `(q, r)`: neighbor offsets, rings, distances and the
//! pixel projection handed to renderers. Rows run along `r`; `+r` is the
//! northern edge of the map.

use serde::{Deserialize, Serialize};

// =============================================================================
// DIRECTIONS
// =============================================================================

/// The six neighbor directions, clockwise starting from north-west.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
}

impl Direction {
    /// All directions in neighbor order.
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
    ];

    /// Axial offset `(dq, dr)` of this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, 1),
            Direction::NorthEast => (0, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 3) % 6]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::NorthWest => write!(f, "north-west"),
            Direction::NorthEast => write!(f, "north-east"),
            Direction::East => write!(f, "east"),
            Direction::SouthEast => write!(f, "south-east"),
            Direction::SouthWest => write!(f, "south-west"),
            Direction::West => write!(f, "west"),
        }
    }
}

// =============================================================================
// COORDINATES
// =============================================================================

/// Axial hex coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Coordinate one step away in `direction`.
    pub fn neighbor(self, direction: Direction) -> HexCoord {
        self.offset(direction, 1)
    }

    /// Coordinate `steps` away in `direction`.
    pub fn offset(self, direction: Direction, steps: i32) -> HexCoord {
        let (dq, dr) = direction.offset();
        HexCoord::new(self.q + dq * steps, self.r + dr * steps)
    }

    /// The six neighbors, in `Direction::ALL` order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        Direction::ALL.map(|direction| self.neighbor(direction))
    }

    /// Hex distance: `(|dq| + |dr| + |dq + dr|) / 2`. Worked in `i64`, so
    /// any pair of coordinates is safe; saturates at `u32::MAX`.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let steps = (dq.abs() + dr.abs() + (dq + dr).abs()) / 2;
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    /// All coordinates at exactly `radius` steps, walking clockwise from the
    /// western corner. Radius 0 yields the center alone.
    pub fn ring(self, radius: u32) -> Vec<HexCoord> {
        if radius == 0 {
            return vec![self];
        }

        let steps = radius as i32;
        let mut result = Vec::with_capacity(6 * radius as usize);
        let mut current = self.offset(Direction::West, steps);

        // From the western corner the edges follow NE, E, SE, SW, W, NW
        for side in 0..6 {
            let direction = Direction::ALL[(side + 1) % 6];
            for _ in 0..radius {
                result.push(current);
                current = current.neighbor(direction);
            }
        }

        result
    }

    /// Every coordinate within `radius` steps, ordered row by row (`r`
    /// ascending, then `q` ascending).
    pub fn hexagon(self, radius: u32) -> Vec<HexCoord> {
        let n = radius as i32;
        let mut result = Vec::new();
        for dr in -n..=n {
            let q_min = (-n).max(-dr - n);
            let q_max = n.min(-dr + n);
            for dq in q_min..=q_max {
                result.push(HexCoord::new(self.q + dq, self.r + dr));
            }
        }
        result
    }

    /// Direction of an adjacent `other` relative to `self`.
    ///
    /// Same `q` means north-east or south-west, same `r` means east or west,
    /// anything else is one of the remaining diagonals. Only meaningful for
    /// neighbors.
    pub fn direction_to(self, other: HexCoord) -> Direction {
        if self.q == other.q {
            if self.r - 1 == other.r {
                return Direction::SouthWest;
            }
            return Direction::NorthEast;
        }
        if self.r == other.r {
            if self.q + 1 == other.q {
                return Direction::East;
            }
            return Direction::West;
        }
        if self.q + 1 == other.q {
            return Direction::SouthEast;
        }
        Direction::NorthWest
    }

    pub fn is_adjacent(self, other: HexCoord) -> bool {
        self.distance(other) == 1
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Hex distance between two coordinates.
pub fn axial_distance(a: HexCoord, b: HexCoord) -> u32 {
    a.distance(b)
}

// =============================================================================
// PIXEL PROJECTION
// =============================================================================

/// World-space point (pixels, y pointing down).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Pointy-top projection of axial coordinates into world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    /// Center-to-corner distance in pixels
    pub size: f32,
    /// World position of hex (0, 0)
    pub origin: Point,
}

impl HexLayout {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            origin: Point::default(),
        }
    }

    /// Pixel center of `coord`. `+r` rows sit above the origin.
    pub fn center(&self, coord: HexCoord) -> Point {
        let sqrt3 = 3f32.sqrt();
        let x = self.size * sqrt3 * (coord.q as f32 + coord.r as f32 / 2.0);
        let y = -self.size * 1.5 * coord.r as f32;
        Point::new(self.origin.x + x, self.origin.y + y)
    }

    /// The six corners of `coord`, clockwise from the top corner.
    pub fn corners(&self, coord: HexCoord) -> [Point; 6] {
        let center = self.center(coord);
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f32 - 90.0).to_radians();
            Point::new(
                center.x + self.size * angle.cos(),
                center.y + self.size * angle.sin(),
            )
        })
    }
}

/// Pixel center of `coord` under `layout`.
pub fn center_xy(layout: &HexLayout, coord: HexCoord) -> (f32, f32) {
    let p = layout.center(coord);
    (p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_offsets_are_unit_distance() {
        let c = HexCoord::new(2, -3);
        for n in c.neighbors() {
            assert_eq!(c.distance(n), 1);
        }
    }

    #[test]
    fn test_direction_to_matches_neighbor_order() {
        let c = HexCoord::new(-1, 4);
        for direction in Direction::ALL {
            assert_eq!(c.direction_to(c.neighbor(direction)), direction);
        }
    }

    #[test]
    fn test_opposite_direction() {
        assert_eq!(Direction::NorthWest.opposite(), Direction::SouthEast);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_ring_sizes() {
        let c = HexCoord::ORIGIN;
        assert_eq!(c.ring(0), vec![c]);
        for d in 1..6 {
            let ring = c.ring(d);
            assert_eq!(ring.len(), 6 * d as usize);
            assert!(ring.iter().all(|h| c.distance(*h) == d));
        }
    }

    #[test]
    fn test_hexagon_count() {
        // 3n(n+1) + 1
        assert_eq!(HexCoord::ORIGIN.hexagon(0).len(), 1);
        assert_eq!(HexCoord::ORIGIN.hexagon(2).len(), 19);
        assert_eq!(HexCoord::ORIGIN.hexagon(10).len(), 331);
    }

    #[test]
    fn test_distance_formula() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(3, -1);
        assert_eq!(axial_distance(a, b), 3);
        assert_eq!(axial_distance(b, a), 3);
        assert_eq!(axial_distance(HexCoord::new(-2, -2), HexCoord::new(1, 1)), 6);
    }

    #[test]
    fn test_distance_at_coordinate_extremes() {
        let far = HexCoord::new(i32::MAX, 1);
        assert_eq!(far.distance(HexCoord::ORIGIN), i32::MAX as u32 + 1);
        assert_eq!(HexCoord::new(i32::MIN, 0).distance(HexCoord::ORIGIN), 1 << 31);
        assert_eq!(
            HexCoord::new(i32::MIN, i32::MIN).distance(HexCoord::new(i32::MAX, i32::MAX)),
            u32::MAX
        );
        assert_eq!(far.distance(far), 0);
    }

    #[test]
    fn test_adjacent_hexes_share_two_corners() {
        let layout = HexLayout::new(97.0);
        let a = HexCoord::new(1, 1);
        for b in a.neighbors() {
            let shared = layout
                .corners(a)
                .iter()
                .filter(|p| layout.corners(b).iter().any(|o| o.distance_squared(**p) < 1.0))
                .count();
            assert_eq!(shared, 2, "{} and {} should share an edge", a, b);
        }
    }

    #[test]
    fn test_north_row_is_above_origin() {
        let layout = HexLayout::new(10.0);
        let (_, y_north) = center_xy(&layout, HexCoord::new(0, 1));
        let (x_east, y_east) = center_xy(&layout, HexCoord::new(1, 0));
        assert!(y_north < 0.0);
        assert!(x_east > 0.0);
        assert!(y_east.abs() < 1e-4);
    }
}
