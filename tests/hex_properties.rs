//! Property-based tests for hex coordinate math.

use proptest::prelude::*;

use hex_terrain::hex::{axial_distance, HexCoord};
use hex_terrain::HexLayout;

fn coord() -> impl Strategy<Value = HexCoord> {
    (-500i32..500, -500i32..500).prop_map(|(q, r)| HexCoord::new(q, r))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Distance is symmetric and zero only to itself.
    #[test]
    fn prop_distance_symmetric(a in coord(), b in coord()) {
        prop_assert_eq!(axial_distance(a, b), axial_distance(b, a));
        prop_assert_eq!(axial_distance(a, a), 0);
        prop_assert_eq!(axial_distance(a, b) == 0, a == b);
    }

    /// Triangle inequality holds.
    #[test]
    fn prop_distance_triangle(a in coord(), b in coord(), c in coord()) {
        prop_assert!(a.distance(c) <= a.distance(b) + b.distance(c));
    }

    /// Six distinct neighbors, each one step away and pointing back.
    #[test]
    fn prop_neighbors_symmetric(a in coord()) {
        let neighbors = a.neighbors();
        prop_assert_eq!(neighbors.len(), 6);
        for (i, n) in neighbors.iter().enumerate() {
            prop_assert_eq!(a.distance(*n), 1);
            prop_assert!(n.neighbors().contains(&a));
            prop_assert!(!neighbors[i + 1..].contains(n));
            prop_assert_eq!(n.direction_to(a), a.direction_to(*n).opposite());
        }
    }

    /// Rings have 6d members, all exactly d away, no duplicates.
    #[test]
    fn prop_ring_size_and_distance(a in coord(), d in 1u32..12) {
        let ring = a.ring(d);
        prop_assert_eq!(ring.len(), 6 * d as usize);
        for h in &ring {
            prop_assert_eq!(a.distance(*h), d);
        }
        let mut sorted = ring.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), ring.len());
    }

    /// Consecutive ring members are adjacent.
    #[test]
    fn prop_ring_is_a_closed_walk(a in coord(), d in 1u32..12) {
        let ring = a.ring(d);
        for i in 0..ring.len() {
            let next = ring[(i + 1) % ring.len()];
            prop_assert!(ring[i].is_adjacent(next));
        }
    }

    /// Hexagon area is 3n(n+1)+1 and every member is within n.
    #[test]
    fn prop_hexagon_area(a in coord(), n in 0u32..10) {
        let cells = a.hexagon(n);
        prop_assert_eq!(cells.len() as u32, 3 * n * (n + 1) + 1);
        prop_assert!(cells.iter().all(|c| a.distance(*c) <= n));
    }

    /// Projection is deterministic and neighbors sit one hex width apart.
    #[test]
    fn prop_neighbor_centers_are_equidistant(q in -50i32..50, r in -50i32..50) {
        let layout = HexLayout::new(97.0);
        let a = HexCoord::new(q, r);
        let center = layout.center(a);
        prop_assert_eq!(center, layout.center(a));
        let expected = 3.0 * 97.0 * 97.0;
        for n in a.neighbors() {
            let d2 = center.distance_squared(layout.center(n));
            prop_assert!((d2 - expected).abs() / expected < 1e-3, "{} vs {}", d2, expected);
        }
    }
}
