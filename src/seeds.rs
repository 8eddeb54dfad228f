//! Seed management for world generation
//!
//! Each generation step draws from its own seed, derived from a master seed,
//! so one step can be varied while the others stay fixed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeds for all world generation steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Water noise field
    pub water: u64,
    /// Forest noise field
    pub forest: u64,
    /// Mountain noise field
    pub mountain: u64,
    /// Tile identities and sprite variants
    pub tiles: u64,
    /// Polar tundra rolls
    pub polar: u64,
    /// Tree and mountain asset variants
    pub decorations: u64,
    /// Start location sampling and settlement names
    pub placement: u64,
}

impl WorldSeeds {
    /// Derive every sub-seed from `master`.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            water: derive_seed(master, "water"),
            forest: derive_seed(master, "forest"),
            mountain: derive_seed(master, "mountain"),
            tiles: derive_seed(master, "tiles"),
            polar: derive_seed(master, "polar"),
            decorations: derive_seed(master, "decorations"),
            placement: derive_seed(master, "placement"),
        }
    }

    pub fn builder(master: u64) -> WorldSeedsBuilder {
        WorldSeedsBuilder::new(master)
    }

    /// Fresh RNG for one of the sub-seeds.
    pub fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }
}

impl Default for WorldSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Builder for overriding individual seeds while deriving others from master
pub struct WorldSeedsBuilder {
    seeds: WorldSeeds,
}

impl WorldSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: WorldSeeds::from_master(master),
        }
    }

    pub fn water(mut self, seed: u64) -> Self {
        self.seeds.water = seed;
        self
    }

    pub fn forest(mut self, seed: u64) -> Self {
        self.seeds.forest = seed;
        self
    }

    pub fn mountain(mut self, seed: u64) -> Self {
        self.seeds.mountain = seed;
        self
    }

    pub fn polar(mut self, seed: u64) -> Self {
        self.seeds.polar = seed;
        self
    }

    pub fn placement(mut self, seed: u64) -> Self {
        self.seeds.placement = seed;
        self
    }

    pub fn build(self) -> WorldSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a step name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, water: {}, forest: {}, mountain: {}, \
             tiles: {}, polar: {}, decorations: {}, placement: {} }}",
            self.master,
            self.water,
            self.forest,
            self.mountain,
            self.tiles,
            self.polar,
            self.decorations,
            self.placement,
        )
    }
}
