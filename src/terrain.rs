//! Biome classification
//!
//! Three noise fields (water, forest, mountain) are compared against ordered
//! thresholds to give each coordinate a biome. A separate polar pass then
//! pushes the outermost `r` rows towards tundra.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::error::ConfigError;
use crate::hex::HexCoord;
use crate::noise_field::{NoiseField, NoiseSampler};
use crate::seeds::WorldSeeds;

/// Terrain kinds a tile can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeType {
    /// Open ground, resources can grow on it
    Land,
    /// Only boats go through
    Water,
    /// Only bigger boats navigate here
    DeepWater,
    Beach,
    Forest,
    Mountain,
    /// Polar cap
    Toundra,
}

impl BiomeType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Land,
            Self::Water,
            Self::DeepWater,
            Self::Beach,
            Self::Forest,
            Self::Mountain,
            Self::Toundra,
        ]
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Self::Water | Self::DeepWater)
    }

    /// Land units can stand on this biome.
    pub fn is_walkable(&self) -> bool {
        !self.is_water()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Land => "Land",
            Self::Water => "Water",
            Self::DeepWater => "Deep Water",
            Self::Beach => "Beach",
            Self::Forest => "Forest",
            Self::Mountain => "Mountain",
            Self::Toundra => "Toundra",
        }
    }
}

impl std::fmt::Display for BiomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Cut-off values, in the units of the respective noise field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainThresholds {
    /// Water noise below this is deep water
    pub deep_water: f64,
    /// Water noise below this is water (less = less water)
    pub water: f64,
    /// Forest noise below this is forest (less = fewer trees)
    pub forest: f64,
    /// Mountain noise above this is mountain
    pub mountain: f64,
}

impl Default for TerrainThresholds {
    fn default() -> Self {
        Self {
            deep_water: 50.0,
            water: 70.0,
            forest: 75.0,
            mountain: 140.0,
        }
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Assigns a biome to each coordinate from three noise fields.
#[derive(Debug)]
pub struct TerrainClassifier<S = NoiseField> {
    water: S,
    forest: S,
    mountain: S,
    thresholds: TerrainThresholds,
}

impl TerrainClassifier<NoiseField> {
    /// Build the classifier described by `config`, seeding each field from
    /// `seeds`.
    pub fn from_config(config: &MapConfig, seeds: &WorldSeeds) -> Result<Self, ConfigError> {
        config.water_noise.validate("water")?;
        config.forest_noise.validate("forest")?;
        config.mountain_noise.validate("mountain")?;
        Ok(Self::new(
            NoiseField::new(config.water_noise, seeds.water as u32)?,
            NoiseField::new(config.forest_noise, seeds.forest as u32)?,
            NoiseField::new(config.mountain_noise, seeds.mountain as u32)?,
            config.thresholds,
        ))
    }
}

impl<S: NoiseSampler> TerrainClassifier<S> {
    pub fn new(water: S, forest: S, mountain: S, thresholds: TerrainThresholds) -> Self {
        Self {
            water,
            forest,
            mountain,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &TerrainThresholds {
        &self.thresholds
    }

    /// Biome at `coord`. Rules are checked in order, first match wins.
    pub fn classify(&self, coord: HexCoord) -> BiomeType {
        let (x, y) = (coord.q as f64, coord.r as f64);
        let t = &self.thresholds;

        let water = self.water.sample(x, y);
        if water < t.deep_water {
            return BiomeType::DeepWater;
        }
        if water < t.water {
            return BiomeType::Water;
        }
        if self.forest.sample(x, y) < t.forest {
            return BiomeType::Forest;
        }
        if self.mountain.sample(x, y) > t.mountain {
            return BiomeType::Mountain;
        }
        BiomeType::Land
    }
}

// =============================================================================
// POLAR BANDING
// =============================================================================

/// How many rows per pole get tundra: `floor(radius · numerator / denominator)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarBanding {
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for PolarBanding {
    fn default() -> Self {
        Self {
            numerator: 3,
            denominator: 15,
        }
    }
}

impl PolarBanding {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.denominator == 0 {
            return Err(ConfigError::InvalidPolarBanding);
        }
        Ok(())
    }

    /// Number of polar rows on each of the `+r` and `-r` edges.
    pub fn row_count(&self, radius: u32) -> u32 {
        radius * self.numerator / self.denominator
    }

    /// The polar rows as `(r, depth)` pairs, depth 0 being the outermost
    /// row. Both poles are listed for each depth.
    pub fn rows(&self, radius: u32) -> Vec<(i32, u32)> {
        let n = radius as i32;
        let mut rows = Vec::new();
        for depth in 0..self.row_count(radius) {
            let d = depth as i32;
            rows.push((n - d, depth));
            rows.push((-n + d, depth));
        }
        rows
    }

    /// Chance that a tile `depth` rows in from the edge turns to tundra.
    /// Row 0 always does; deeper rows decay linearly.
    pub fn probability(&self, radius: u32, depth: u32) -> f64 {
        let rows = self.row_count(radius);
        if rows == 0 {
            return 0.0;
        }
        1.0 - depth as f64 / rows as f64
    }

    /// Roll whether a tile at `depth` becomes tundra.
    pub fn roll(&self, radius: u32, depth: u32, rng: &mut impl Rng) -> bool {
        rng.gen::<f64>() < self.probability(radius, depth)
    }
}
