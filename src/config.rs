//! Configuration for world generation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DataError};
use crate::hex::HexLayout;
use crate::noise_field::NoiseConfig;
use crate::terrain::{PolarBanding, TerrainThresholds};

/// Construction-time parameters of a world. Missing JSON fields take the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Number of tiles from the center to the edge of the map
    pub radius: i32,

    /// Center-to-corner hex size in pixels
    pub hex_size: f32,

    pub water_noise: NoiseConfig,
    pub forest_noise: NoiseConfig,
    pub mountain_noise: NoiseConfig,

    pub thresholds: TerrainThresholds,

    pub polar_banding: PolarBanding,

    /// Largest separation tried when spreading tribe start locations
    pub start_separation: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            hex_size: 97.0,
            water_noise: NoiseConfig::new(0.0, 200.0, 1, 0.06),
            forest_noise: NoiseConfig::new(0.0, 200.0, 5, 0.1),
            mountain_noise: NoiseConfig::new(0.0, 200.0, 3, 1.04),
            thresholds: TerrainThresholds::default(),
            polar_banding: PolarBanding::default(),
            start_separation: 10,
        }
    }
}

impl MapConfig {
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Radius as an unsigned count, once validated.
    pub fn radius(&self) -> Result<u32, ConfigError> {
        if self.radius < 1 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        Ok(self.radius as u32)
    }

    pub fn layout(&self) -> HexLayout {
        HexLayout::new(self.hex_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radius()?;
        if !(self.hex_size > 0.0) {
            return Err(ConfigError::InvalidHexSize(self.hex_size));
        }
        self.water_noise.validate("water")?;
        self.forest_noise.validate("forest")?;
        self.mountain_noise.validate("mountain")?;
        self.polar_banding.validate()?;
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, DataError> {
        serde_json::from_str(text).map_err(|source| DataError::Parse {
            name: "map config".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
