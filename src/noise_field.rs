//! Seeded scalar noise fields over hex coordinates
//!
//! A field samples layered simplex noise at `(q, r)` and rescales it into a
//! configured `[min, max]` range. Terrain rules compare these samples against
//! thresholds expressed in the same range.

use noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_persistence() -> f64 {
    0.5
}

fn default_lacunarity() -> f64 {
    2.0
}

/// Parameters of one noise field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Lowest value a sample can take
    pub min: f64,
    /// Highest value a sample can take
    pub max: f64,
    /// Number of noise layers summed together
    pub octaves: u32,
    /// Base frequency applied to the coordinate (higher = smaller features)
    pub frequency: f64,
    /// Amplitude decay per octave
    #[serde(default = "default_persistence")]
    pub persistence: f64,
    /// Frequency multiplier per octave
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f64,
}

impl NoiseConfig {
    pub fn new(min: f64, max: f64, octaves: u32, frequency: f64) -> Self {
        Self {
            min,
            max,
            octaves,
            frequency,
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
        }
    }

    /// Reject configurations that cannot produce a usable field.
    /// `field` names the field in error messages.
    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min < self.max) {
            return Err(ConfigError::EmptyNoiseRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        if self.octaves == 0 {
            return Err(ConfigError::NoOctaves { field });
        }
        if !(self.frequency > 0.0) {
            return Err(ConfigError::InvalidFrequency {
                field,
                frequency: self.frequency,
            });
        }
        Ok(())
    }
}

/// Anything that maps a 2D coordinate to a deterministic scalar.
pub trait NoiseSampler {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Multi-octave simplex noise rescaled into `[config.min, config.max]`.
#[derive(Clone)]
pub struct NoiseField {
    config: NoiseConfig,
    source: OpenSimplex,
}

impl NoiseField {
    pub fn new(config: NoiseConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate("noise")?;
        Ok(Self {
            config,
            source: OpenSimplex::new(seed),
        })
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }
}

impl NoiseSampler for NoiseField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let c = &self.config;
        let raw = fbm_noise(
            &self.source,
            x * c.frequency,
            y * c.frequency,
            c.octaves,
            c.persistence,
            c.lacunarity,
        );
        let unit = ((raw + 1.0) / 2.0).clamp(0.0, 1.0);
        c.min + unit * (c.max - c.min)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("config", &self.config).finish()
    }
}

/// Fractional Brownian motion, normalized back to roughly [-1, 1].
fn fbm_noise(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}
