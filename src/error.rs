//! Error types
//!
//! Only unusable configuration and refused mutations are errors. Lookups that
//! come back empty are `Option`/empty results.

use thiserror::Error;

use crate::hex::HexCoord;
use crate::terrain::BiomeType;

/// Invalid world configuration, rejected at construction time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("map radius must be at least 1, got {0}")]
    InvalidRadius(i32),

    #[error("{field} noise range is empty: min {min} must be below max {max}")]
    EmptyNoiseRange { field: &'static str, min: f64, max: f64 },

    #[error("{field} noise needs at least one octave")]
    NoOctaves { field: &'static str },

    #[error("{field} noise frequency must be positive, got {frequency}")]
    InvalidFrequency { field: &'static str, frequency: f64 },

    #[error("polar banding denominator must be non-zero")]
    InvalidPolarBanding,

    #[error("hex size must be positive, got {0}")]
    InvalidHexSize(f32),
}

/// Problems loading terrain metadata.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no terrain metadata for biome {0}")]
    MissingBiome(BiomeType),
}

/// World construction and mutation failures.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("no tile at {0}")]
    NoTile(HexCoord),

    #[error("tile {0} is not walkable")]
    NotWalkable(HexCoord),

    #[error("tile {0} already hosts a settlement")]
    AlreadySettled(HexCoord),

    #[error("could not place settlements: requested {requested}, found {placed}")]
    CouldNotPlace { requested: usize, placed: usize },
}
