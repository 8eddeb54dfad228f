//! Hex terrain library
//!
//! Hex-grid terrain generation, walkability and location sampling for a
//! turn-based strategy map. Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod ids;
pub mod mobility;
pub mod naming;
pub mod noise_field;
pub mod sampler;
pub mod seeds;
pub mod terrain;
pub mod tile;
pub mod tile_info;
pub mod tilemap;
pub mod world;

pub use config::MapConfig;
pub use error::{ConfigError, DataError, WorldError};
pub use grid::TileGrid;
pub use hex::{Direction, HexCoord, HexLayout, Point};
pub use ids::{SettlementId, TileId};
pub use mobility::MobilityGraph;
pub use sampler::LocationSampler;
pub use seeds::WorldSeeds;
pub use terrain::BiomeType;
pub use tile::Tile;
pub use tile_info::TileInfoTable;
pub use world::World;
