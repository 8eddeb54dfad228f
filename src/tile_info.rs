//! Static terrain metadata
//!
//! One record per biome: sprite keys, defense modifier, per-turn yield and
//! decoration assets. Defaults are embedded via `include_str!`; a `tiles.json`
//! in a data directory overrides individual biomes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::terrain::BiomeType;
use crate::tile::Resources;

const DEFAULT_TILES_JSON: &str = include_str!("../data/defaults/tiles.json");

/// A single sprite key or a list to pick from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpriteKeys {
    One(String),
    Many(Vec<String>),
}

impl SpriteKeys {
    /// The key to use; one is picked at random from a list.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<&str> {
        match self {
            SpriteKeys::One(key) => Some(key.as_str()),
            SpriteKeys::Many(keys) => keys.choose(rng).map(String::as_str),
        }
    }
}

/// Metadata for one kind of tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileInfo {
    #[serde(rename = "type")]
    pub biome: BiomeType,
    pub key: SpriteKeys,
    /// Used when two units fight over this tile
    #[serde(default)]
    pub defense_modifier: f32,
    /// Resources produced each turn
    #[serde(default)]
    pub resources: Resources,
    /// Asset keys for trees/mountains drawn on top of the tile
    #[serde(default)]
    pub decorations: Vec<String>,
}

/// Metadata for every biome.
#[derive(Clone, Debug)]
pub struct TileInfoTable {
    infos: HashMap<BiomeType, TileInfo>,
}

impl TileInfoTable {
    /// Load from the defaults compiled into the binary.
    pub fn defaults() -> Result<Self, DataError> {
        Self::from_json("embedded tiles.json", DEFAULT_TILES_JSON)
    }

    /// Parse a JSON array of records. `name` is used in error messages.
    pub fn from_json(name: &str, text: &str) -> Result<Self, DataError> {
        let records: Vec<TileInfo> = serde_json::from_str(text).map_err(|source| DataError::Parse {
            name: name.to_string(),
            source,
        })?;
        let infos = records.into_iter().map(|info| (info.biome, info)).collect();
        Ok(Self { infos })
    }

    /// Load defaults, then override with `dir/tiles.json` if it exists.
    pub fn load_from(dir: &Path) -> Result<Self, DataError> {
        let mut table = Self::defaults()?;

        let path = dir.join("tiles.json");
        if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| DataError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let overrides = Self::from_json(&path.display().to_string(), &text)?;
            table.infos.extend(overrides.infos);
        }

        Ok(table)
    }

    pub fn get(&self, biome: BiomeType) -> Result<&TileInfo, DataError> {
        self.infos.get(&biome).ok_or(DataError::MissingBiome(biome))
    }

    /// Fail unless every biome has a record.
    pub fn require_all(&self) -> Result<(), DataError> {
        for biome in BiomeType::all() {
            self.get(*biome)?;
        }
        Ok(())
    }
}
