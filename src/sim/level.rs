//! Level files and spawner tiles
//!
//! A level is a JSON record:
//!
//! ```json
//! { "tile_size": 16,
//!   "tilemap": { "3;14": { "type": "floor", "variant": 0, "pos": [3, 14] } },
//!   "offgrid": [ { "type": "circus", "variant": 2, "pos": [40.0, 96.0] } ] }
//! ```
//!
//! Spawner tiles (`"spawners"`) mark where entities start. They are pulled
//! out of the map once when the session is built and never drawn.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::tilemap::{DecorTile, SpatialTileIndex, Tile, grid_key, parse_grid_key};
use crate::error::LevelError;

/// Tile kind used for spawner markers
pub const SPAWNER_KIND: &str = "spawners";

/// What a spawner variant instantiates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Player,
    Clown,
    Monkey,
    Coin,
    Trapeze,
}

impl SpawnKind {
    pub const ALL: [SpawnKind; 5] = [
        SpawnKind::Player,
        SpawnKind::Clown,
        SpawnKind::Monkey,
        SpawnKind::Coin,
        SpawnKind::Trapeze,
    ];

    pub fn from_variant(variant: u32) -> Option<Self> {
        match variant {
            0 => Some(SpawnKind::Player),
            1 => Some(SpawnKind::Clown),
            2 => Some(SpawnKind::Monkey),
            3 => Some(SpawnKind::Coin),
            4 => Some(SpawnKind::Trapeze),
            _ => None,
        }
    }

    pub fn variant(&self) -> u32 {
        match self {
            SpawnKind::Player => 0,
            SpawnKind::Clown => 1,
            SpawnKind::Monkey => 2,
            SpawnKind::Coin => 3,
            SpawnKind::Trapeze => 4,
        }
    }

    /// `(kind, variant)` pairs for every known spawner
    pub fn extract_pairs() -> Vec<(&'static str, u32)> {
        Self::ALL.iter().map(|k| (SPAWNER_KIND, k.variant())).collect()
    }
}

/// On-disk level record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelFile {
    pub tile_size: i64,
    pub tilemap: HashMap<String, Tile>,
    #[serde(default, alias = "decorative_tiles")]
    pub offgrid: Vec<DecorTile>,
}

impl LevelFile {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let content = std::fs::read_to_string(path)?;
        let level = Self::from_json(&content)?;
        log::info!(
            "Loaded level {} ({} tiles, {} decorative)",
            path.display(),
            level.tilemap.len(),
            level.offgrid.len()
        );
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), LevelError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Build the spatial index. Dictionary keys must be "x;y"; the cell in
    /// the key wins over the tile's own `pos` field.
    pub fn into_index(self) -> Result<SpatialTileIndex, LevelError> {
        if self.tile_size <= 0 || self.tile_size > i32::MAX as i64 {
            return Err(LevelError::InvalidTileSize(self.tile_size));
        }
        let mut index = SpatialTileIndex::new(self.tile_size as i32);
        for (key, mut tile) in self.tilemap {
            let cell = parse_grid_key(&key).ok_or(LevelError::InvalidTileKey(key))?;
            tile.pos = cell;
            index.insert(tile);
        }
        index.decor = self.offgrid;
        Ok(index)
    }

    pub fn from_index(index: &SpatialTileIndex) -> Self {
        Self {
            tile_size: index.tile_size as i64,
            tilemap: index
                .tiles()
                .map(|tile| (grid_key(tile.pos), tile.clone()))
                .collect(),
            offgrid: index.decor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec2};

    const LEVEL: &str = r#"{
        "tile_size": 16,
        "tilemap": {
            "0;10": {"type": "floor", "variant": 0, "pos": [0, 10]},
            "1;10": {"type": "circus", "variant": 1, "pos": [1, 10]},
            "1;9": {"type": "spawners", "variant": 0, "pos": [1, 9]}
        },
        "offgrid": [{"type": "circus", "variant": 3, "pos": [12.5, 40.0]}]
    }"#;

    #[test]
    fn test_parse_level() {
        let index = LevelFile::from_json(LEVEL).unwrap().into_index().unwrap();
        assert_eq!(index.tile_size, 16);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(IVec2::new(1, 10)).unwrap().variant, 1);
        assert_eq!(index.decor[0].pos, Vec2::new(12.5, 40.0));
    }

    #[test]
    fn test_decorative_alias() {
        let json = r#"{"tile_size": 8, "tilemap": {}, "decorative_tiles": []}"#;
        let index = LevelFile::from_json(json).unwrap().into_index().unwrap();
        assert_eq!(index.tile_size, 8);
        assert!(index.is_empty());
    }

    #[test]
    fn test_malformed_level_is_an_error() {
        assert!(matches!(
            LevelFile::from_json("{\"tilemap\": 3}"),
            Err(LevelError::Json(_))
        ));
        let bad_key = r#"{"tile_size": 16, "tilemap": {"oops": {"type": "floor", "variant": 0, "pos": [0, 0]}}}"#;
        assert!(matches!(
            LevelFile::from_json(bad_key).unwrap().into_index(),
            Err(LevelError::InvalidTileKey(_))
        ));
        let bad_size = r#"{"tile_size": 0, "tilemap": {}}"#;
        assert!(matches!(
            LevelFile::from_json(bad_size).unwrap().into_index(),
            Err(LevelError::InvalidTileSize(0))
        ));
    }

    #[test]
    fn test_missing_level_file_is_an_error() {
        let path = std::env::temp_dir().join("trapezirque-no-such-level.json");
        assert!(matches!(LevelFile::load(&path), Err(LevelError::Io(_))));
    }

    #[test]
    fn test_save_preserves_tiles() {
        let index = LevelFile::from_json(LEVEL).unwrap().into_index().unwrap();
        let json = LevelFile::from_index(&index).to_json().unwrap();
        let reloaded = LevelFile::from_json(&json).unwrap().into_index().unwrap();
        assert_eq!(reloaded.len(), index.len());
        assert_eq!(reloaded.get(IVec2::new(1, 9)), index.get(IVec2::new(1, 9)));
        assert_eq!(reloaded.decor, index.decor);
    }

    #[test]
    fn test_spawn_variants() {
        assert_eq!(SpawnKind::from_variant(4), Some(SpawnKind::Trapeze));
        assert_eq!(SpawnKind::from_variant(17), None);
        assert_eq!(SpawnKind::extract_pairs().len(), 5);
    }
}
