//! Sparse tile grid and collision queries
//!
//! Tiles live in a hash grid keyed by integer cell. Collision queries only
//! ever look at the 3×3 block of cells around a point, so their cost does
//! not depend on map size.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::TILE_SIZE;

/// Cell offsets scanned by neighborhood queries
const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
    IVec2::new(-1, 1),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
];

/// Tile kinds that take part in physics
pub const SOLID_TILE_KINDS: &[&str] = &["floor", "circus", "sand"];

/// A tile placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub kind: String,
    pub variant: u32,
    /// Grid cell (not pixels)
    pub pos: IVec2,
}

impl Tile {
    pub fn new(kind: impl Into<String>, variant: u32, pos: IVec2) -> Self {
        Self {
            kind: kind.into(),
            variant,
            pos,
        }
    }

    pub fn is_solid(&self) -> bool {
        SOLID_TILE_KINDS.contains(&self.kind.as_str())
    }

    /// Dictionary key used by level files ("x;y")
    pub fn key(&self) -> String {
        grid_key(self.pos)
    }
}

/// A decorative tile placed freely in world space (never collides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorTile {
    #[serde(rename = "type")]
    pub kind: String,
    pub variant: u32,
    /// World pixels
    pub pos: Vec2,
}

/// A spawner tile pulled out of the map, positioned in world pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub kind: String,
    pub variant: u32,
    pub pos: Vec2,
}

/// Format a grid cell as a level-file key
pub fn grid_key(cell: IVec2) -> String {
    format!("{};{}", cell.x, cell.y)
}

/// Parse a level-file key ("x;y") into a grid cell
pub fn parse_grid_key(key: &str) -> Option<IVec2> {
    let (x, y) = key.split_once(';')?;
    Some(IVec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Sparse map from grid cell to tile
#[derive(Debug, Clone)]
pub struct SpatialTileIndex {
    pub tile_size: i32,
    tiles: HashMap<IVec2, Tile>,
    pub decor: Vec<DecorTile>,
}

impl Default for SpatialTileIndex {
    fn default() -> Self {
        Self::new(TILE_SIZE)
    }
}

impl SpatialTileIndex {
    pub fn new(tile_size: i32) -> Self {
        Self {
            tile_size,
            tiles: HashMap::new(),
            decor: Vec::new(),
        }
    }

    /// Early random-fill map: one row of sand with ~10% holes
    pub fn random_holes(rng: &mut impl Rng) -> Self {
        let mut index = Self::new(TILE_SIZE);
        let hole_probability = 0.1;
        for i in 0..100 {
            if !rng.random_bool(hole_probability) {
                index.insert(Tile::new("sand", 0, IVec2::new(i, 14)));
            }
        }
        index
    }

    /// Place a tile, replacing whatever occupied its cell
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.pos, tile)
    }

    pub fn get(&self, cell: IVec2) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All grid tiles, in no particular order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Grid cell containing a world position
    pub fn cell_at(&self, world_pos: Vec2) -> IVec2 {
        let ts = self.tile_size as f32;
        IVec2::new(
            (world_pos.x / ts).floor() as i32,
            (world_pos.y / ts).floor() as i32,
        )
    }

    /// World-space rect covered by a grid cell
    pub fn cell_rect(&self, cell: IVec2) -> Rect {
        let ts = self.tile_size as f32;
        Rect::new(cell.x as f32 * ts, cell.y as f32 * ts, ts, ts)
    }

    /// Tiles in the 3×3 block of cells around a world position
    pub fn tiles_in_neighborhood(&self, world_pos: Vec2) -> Vec<&Tile> {
        let cell = self.cell_at(world_pos);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|offset| self.tiles.get(&(cell + *offset)))
            .collect()
    }

    /// Solid tiles around a world position as world-space rects
    pub fn solid_rects_in_neighborhood(&self, world_pos: Vec2) -> Vec<Rect> {
        self.tiles_in_neighborhood(world_pos)
            .into_iter()
            .filter(|tile| tile.is_solid())
            .map(|tile| self.cell_rect(tile.pos))
            .collect()
    }

    /// Solid tile in exactly the cell containing `world_pos`
    pub fn solid_tile_at(&self, world_pos: Vec2) -> Option<&Tile> {
        self.tiles
            .get(&self.cell_at(world_pos))
            .filter(|tile| tile.is_solid())
    }

    /// Remove every tile matching one of `(kind, variant)` and return them
    /// in world pixels. Grid tiles come first, ordered by row then column,
    /// followed by matching decorative tiles in file order.
    pub fn extract_and_remove(&mut self, pairs: &[(&str, u32)]) -> Vec<Placement> {
        let matches = |kind: &str, variant: u32| {
            pairs.iter().any(|(k, v)| *k == kind && *v == variant)
        };

        let mut cells: Vec<IVec2> = self
            .tiles
            .values()
            .filter(|tile| matches(&tile.kind, tile.variant))
            .map(|tile| tile.pos)
            .collect();
        cells.sort_by_key(|cell| (cell.y, cell.x));

        let ts = self.tile_size as f32;
        let mut placements = Vec::with_capacity(cells.len());
        for cell in cells {
            if let Some(tile) = self.tiles.remove(&cell) {
                placements.push(Placement {
                    kind: tile.kind,
                    variant: tile.variant,
                    pos: tile.pos.as_vec2() * ts,
                });
            }
        }

        let mut kept = Vec::with_capacity(self.decor.len());
        for tile in self.decor.drain(..) {
            if matches(&tile.kind, tile.variant) {
                placements.push(Placement {
                    kind: tile.kind,
                    variant: tile.variant,
                    pos: tile.pos,
                });
            } else {
                kept.push(tile);
            }
        }
        self.decor = kept;

        placements
    }
}
