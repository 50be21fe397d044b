//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (no sub-stepping)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod balloon;
pub mod camera;
pub mod character;
pub mod entity;
pub mod level;
pub mod player;
pub mod rect;
pub mod rules;
pub mod state;
pub mod tick;
pub mod tilemap;
pub mod trapeze;
pub mod view;

pub use balloon::{Balloon, BalloonPool};
pub use camera::Camera;
pub use character::Character;
pub use entity::{Action, Animation, Collectable, Collisions, EntityKind, Facing, PhysicsBody};
pub use level::{LevelFile, SpawnKind};
pub use player::Player;
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use tilemap::{DecorTile, Placement, SpatialTileIndex, Tile};
pub use trapeze::Trapeze;
pub use view::FrameView;
