//! Trapezirque - a circus side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tilemap, physics, trapezes, camera)
//! - `platform`: Abstract input surface
//! - `persistence`: Session snapshot save/load
//! - `settings`: Session configuration

pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{LevelError, SaveError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (no sub-stepping)
    pub const TICK_RATE: u32 = 60;

    /// Half-resolution display the simulation is authored against
    pub const DISPLAY_WIDTH: f32 = 320.0;
    pub const DISPLAY_HEIGHT: f32 = 240.0;

    /// Default grid cell size in world pixels
    pub const TILE_SIZE: i32 = 16;

    /// Downward acceleration applied to every physics body (px/tick²)
    pub const GRAVITY: f32 = 0.1;

    /// Player tuning
    pub const MAX_JUMPS: u32 = 2;
    pub const JUMP_VELOCITY: f32 = -3.0;
    /// Air time set by a jump so the jump pose engages immediately
    pub const JUMP_AIR_TIME: u32 = 5;
    pub const AIR_TIME_THRESHOLD: u32 = 4;
    pub const DAMPING_FACTOR: f32 = 0.98;
    /// Falling below this y ends the session
    pub const GAME_OVER_HEIGHT: f32 = 300.0;
    pub const BOUNCE_VELOCITY_X: f32 = 3.0;
    pub const BOUNCE_VELOCITY_Y: f32 = -2.0;
    /// Extra jumps granted by a collectable pickup
    pub const TRIPLE_JUMP_CHARGES: u32 = 5;

    /// Character wander AI
    pub const WANDER_CHANCE: f64 = 0.01;
    pub const MIN_WANDER_TICKS: u32 = 30;
    pub const MAX_WANDER_TICKS: u32 = 120;
    pub const LOOKAHEAD_X: f32 = 7.0;
    pub const LOOKAHEAD_Y: f32 = 23.0;
    pub const WANDER_NUDGE: f32 = 0.5;

    /// Pendulum trapeze
    pub const PENDULUM_GRAVITY: f32 = 0.3;
    pub const MAX_ANGULAR_VELOCITY: f32 = 0.1;
    pub const MAX_ANGLE_STEP: f32 = 0.3;
    pub const RELEASE_BOOST: f32 = 2.0;
    /// Rider horizontal velocity → initial angular velocity
    pub const ATTACH_SWING_FACTOR: f32 = 2.0;
    pub const TRAPEZE_START_ANGLE: f32 = 5.5;
    pub const TRAPEZE_START_ANGULAR_VELOCITY: f32 = -0.002;
    pub const TRAPEZE_ARM_LENGTH: f32 = 62.0;
    pub const TRAPEZE_BOB_RADIUS: f32 = 8.0;
    pub const TRAPEZE_VERTICAL_GRAVITY: f32 = 0.01;
    pub const TRAPEZE_MAX_VERTICAL_VELOCITY: f32 = 3.0;

    /// Balloons
    pub const BALLOON_SIZE: f32 = 16.0;
    pub const BALLOON_COUNT: usize = 3;
    /// Balloons further than this behind the player get recycled
    pub const BALLOON_TRAIL_DISTANCE: f32 = 165.0;

    /// Camera dead-zone edges as fractions of the viewport
    pub const CAMERA_LEFT_EDGE: f32 = 0.2;
    pub const CAMERA_RIGHT_EDGE: f32 = 0.5;
    pub const CAMERA_TOP_EDGE: f32 = 0.2;
    pub const CAMERA_BOTTOM_EDGE: f32 = 0.9;

    /// Entity sizes
    pub const PLAYER_SIZE: f32 = 16.0;
    pub const CHARACTER_SIZE: f32 = 16.0;
    pub const COLLECTABLE_SIZE: f32 = 16.0;
    /// Fallback spawn when a level has no player spawner
    pub const DEFAULT_PLAYER_SPAWN: (f32, f32) = (50.0, 208.0);
}
