//! Drifting score balloons
//!
//! Balloons are a fixed recyclable pool: instead of being destroyed they are
//! moved back off-screen to the right whenever they leave the play window or
//! get popped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// A single balloon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Image index (color) chosen at spawn
    pub variant: u32,
}

impl Balloon {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Move the balloon back in off the right edge of `window` at a random
    /// height
    pub fn recycle(&mut self, window: Vec2, rng: &mut impl Rng) {
        self.pos.x += window.x + rng.random_range(10..50) as f32;
        self.pos.y = rng.random_range(0..(window.y as i32).max(1)) as f32;
    }
}

/// The balloon pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalloonPool {
    pub balloons: Vec<Balloon>,
    /// Display window balloons spawn in and recycle into
    pub window: Vec2,
}

impl Default for BalloonPool {
    fn default() -> Self {
        Self {
            balloons: Vec::new(),
            window: Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        }
    }
}

impl BalloonPool {
    pub const VARIANTS: u32 = 4;

    /// Pool sized for the default half-resolution display
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        Self::with_window(count, Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT), rng)
    }

    pub fn with_window(count: usize, window: Vec2, rng: &mut impl Rng) -> Self {
        let width = (window.x as i32).max(1);
        let height = (window.y as i32).max(1);
        let balloons = (0..count)
            .map(|_| Balloon {
                pos: Vec2::new(
                    rng.random_range(0..width) as f32,
                    rng.random_range(0..height) as f32,
                ),
                vel: Vec2::new(
                    -(rng.random::<f32>() * 0.05 + 0.05),
                    -(rng.random::<f32>() * 0.05 + 0.15),
                ),
                size: BALLOON_SIZE,
                variant: rng.random_range(0..Self::VARIANTS),
            })
            .collect();
        Self { balloons, window }
    }

    pub fn len(&self) -> usize {
        self.balloons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balloons.is_empty()
    }

    /// Drift every balloon and recycle the ones that fell off the left edge
    /// or too far behind the player
    pub fn update(&mut self, player_x: f32, rng: &mut impl Rng) {
        let window = self.window;
        for balloon in &mut self.balloons {
            balloon.update();
            if balloon.pos.x < 0.0 || player_x - balloon.pos.x > BALLOON_TRAIL_DISTANCE {
                balloon.recycle(window, rng);
                log::debug!("Balloon recycled to ({:.0}, {:.0})", balloon.pos.x, balloon.pos.y);
            }
        }
    }
}
