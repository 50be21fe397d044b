//! Dead-zone follow camera
//!
//! The scroll stays put while the player is inside the dead zone and snaps
//! by exactly the overshoot otherwise. No easing.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scroll: Vec2,
    pub viewport: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT))
    }
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport,
        }
    }

    /// Recompute the scroll so the target stays inside the dead zone
    pub fn follow(&mut self, target: &Rect) {
        let center = target.center();

        let right_edge = self.viewport.x * CAMERA_RIGHT_EDGE;
        if center.x > right_edge + self.scroll.x {
            self.scroll.x += center.x - right_edge - self.scroll.x;
        }
        let left_edge = self.viewport.x * CAMERA_LEFT_EDGE;
        if center.x < left_edge + self.scroll.x {
            self.scroll.x -= left_edge + self.scroll.x - center.x;
        }

        let bottom_edge = self.viewport.y * CAMERA_BOTTOM_EDGE;
        if center.y > bottom_edge + self.scroll.y {
            self.scroll.y += center.y - bottom_edge - self.scroll.y;
        }
        let top_edge = self.viewport.y * CAMERA_TOP_EDGE;
        if center.y < top_edge + self.scroll.y {
            self.scroll.y -= top_edge + self.scroll.y - center.y;
        }
    }

    /// Scroll truncated to whole pixels for drawing
    pub fn render_scroll(&self) -> IVec2 {
        IVec2::new(self.scroll.x as i32, self.scroll.y as i32)
    }
}
