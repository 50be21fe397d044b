//! Physics bodies and shared entity state
//!
//! Movement is resolved one axis at a time against the solid tiles around
//! the body. Horizontal motion is applied and resolved fully before
//! vertical motion is applied.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tilemap::SpatialTileIndex;
use crate::consts::GRAVITY;

/// What an entity looks like (selects its animation clips)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Acrobat,
    Clown,
    Monkey,
    Coin,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Acrobat => "acrobat",
            EntityKind::Clown => "clown",
            EntityKind::Monkey => "monkey",
            EntityKind::Coin => "coin",
        }
    }
}

/// Animation action (pose)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Idle,
    Walking,
    Jump,
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Which sides of a body touched a solid tile during the last move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collisions {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Collisions {
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }
}

/// Frame counter for a sprite clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Ticks elapsed within the clip
    pub frame: u32,
    /// Ticks each image stays on screen
    pub frame_duration: u32,
    pub frame_count: u32,
    pub looping: bool,
    pub done: bool,
}

impl Animation {
    pub fn new(frame_count: u32, frame_duration: u32, looping: bool) -> Self {
        Self {
            frame: 0,
            frame_duration: frame_duration.max(1),
            frame_count: frame_count.max(1),
            looping,
            done: false,
        }
    }

    /// Clip used for an entity kind performing an action
    pub fn clip(kind: EntityKind, action: Action) -> Self {
        match (kind, action) {
            (EntityKind::Acrobat, _) => Self::new(4, 5, true),
            (EntityKind::Clown | EntityKind::Monkey, Action::Walking) => Self::new(4, 10, true),
            (_, _) => Self::new(4, 10, true),
        }
    }

    fn total_ticks(&self) -> u32 {
        self.frame_duration * self.frame_count
    }

    pub fn update(&mut self) {
        if self.looping {
            self.frame = (self.frame + 1) % self.total_ticks();
        } else {
            self.frame = (self.frame + 1).min(self.total_ticks() - 1);
            if self.frame >= self.total_ticks() - 1 {
                self.done = true;
            }
        }
    }

    /// Index of the image currently shown
    pub fn image_index(&self) -> u32 {
        self.frame / self.frame_duration
    }
}

/// Position/velocity state with tile collision resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub kind: EntityKind,
    /// Top-left corner in world pixels
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub collisions: Collisions,
    pub facing: Facing,
    pub action: Action,
    pub animation: Animation,
}

impl PhysicsBody {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            collisions: Collisions::default(),
            facing: Facing::Right,
            action: Action::Idle,
            animation: Animation::clip(kind, Action::Idle),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Switch pose; restarts the clip only when the pose changes
    pub fn set_action(&mut self, action: Action) {
        if action != self.action {
            self.action = action;
            self.animation = Animation::clip(self.kind, action);
        }
    }

    /// Advance one tick with the given movement intent
    pub fn update(&mut self, tilemap: &SpatialTileIndex, intent: Vec2) {
        let frame_delta = intent + self.vel;
        self.collisions = Collisions::default();

        self.move_horizontal(tilemap, frame_delta.x);
        self.move_vertical(tilemap, frame_delta.y);

        if intent.x > 0.0 {
            self.facing = Facing::Right;
        }
        if intent.x < 0.0 {
            self.facing = Facing::Left;
        }

        self.vel.y += GRAVITY;
        if self.collisions.bottom || self.collisions.top {
            self.vel.y = 0.0;
        }

        self.animation.update();
    }

    fn move_horizontal(&mut self, tilemap: &SpatialTileIndex, dx: f32) {
        self.pos.x += dx;
        let mut rect = self.rect();
        for tile in tilemap.solid_rects_in_neighborhood(self.pos) {
            if !rect.intersects(&tile) {
                continue;
            }
            if dx > 0.0 {
                rect.set_right(tile.left());
                self.collisions.right = true;
            }
            if dx < 0.0 {
                rect.set_left(tile.right());
                self.collisions.left = true;
            }
            self.pos.x = rect.x;
        }
    }

    fn move_vertical(&mut self, tilemap: &SpatialTileIndex, dy: f32) {
        self.pos.y += dy;
        let mut rect = self.rect();
        for tile in tilemap.solid_rects_in_neighborhood(self.pos) {
            if !rect.intersects(&tile) {
                continue;
            }
            if dy > 0.0 {
                rect.set_bottom(tile.top());
                self.collisions.bottom = true;
            }
            if dy < 0.0 {
                rect.set_top(tile.bottom());
                self.collisions.top = true;
            }
            self.pos.y = rect.y;
        }
        if dy >= 0.0 && !self.collisions.bottom && self.resting_on_ground(tilemap) {
            self.collisions.bottom = true;
        }
    }

    /// Bottom edge flush with the top of a solid tile, with horizontal
    /// overlap. Strict intersection never reports this case.
    fn resting_on_ground(&self, tilemap: &SpatialTileIndex) -> bool {
        let rect = self.rect();
        tilemap
            .solid_rects_in_neighborhood(self.pos)
            .into_iter()
            .any(|tile| {
                tile.top() == rect.bottom()
                    && rect.left() < tile.right()
                    && rect.right() > tile.left()
            })
    }
}

/// A pickup that only animates until the player grabs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectable {
    pub id: u32,
    pub body: PhysicsBody,
}

impl Collectable {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            body: PhysicsBody::new(kind, pos, size),
        }
    }

    pub fn update(&mut self) {
        self.body.animation.update();
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }
}
