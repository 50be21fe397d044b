//! Wandering circus characters (clowns, monkeys)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Action, EntityKind, PhysicsBody};
use super::rect::Rect;
use super::tilemap::SpatialTileIndex;
use crate::consts::*;

/// An autonomous character that wanders along platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub body: PhysicsBody,
    /// Ticks left in the current wander episode (0 = standing)
    pub wander_ticks_remaining: u32,
}

impl Character {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id,
            body: PhysicsBody::new(kind, pos, Vec2::splat(CHARACTER_SIZE)),
            wander_ticks_remaining: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_wandering(&self) -> bool {
        self.wander_ticks_remaining > 0
    }

    /// Point just ahead of and below the body used to sense ground
    pub fn lookahead_point(&self) -> Vec2 {
        Vec2::new(
            self.rect().center().x + LOOKAHEAD_X * self.body.facing.sign(),
            self.body.pos.y + LOOKAHEAD_Y,
        )
    }

    pub fn update(&mut self, tilemap: &SpatialTileIndex, rng: &mut impl Rng) {
        let intent = self.wander_intent(tilemap, rng, Vec2::ZERO);
        self.body.update(tilemap, intent);
        if intent.x == 0.0 {
            self.body.set_action(Action::Idle);
        } else {
            self.body.set_action(Action::Walking);
        }
    }

    /// Adjust the movement intent for this tick according to the wander
    /// state, possibly starting a new episode.
    fn wander_intent(
        &mut self,
        tilemap: &SpatialTileIndex,
        rng: &mut impl Rng,
        mut intent: Vec2,
    ) -> Vec2 {
        if self.is_wandering() {
            if tilemap.solid_tile_at(self.lookahead_point()).is_some() {
                if self.body.collisions.horizontal() {
                    self.body.facing = self.body.facing.flipped();
                } else {
                    intent.x += WANDER_NUDGE * self.body.facing.sign();
                }
            } else {
                // Platform edge ahead
                self.body.facing = self.body.facing.flipped();
            }
            self.wander_ticks_remaining -= 1;
        } else if rng.random_bool(WANDER_CHANCE) {
            self.wander_ticks_remaining = rng.random_range(MIN_WANDER_TICKS..=MAX_WANDER_TICKS);
        }
        intent
    }
}
