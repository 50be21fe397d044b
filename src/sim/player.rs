//! The player-controlled acrobat

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::entity::{Action, Collectable, EntityKind, PhysicsBody};
use super::rect::Rect;
use super::rules;
use super::state::GameEvent;
use super::tilemap::SpatialTileIndex;
use crate::consts::*;

/// The acrobat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: PhysicsBody,
    /// Base jumps left before touching ground again (0..=MAX_JUMPS)
    pub jump_charges: u32,
    /// Upgrade pool spent before base charges
    pub extra_jump_charges: u32,
    /// Ticks since last ground contact
    pub air_time: u32,
    /// Index of the trapeze being ridden (non-owning)
    pub riding_trapeze: Option<usize>,
    /// Set once the acrobat has dropped below the stage
    pub fallen: bool,
}

impl Player {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            body: PhysicsBody::new(
                EntityKind::Acrobat,
                pos,
                Vec2::splat(PLAYER_SIZE),
            ),
            jump_charges: MAX_JUMPS,
            extra_jump_charges: 0,
            air_time: 0,
            riding_trapeze: None,
            fallen: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_riding(&self) -> bool {
        self.riding_trapeze.is_some()
    }

    /// Advance one tick. Characters bounce the player, touched
    /// collectables are consumed from `collectables`.
    pub fn update(
        &mut self,
        tilemap: &SpatialTileIndex,
        intent: Vec2,
        characters: &[Character],
        collectables: &mut Vec<Collectable>,
        events: &mut Vec<GameEvent>,
    ) {
        if self.is_riding() {
            // The trapeze owns the position: no gravity, no tile movement
            self.body.set_action(Action::Jump);
            self.body.animation.update();
            for collectable_id in rules::collect_collectables(self, collectables) {
                self.grant_triple_jump();
                events.push(GameEvent::Collected { collectable_id });
            }
            return;
        }

        self.body.update(tilemap, intent);
        self.air_time += 1;

        if rules::bounce_off_characters(self, characters) {
            events.push(GameEvent::CharacterBounce);
        }
        for collectable_id in rules::collect_collectables(self, collectables) {
            self.grant_triple_jump();
            events.push(GameEvent::Collected { collectable_id });
        }

        if self.body.collisions.bottom {
            self.air_time = 0;
            self.jump_charges = MAX_JUMPS;
        }

        self.body.vel.x *= DAMPING_FACTOR;
        self.select_action(intent);
    }

    fn select_action(&mut self, intent: Vec2) {
        if self.air_time > AIR_TIME_THRESHOLD {
            self.body.set_action(Action::Jump);
        } else if intent.x == 0.0 {
            self.body.set_action(Action::Idle);
            self.body.vel.x = 0.0;
        } else {
            self.body.set_action(Action::Walking);
        }
    }

    /// Mark the acrobat fallen once it drops below the stage. Runs after
    /// every position write for the tick, trapeze included.
    pub fn check_fall(&mut self) -> bool {
        if self.body.pos.y > GAME_OVER_HEIGHT && !self.fallen {
            self.fallen = true;
            log::info!("Acrobat fell at x={:.1}", self.body.pos.x);
        }
        self.fallen
    }

    /// Let go of a trapeze: airborne from the first free tick
    pub fn leave_trapeze(&mut self) {
        self.riding_trapeze = None;
        self.air_time = self.air_time.max(JUMP_AIR_TIME);
    }

    /// Knock the player back from a character; restores base jumps
    pub fn bounce(&mut self) {
        self.jump_charges = MAX_JUMPS;
        self.body.vel.x = -self.body.facing.sign() * BOUNCE_VELOCITY_X;
        self.body.vel.y = BOUNCE_VELOCITY_Y;
    }

    pub fn grant_triple_jump(&mut self) {
        self.extra_jump_charges = TRIPLE_JUMP_CHARGES;
    }

    /// Jump if a charge is available. Returns whether a jump happened.
    pub fn jump(&mut self) -> bool {
        if self.extra_jump_charges > 0 {
            self.extra_jump_charges -= 1;
        } else if self.jump_charges > 0 {
            self.jump_charges -= 1;
        } else {
            return false;
        }
        self.body.vel.y = JUMP_VELOCITY;
        self.air_time = JUMP_AIR_TIME;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Facing;
    use crate::sim::tilemap::Tile;
    use glam::IVec2;

    fn ground() -> SpatialTileIndex {
        let mut index = SpatialTileIndex::new(16);
        for x in -4..20 {
            index.insert(Tile::new("floor", 0, IVec2::new(x, 10)));
        }
        index
    }

    fn step(player: &mut Player, tilemap: &SpatialTileIndex, intent: Vec2) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut collectables = Vec::new();
        player.update(tilemap, intent, &[], &mut collectables, &mut events);
        events
    }

    #[test]
    fn test_jump_charges_never_go_negative() {
        let mut player = Player::new(1, Vec2::new(0.0, -100.0));
        assert!(player.jump());
        assert!(player.jump());
        assert!(!player.jump());
        assert_eq!(player.jump_charges, 0);
        assert_eq!(player.body.vel.y, JUMP_VELOCITY);
        assert_eq!(player.air_time, JUMP_AIR_TIME);
    }

    #[test]
    fn test_extra_charges_are_spent_first() {
        let mut player = Player::new(1, Vec2::ZERO);
        player.grant_triple_jump();
        for _ in 0..TRIPLE_JUMP_CHARGES {
            assert!(player.jump());
        }
        assert_eq!(player.jump_charges, MAX_JUMPS);
        assert!(player.jump());
        assert_eq!(player.jump_charges, MAX_JUMPS - 1);
    }

    #[test]
    fn test_landing_restores_jumps() {
        let tilemap = ground();
        let mut player = Player::new(1, Vec2::new(0.0, 140.0));
        player.jump_charges = 0;
        for _ in 0..30 {
            step(&mut player, &tilemap, Vec2::ZERO);
            if player.body.collisions.bottom {
                break;
            }
        }
        assert!(player.body.collisions.bottom);
        assert_eq!(player.jump_charges, MAX_JUMPS);
        assert_eq!(player.air_time, 0);
    }

    #[test]
    fn test_idle_snaps_horizontal_velocity() {
        let tilemap = ground();
        let mut player = Player::new(1, Vec2::new(0.0, 144.0));
        player.body.vel.x = 2.0;
        step(&mut player, &tilemap, Vec2::new(1.0, 0.0));
        assert!((player.body.vel.x - 2.0 * DAMPING_FACTOR).abs() < 1e-6);
        assert_eq!(player.body.action, Action::Walking);
        step(&mut player, &tilemap, Vec2::ZERO);
        assert_eq!(player.body.vel.x, 0.0);
        assert_eq!(player.body.action, Action::Idle);
    }

    #[test]
    fn test_long_airtime_selects_jump_pose() {
        let tilemap = SpatialTileIndex::new(16);
        let mut player = Player::new(1, Vec2::ZERO);
        for _ in 0..AIR_TIME_THRESHOLD + 1 {
            step(&mut player, &tilemap, Vec2::ZERO);
        }
        assert_eq!(player.body.action, Action::Jump);
    }

    #[test]
    fn test_bounce_pushes_away_from_facing() {
        let mut player = Player::new(1, Vec2::ZERO);
        player.jump_charges = 0;
        player.body.facing = Facing::Right;
        player.bounce();
        assert_eq!(player.body.vel, Vec2::new(-BOUNCE_VELOCITY_X, BOUNCE_VELOCITY_Y));
        assert_eq!(player.jump_charges, MAX_JUMPS);

        player.body.facing = Facing::Left;
        player.bounce();
        assert_eq!(player.body.vel.x, BOUNCE_VELOCITY_X);
    }

    #[test]
    fn test_falling_past_threshold_marks_fallen() {
        let tilemap = SpatialTileIndex::new(16);
        let mut player = Player::new(1, Vec2::new(0.0, GAME_OVER_HEIGHT - 0.5));
        player.body.vel.y = 1.0;
        step(&mut player, &tilemap, Vec2::ZERO);
        assert!(player.check_fall());
        assert!(player.fallen);
    }

    #[test]
    fn test_riding_player_ignores_gravity_and_tiles() {
        let tilemap = ground();
        let mut player = Player::new(1, Vec2::new(0.0, 100.0));
        player.riding_trapeze = Some(0);
        player.jump_charges = 1;
        player.air_time = 7;
        for _ in 0..5000 {
            step(&mut player, &tilemap, Vec2::new(1.0, 0.0));
        }
        assert_eq!(player.body.pos, Vec2::new(0.0, 100.0));
        assert_eq!(player.body.vel, Vec2::ZERO);
        assert_eq!(player.jump_charges, 1);
        assert_eq!(player.air_time, 7);
        assert!(!player.check_fall());
        assert_eq!(player.body.action, Action::Jump);
    }

    #[test]
    fn test_leaving_trapeze_starts_airborne() {
        let mut player = Player::new(1, Vec2::ZERO);
        player.riding_trapeze = Some(2);
        player.leave_trapeze();
        assert!(!player.is_riding());
        assert_eq!(player.air_time, JUMP_AIR_TIME);
    }
}
