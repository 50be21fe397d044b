//! Session state and core simulation types
//!
//! One `GameState` holds everything a running session needs: the tile index,
//! all entities, the camera, score and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::balloon::BalloonPool;
use super::camera::Camera;
use super::character::Character;
use super::entity::{Collectable, EntityKind};
use super::level::{LevelFile, SPAWNER_KIND, SpawnKind};
use super::player::Player;
use super::tilemap::SpatialTileIndex;
use super::trapeze::Trapeze;
use crate::consts::*;
use crate::error::LevelError;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// The acrobat fell; the session is over
    GameOver,
}

/// Discrete things that happened during a tick, for audio/UI layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    CharacterBounce,
    Collected { collectable_id: u32 },
    BalloonPopped,
    TrapezeGrabbed { trapeze: usize },
    TrapezeReleased { trapeze: usize },
    GameOver { score: u64 },
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tilemap: SpatialTileIndex,
    pub player: Player,
    /// Spawn order is iteration order
    pub characters: Vec<Character>,
    pub collectables: Vec<Collectable>,
    pub trapezes: Vec<Trapeze>,
    pub balloons: BalloonPool,
    pub camera: Camera,
    pub score: u64,
    /// Best score seen across sessions
    pub record: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

fn default_display() -> Vec2 {
    Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
}

impl GameState {
    /// Empty session on an existing tile index; the player starts at the
    /// default spawn point.
    pub fn new(tilemap: SpatialTileIndex, seed: u64, balloon_count: usize) -> Self {
        Self::with_display(tilemap, seed, balloon_count, default_display())
    }

    /// Like `new`, with the camera viewport and balloon window sized to
    /// `display` (world pixels)
    pub fn with_display(
        tilemap: SpatialTileIndex,
        seed: u64,
        balloon_count: usize,
        display: Vec2,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let balloons = BalloonPool::with_window(balloon_count, display, &mut rng);
        let (x, y) = DEFAULT_PLAYER_SPAWN;
        let mut state = Self {
            seed,
            rng,
            tilemap,
            player: Player::new(0, Vec2::new(x, y)),
            characters: Vec::new(),
            collectables: Vec::new(),
            trapezes: Vec::new(),
            balloons,
            camera: Camera::new(display),
            score: 0,
            record: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 0,
        };
        state.player.id = state.next_entity_id();
        state
    }

    /// Build a session from a level, consuming its spawner tiles
    pub fn from_level(level: LevelFile, seed: u64, balloon_count: usize) -> Result<Self, LevelError> {
        Self::from_level_with_display(level, seed, balloon_count, default_display())
    }

    pub fn from_level_with_display(
        level: LevelFile,
        seed: u64,
        balloon_count: usize,
        display: Vec2,
    ) -> Result<Self, LevelError> {
        let mut tilemap = level.into_index()?;
        let placements = tilemap.extract_and_remove(&SpawnKind::extract_pairs());
        let leftover = tilemap.tiles().filter(|t| t.kind == SPAWNER_KIND).count();
        if leftover > 0 {
            log::debug!("Ignoring {} spawner tiles with unknown variants", leftover);
        }

        let mut state = Self::with_display(tilemap, seed, balloon_count, display);
        let mut player_placed = false;
        for placement in placements {
            let Some(kind) = SpawnKind::from_variant(placement.variant) else {
                continue;
            };
            match kind {
                SpawnKind::Player => {
                    if player_placed {
                        log::debug!("Extra player spawner at {:?} ignored", placement.pos);
                    } else {
                        state.player.body.pos = placement.pos;
                        player_placed = true;
                    }
                }
                SpawnKind::Clown => state.spawn_character(EntityKind::Clown, placement.pos),
                SpawnKind::Monkey => state.spawn_character(EntityKind::Monkey, placement.pos),
                SpawnKind::Coin => state.spawn_collectable(EntityKind::Coin, placement.pos),
                SpawnKind::Trapeze => state.trapezes.push(Trapeze::new(
                    placement.pos,
                    TRAPEZE_ARM_LENGTH,
                    TRAPEZE_BOB_RADIUS,
                )),
            }
        }

        log::info!(
            "Session ready: {} characters, {} collectables, {} trapezes",
            state.characters.len(),
            state.collectables.len(),
            state.trapezes.len()
        );
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_character(&mut self, kind: EntityKind, pos: Vec2) {
        let id = self.next_entity_id();
        self.characters.push(Character::new(id, kind, pos));
    }

    pub fn spawn_collectable(&mut self, kind: EntityKind, pos: Vec2) {
        let id = self.next_entity_id();
        self.collectables
            .push(Collectable::new(id, kind, pos, Vec2::splat(COLLECTABLE_SIZE)));
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Grab the first free trapeze overlapping the player.
    /// Returns the trapeze index on success.
    pub fn grab_trapeze(&mut self) -> Option<usize> {
        if self.player.is_riding() {
            return None;
        }
        let rect = self.player.rect();
        let index = self
            .trapezes
            .iter()
            .position(|t| !t.has_rider() && t.rect().intersects(&rect))?;
        if !self.trapezes[index].attach(self.player.id, &self.player.body) {
            return None;
        }
        self.player.riding_trapeze = Some(index);
        Some(index)
    }

    /// Let go of the ridden trapeze. Returns its index.
    pub fn release_trapeze(&mut self) -> Option<usize> {
        let index = self.player.riding_trapeze?;
        self.player.leave_trapeze();
        self.trapezes.get_mut(index)?.detach(&mut self.player.body)?;
        Some(index)
    }

    /// End the session and fold the score into the record
    pub fn finish(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.record = self.record.max(self.score);
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over after {} ticks: score {}, record {}",
            self.time_ticks,
            self.score,
            self.record
        );
    }
}
