//! Fixed timestep simulation tick
//!
//! Per-tick order: one-shot input → camera → balloons → player → trapezes →
//! characters/collectables → balloon pickups → fall check. Render consumes
//! the state afterwards.

use glam::Vec2;

use super::rules;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement flags
    pub move_left: bool,
    pub move_right: bool,
    /// One-shot: jump pressed this tick
    pub jump: bool,
    /// One-shot: grab key pressed this tick
    pub grab: bool,
    /// One-shot: grab key released this tick
    pub release: bool,
}

impl TickInput {
    /// Horizontal movement intent (-1, 0 or 1)
    pub fn intent(&self) -> Vec2 {
        let x = (self.move_right as i32 - self.move_left as i32) as f32;
        Vec2::new(x, 0.0)
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    if input.jump && state.player.jump() {
        state.events.push(GameEvent::Jumped);
    }
    if input.grab {
        if let Some(trapeze) = state.grab_trapeze() {
            state.events.push(GameEvent::TrapezeGrabbed { trapeze });
        }
    }
    if input.release {
        if let Some(trapeze) = state.release_trapeze() {
            state.events.push(GameEvent::TrapezeReleased { trapeze });
        }
    }

    state.camera.follow(&state.player.rect());

    let player_x = state.player.body.pos.x;
    state.balloons.update(player_x, &mut state.rng);

    state.player.update(
        &state.tilemap,
        input.intent(),
        &state.characters,
        &mut state.collectables,
        &mut state.events,
    );

    if let Some(index) = state.player.riding_trapeze {
        if let Some(trapeze) = state.trapezes.get_mut(index) {
            trapeze.update(&mut state.player.body);
        }
    }

    for character in &mut state.characters {
        character.update(&state.tilemap, &mut state.rng);
    }
    for collectable in &mut state.collectables {
        collectable.update();
    }

    let popped = rules::pop_balloons(&state.player, &mut state.balloons, &mut state.rng);
    for _ in 0..popped {
        state.score += 1;
        state.events.push(GameEvent::BalloonPopped);
    }

    state.time_ticks += 1;

    if state.player.check_fall() {
        state.finish();
    }
}
