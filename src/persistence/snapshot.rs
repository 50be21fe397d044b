use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::platform::SessionCommand;
use crate::sim::GameState;

/// Saved session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_x: f32,
    pub player_y: f32,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub record: u64,
}

impl Snapshot {
    /// Capture the player position and scores. The record always includes
    /// the current score.
    pub fn capture(state: &GameState) -> Self {
        Self {
            player_x: state.player.body.pos.x,
            player_y: state.player.body.pos.y,
            score: state.score,
            record: state.record.max(state.score),
        }
    }
}

impl GameState {
    /// Restore player position and scores from a snapshot
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.release_trapeze();
        self.player.body.pos = Vec2::new(snapshot.player_x, snapshot.player_y);
        self.player.body.vel = Vec2::ZERO;
        self.score = snapshot.score;
        self.record = self.record.max(snapshot.record);
        log::info!(
            "Restored snapshot at ({:.0}, {:.0}), score {}",
            snapshot.player_x,
            snapshot.player_y,
            snapshot.score
        );
    }
}

/// Read a snapshot; `None` if there is no usable save
pub fn load(path: &Path) -> Option<Snapshot> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No save found at {}", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("Could not read save {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("Ignoring unreadable save {}: {}", path.display(), e);
            None
        }
    }
}

/// Write a snapshot, replacing any previous save in the slot
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), SaveError> {
    let json = serde_json::to_string(snapshot)?;
    std::fs::write(path, json)?;
    log::info!("Saved snapshot to {}", path.display());
    Ok(())
}

/// Whether the session loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Stop,
}

/// Apply a session command against the save slot at `path`. The slot is
/// written when the loop stops, so quitting only ends the session here.
pub fn handle_command(state: &mut GameState, command: SessionCommand, path: &Path) -> CommandOutcome {
    match command {
        SessionCommand::Load => {
            match load(path) {
                Some(snapshot) => state.restore(&snapshot),
                None => log::info!("Nothing to load"),
            }
            CommandOutcome::Continue
        }
        SessionCommand::Confirm => CommandOutcome::Continue,
        SessionCommand::SaveAndQuit | SessionCommand::Quit => CommandOutcome::Stop,
    }
}
