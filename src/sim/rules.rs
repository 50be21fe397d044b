//! Cross-entity interaction rules
//!
//! - Player vs character: bounce, restore jumps
//! - Player vs collectable: consume, grant extra jumps
//! - Player vs balloon: score, recycle balloon

use rand::Rng;

use super::balloon::BalloonPool;
use super::character::Character;
use super::entity::Collectable;
use super::player::Player;

/// Bounce the player off every overlapping character.
/// Returns whether any bounce happened.
pub fn bounce_off_characters(player: &mut Player, characters: &[Character]) -> bool {
    let rect = player.rect();
    let mut bounced = false;
    for character in characters {
        if rect.intersects(&character.rect()) {
            player.bounce();
            bounced = true;
        }
    }
    bounced
}

/// Remove every collectable the player overlaps; returns their ids
pub fn collect_collectables(player: &Player, collectables: &mut Vec<Collectable>) -> Vec<u32> {
    let rect = player.rect();
    let mut taken = Vec::new();
    collectables.retain(|c| {
        if rect.intersects(&c.rect()) {
            taken.push(c.id);
            false
        } else {
            true
        }
    });
    taken
}

/// Pop every balloon touching the player. Popped balloons are recycled
/// off-screen. Returns the number popped.
pub fn pop_balloons(player: &Player, pool: &mut BalloonPool, rng: &mut impl Rng) -> u32 {
    let rect = player.rect();
    let mut popped = 0;
    let window = pool.window;
    for balloon in &mut pool.balloons {
        if balloon.rect().intersects(&rect) {
            balloon.recycle(window, rng);
            popped += 1;
        }
    }
    popped
}
