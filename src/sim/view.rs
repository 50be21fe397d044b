//! Render snapshot
//!
//! Copies what an external renderer needs out of the session once per tick:
//! final positions, poses and the integer scroll. Spawner tiles are never
//! included.

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::entity::{Action, EntityKind, Facing, PhysicsBody};
use super::level::SPAWNER_KIND;
use super::state::GameState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub action: Action,
    pub image: u32,
    pub facing: Facing,
}

impl SpriteView {
    fn of(body: &PhysicsBody) -> Self {
        Self {
            kind: body.kind,
            pos: body.pos,
            action: body.action,
            image: body.animation.image_index(),
            facing: body.facing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileView {
    pub kind: String,
    pub variant: u32,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrapezeView {
    pub anchor: Vec2,
    pub bob: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalloonView {
    pub pos: Vec2,
    pub variant: u32,
}

/// Everything needed to draw one frame, in world pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub scroll: IVec2,
    pub tiles: Vec<TileView>,
    pub player: SpriteView,
    pub characters: Vec<SpriteView>,
    pub collectables: Vec<SpriteView>,
    pub trapezes: Vec<TrapezeView>,
    pub balloons: Vec<BalloonView>,
    pub score: u64,
    pub game_over: bool,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let tilemap = &state.tilemap;
        let ts = tilemap.tile_size as f32;

        let mut tiles: Vec<TileView> = tilemap
            .decor
            .iter()
            .filter(|t| t.kind != SPAWNER_KIND)
            .map(|t| TileView {
                kind: t.kind.clone(),
                variant: t.variant,
                pos: t.pos,
            })
            .collect();
        let mut grid: Vec<TileView> = tilemap
            .tiles()
            .filter(|t| t.kind != SPAWNER_KIND)
            .map(|t| TileView {
                kind: t.kind.clone(),
                variant: t.variant,
                pos: t.pos.as_vec2() * ts,
            })
            .collect();
        // Hash order is not stable between runs
        grid.sort_by(|a, b| {
            (a.pos.y, a.pos.x)
                .partial_cmp(&(b.pos.y, b.pos.x))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        tiles.extend(grid);

        Self {
            scroll: state.camera.render_scroll(),
            tiles,
            player: SpriteView::of(&state.player.body),
            characters: state.characters.iter().map(|c| SpriteView::of(&c.body)).collect(),
            collectables: state
                .collectables
                .iter()
                .map(|c| SpriteView::of(&c.body))
                .collect(),
            trapezes: state
                .trapezes
                .iter()
                .map(|t| TrapezeView {
                    anchor: t.anchor,
                    bob: t.bob_position(),
                    radius: t.bob_radius,
                })
                .collect(),
            balloons: state
                .balloons
                .balloons
                .iter()
                .map(|b| BalloonView {
                    pos: b.pos,
                    variant: b.variant,
                })
                .collect(),
            score: state.score,
            game_over: state.is_over(),
        }
    }
}
