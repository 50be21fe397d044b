//! Sessions built from the bundled circus level

use std::path::PathBuf;

use glam::Vec2;
use trapezirque::LevelError;
use trapezirque::persistence::{self, Snapshot};
use trapezirque::sim::{EntityKind, FrameView, GameEvent, GameState, LevelFile, TickInput, tick};

fn circus_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels/circus.json")
}

fn circus_session(seed: u64) -> GameState {
    let level = LevelFile::load(&circus_path()).unwrap();
    GameState::from_level(level, seed, 3).unwrap()
}

/// Walk right, hop every 40 ticks
fn scripted(t: usize) -> TickInput {
    TickInput {
        move_right: true,
        jump: t % 40 == 0,
        ..Default::default()
    }
}

#[test]
fn test_circus_level_spawns() {
    let state = circus_session(1);
    assert_eq!(state.player.body.pos, Vec2::new(48.0, 208.0));

    let kinds: Vec<EntityKind> = state.characters.iter().map(|c| c.body.kind).collect();
    assert_eq!(kinds, vec![EntityKind::Clown, EntityKind::Monkey]);
    assert_eq!(state.collectables.len(), 2);
    assert_eq!(state.trapezes.len(), 2);
    assert_eq!(state.balloons.len(), 3);
    assert!(state.tilemap.tiles().all(|t| t.kind != "spawners"));
    assert_eq!(state.tilemap.decor.len(), 4);
}

#[test]
fn test_frame_view_of_circus_level() {
    let state = circus_session(1);
    let view = FrameView::capture(&state);
    assert_eq!(view.tiles.len(), state.tilemap.len() + state.tilemap.decor.len());
    assert!(view.tiles.iter().all(|t| t.kind != "spawners"));
    assert_eq!(view.trapezes.len(), 2);
    assert_eq!(view.scroll.x, 0);
}

#[test]
fn test_same_seed_same_run() {
    let mut a = circus_session(77);
    let mut b = circus_session(77);
    for t in 0..900 {
        let input = scripted(t);
        tick(&mut a, &input);
        tick(&mut b, &input);
        assert_eq!(a.events, b.events);
    }
    assert_eq!(a.player, b.player);
    assert_eq!(a.characters, b.characters);
    assert_eq!(a.balloons, b.balloons);
    assert_eq!(a.camera, b.camera);
    assert_eq!(a.score, b.score);
    assert_eq!(a.phase, b.phase);
}

#[test]
fn test_run_invariants_hold() {
    let mut state = circus_session(5);
    for t in 0..900 {
        tick(&mut state, &scripted(t));
        let player = &state.player;
        // A bounce launches the player off the ground after the move
        let bounced = state.events.contains(&GameEvent::CharacterBounce);
        if player.body.collisions.bottom && !bounced {
            assert_eq!(player.body.vel.y, 0.0);
        }
        assert!(player.jump_charges <= trapezirque::consts::MAX_JUMPS);
        for character in &state.characters {
            if character.body.collisions.bottom {
                assert_eq!(character.body.vel.y, 0.0);
            }
        }
        if state.is_over() {
            break;
        }
    }
}

#[test]
fn test_snapshot_of_a_played_session() {
    let mut state = circus_session(3);
    for t in 0..120 {
        tick(&mut state, &scripted(t));
    }
    let path = std::env::temp_dir().join(format!("trapezirque-session-{}.json", std::process::id()));
    persistence::save(&path, &Snapshot::capture(&state)).unwrap();

    let mut fresh = circus_session(3);
    let snapshot = persistence::load(&path).unwrap();
    fresh.restore(&snapshot);
    assert_eq!(fresh.player.body.pos, state.player.body.pos);
    assert_eq!(fresh.score, state.score);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_bad_level_files() {
    assert!(matches!(
        LevelFile::load(&PathBuf::from("levels/no-such-level.json")),
        Err(LevelError::Io(_))
    ));

    let bad_key = LevelFile::from_json(
        r#"{"tile_size": 16, "tilemap": {"three;four": {"type": "floor", "variant": 0, "pos": [3, 4]}}}"#,
    )
    .unwrap();
    assert!(matches!(
        GameState::from_level(bad_key, 1, 0),
        Err(LevelError::InvalidTileKey(_))
    ));

    assert!(matches!(
        LevelFile::from_json("{ not json"),
        Err(LevelError::Json(_))
    ));
}
