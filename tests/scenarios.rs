//! Movement, camera and trapeze scenarios driven through the public API

use glam::{IVec2, Vec2};
use trapezirque::consts::DAMPING_FACTOR;
use trapezirque::sim::{
    Camera, EntityKind, GameEvent, GameState, PhysicsBody, Rect, SpatialTileIndex, TickInput,
    Tile, Trapeze, tick,
};

fn row(y: i32, xs: std::ops::Range<i32>) -> SpatialTileIndex {
    let mut tilemap = SpatialTileIndex::new(16);
    for x in xs {
        tilemap.insert(Tile::new("floor", 0, IVec2::new(x, y)));
    }
    tilemap
}

#[test]
fn test_simple_fall_onto_ground() {
    let tilemap = row(10, -2..4);
    let mut body = PhysicsBody::new(EntityKind::Acrobat, Vec2::new(0.0, -50.0), Vec2::splat(16.0));

    for _ in 0..200 {
        body.update(&tilemap, Vec2::ZERO);
    }

    assert_eq!(body.rect().bottom(), 160.0);
    assert!(body.collisions.bottom);
    assert_eq!(body.vel.y, 0.0);

    // Stays put once landed
    for _ in 0..10 {
        body.update(&tilemap, Vec2::ZERO);
        assert_eq!(body.rect().bottom(), 160.0);
        assert!(body.collisions.bottom);
    }
}

#[test]
fn test_bottom_contact_always_stops_vertical_velocity() {
    let tilemap = row(10, -2..4);
    let mut body = PhysicsBody::new(EntityKind::Clown, Vec2::new(8.0, 0.0), Vec2::splat(16.0));
    for _ in 0..300 {
        body.update(&tilemap, Vec2::ZERO);
        if body.collisions.bottom {
            assert_eq!(body.vel.y, 0.0);
        }
    }
}

#[test]
fn test_wall_stop() {
    let mut tilemap = row(10, -2..10);
    tilemap.insert(Tile::new("circus", 0, IVec2::new(5, 9)));
    let mut body = PhysicsBody::new(EntityKind::Acrobat, Vec2::new(63.5, 144.0), Vec2::splat(16.0));

    body.update(&tilemap, Vec2::new(1.0, 0.0));
    assert!(body.pos.x <= 5.0 * 16.0 - 16.0);
    assert!(body.collisions.right);
    assert!(!body.collisions.left);

    // Pushing on keeps it pinned
    for _ in 0..20 {
        body.update(&tilemap, Vec2::new(1.0, 0.0));
    }
    assert_eq!(body.pos.x, 64.0);
    assert_eq!(body.pos.y, 144.0);
}

#[test]
fn test_camera_dead_zone() {
    let mut camera = Camera::default();
    camera.scroll = Vec2::new(40.0, 0.0);

    // Center at scroll-relative x=100
    camera.follow(&Rect::new(132.0, 100.0, 16.0, 16.0));
    assert_eq!(camera.scroll.x, 40.0);

    // Past the right edge: scroll snaps by the overshoot
    camera.follow(&Rect::new(200.0, 100.0, 16.0, 16.0));
    assert_eq!(camera.scroll.x, 208.0 - 160.0);

    // Past the left edge
    camera.follow(&Rect::new(60.0, 100.0, 16.0, 16.0));
    assert_eq!(camera.scroll.x, 68.0 - 64.0);
}

#[test]
fn test_trapeze_grab_swing_release() {
    let tilemap = row(14, -5..40);
    let mut state = GameState::new(tilemap, 9, 0);
    state
        .trapezes
        .push(Trapeze::new(Vec2::new(200.0, 40.0), 62.0, 8.0));

    let bob = state.trapezes[0].bob_position();
    state.player.body.pos = bob - Vec2::splat(8.0);

    let grab = TickInput {
        grab: true,
        ..Default::default()
    };
    tick(&mut state, &grab);
    assert!(state.events.contains(&GameEvent::TrapezeGrabbed { trapeze: 0 }));
    assert!(state.player.is_riding());

    let start_angle = state.trapezes[0].angle;
    for _ in 0..20 {
        tick(&mut state, &TickInput::default());
        let center = state.player.rect().center();
        assert!(center.distance(state.trapezes[0].bob_position()) < 1e-3);
    }
    assert_ne!(state.trapezes[0].angle, start_angle);

    let expected = state.trapezes[0].release_velocity();
    let release = TickInput {
        release: true,
        ..Default::default()
    };
    tick(&mut state, &release);
    assert!(state.events.contains(&GameEvent::TrapezeReleased { trapeze: 0 }));
    assert!(!state.player.is_riding());
    assert!(!state.trapezes[0].has_rider());
    assert!(!state.trapezes[0].swinging);
    // Release velocity carries over, then one tick of damping
    assert!((state.player.body.vel.x - expected.x * DAMPING_FACTOR).abs() < 1e-5);
}

fn ride_for(tilemap: SpatialTileIndex, ticks: usize) -> GameState {
    let mut state = GameState::new(tilemap, 4, 0);
    state
        .trapezes
        .push(Trapeze::new(Vec2::new(200.0, 40.0), 62.0, 8.0));
    state.player.body.pos = state.trapezes[0].bob_position() - Vec2::splat(8.0);
    state.player.jump_charges = 1;
    state.player.air_time = 3;

    let grab = TickInput {
        grab: true,
        ..Default::default()
    };
    tick(&mut state, &grab);
    assert!(state.player.is_riding());

    for _ in 0..ticks {
        tick(&mut state, &TickInput::default());
    }
    state
}

fn assert_still_riding(state: &GameState) {
    assert!(!state.is_over());
    assert!(state.player.is_riding());
    assert_eq!(state.player.jump_charges, 1);
    assert_eq!(state.player.air_time, 3);
    let center = state.player.rect().center();
    assert!(center.distance(state.trapezes[0].bob_position()) < 1e-3);
}

#[test]
fn test_long_ride_over_empty_map() {
    let state = ride_for(SpatialTileIndex::new(16), 5000);
    assert_still_riding(&state);
    assert_eq!(state.player.body.vel.y, 0.0);
}

#[test]
fn test_long_ride_over_floor() {
    // Lowest bob point leaves the rider just above this row
    let state = ride_for(row(7, -5..40), 5000);
    assert_still_riding(&state);
    assert!(!state.player.body.collisions.bottom);
}

#[test]
fn test_release_without_trapeze_is_ignored() {
    let mut state = GameState::new(row(14, -5..40), 9, 0);
    let release = TickInput {
        release: true,
        ..Default::default()
    };
    tick(&mut state, &release);
    assert!(state.events.is_empty());
}
