//! Pendulum trapezes
//!
//! A trapeze swings only while it carries a rider. While ridden it owns the
//! rider's position; on release it hands its tangential velocity back to
//! the rider's free-body motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::PhysicsBody;
use super::rect::Rect;
use crate::consts::*;

/// A simple pendulum hanging from a fixed anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trapeze {
    pub anchor: Vec2,
    pub arm_length: f32,
    pub bob_radius: f32,
    /// Radians, 0 = hanging straight down
    pub angle: f32,
    pub angular_velocity: f32,
    pub swinging: bool,
    /// Id of the entity riding this trapeze (non-owning)
    pub rider: Option<u32>,
    /// Tracked vertical accumulator; does not feed back into the swing
    pub vertical_velocity: f32,
}

impl Trapeze {
    pub fn new(anchor: Vec2, arm_length: f32, bob_radius: f32) -> Self {
        Self {
            anchor,
            arm_length,
            bob_radius,
            angle: TRAPEZE_START_ANGLE,
            angular_velocity: TRAPEZE_START_ANGULAR_VELOCITY,
            swinging: true,
            rider: None,
            vertical_velocity: 0.0,
        }
    }

    /// Center of the bob in world pixels
    pub fn bob_position(&self) -> Vec2 {
        self.anchor + self.arm_length * Vec2::new(self.angle.sin(), self.angle.cos())
    }

    /// Bounding box of the bob, used to detect grabs
    pub fn rect(&self) -> Rect {
        let bob = self.bob_position();
        Rect::new(
            bob.x - self.bob_radius,
            bob.y - self.bob_radius,
            self.bob_radius * 2.0,
            self.bob_radius * 2.0,
        )
    }

    pub fn has_rider(&self) -> bool {
        self.rider.is_some()
    }

    /// Attach a rider, carrying its horizontal momentum into the swing.
    /// Returns false (and changes nothing) if a different rider holds it.
    pub fn attach(&mut self, rider_id: u32, body: &PhysicsBody) -> bool {
        if self.rider.is_some_and(|id| id != rider_id) {
            return false;
        }
        self.rider = Some(rider_id);
        self.swinging = true;
        self.angular_velocity = body.vel.x * ATTACH_SWING_FACTOR;
        log::debug!(
            "Rider {} grabbed trapeze at ({:.0}, {:.0}), angular velocity {:.3}",
            rider_id,
            self.anchor.x,
            self.anchor.y,
            self.angular_velocity
        );
        true
    }

    /// Tangential velocity of the bob scaled by the release boost
    pub fn release_velocity(&self) -> Vec2 {
        let tangential = Vec2::new(
            self.arm_length * self.angular_velocity * self.angle.cos(),
            -self.arm_length * self.angular_velocity * self.angle.sin(),
        );
        tangential * RELEASE_BOOST
    }

    /// Release the rider, handing it the swing's velocity.
    /// Returns the released rider's id.
    pub fn detach(&mut self, body: &mut PhysicsBody) -> Option<u32> {
        let rider = self.rider.take()?;
        body.vel = self.release_velocity();
        self.swinging = false;
        log::debug!(
            "Rider {} released with velocity ({:.2}, {:.2})",
            rider,
            body.vel.x,
            body.vel.y
        );
        Some(rider)
    }

    /// Advance the swing and pin the rider to the bob.
    /// `body` must be the attached rider's body.
    pub fn update(&mut self, body: &mut PhysicsBody) {
        if !self.swinging || self.rider.is_none() {
            return;
        }
        self.integrate_swing();
        self.integrate_vertical(body);
        body.pos = self.bob_position() - body.size / 2.0;
    }

    fn integrate_swing(&mut self) {
        let angular_acceleration = -(PENDULUM_GRAVITY / self.arm_length) * self.angle.sin();
        self.angular_velocity =
            (self.angular_velocity + angular_acceleration).min(MAX_ANGULAR_VELOCITY);
        self.angle += self.angular_velocity.min(MAX_ANGLE_STEP);
    }

    fn integrate_vertical(&mut self, body: &PhysicsBody) {
        self.vertical_velocity = (self.vertical_velocity + TRAPEZE_VERTICAL_GRAVITY)
            .min(TRAPEZE_MAX_VERTICAL_VELOCITY);
        if body.collisions.bottom {
            self.vertical_velocity = 0.0;
        }
    }
}
