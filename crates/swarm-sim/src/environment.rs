//! Environment entities.
//!
//! Walls are simple second-order kinematic objects: a spring term pulls
//! their velocity toward zero, so a wall nudged at construction settles into
//! place over the first ticks of the run.  They are stepped by the clock
//! thread only and never shared with agent workers, so they sit entirely
//! outside the barrier protocol.

use swarm_core::Vec2;

/// Default spring constant of the velocity damper.
const DEFAULT_STIFFNESS: f32 = 15.0;

/// A slowly-settling obstacle with spring-damper kinematics.
#[derive(Debug, Clone)]
pub struct Wall {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    stiffness: f32,
    dt: f32,
}

impl Wall {
    /// A wall at rest at `position`, integrating with step `dt`.
    pub fn new(position: Vec2, dt: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            stiffness: DEFAULT_STIFFNESS,
            dt,
        }
    }

    /// A wall with an initial velocity, for spawn-and-settle placement.
    pub fn with_velocity(position: Vec2, velocity: Vec2, dt: f32) -> Self {
        Self { velocity, ..Self::new(position, dt) }
    }

    /// One integration step: spring acceleration toward zero velocity,
    /// velocity from acceleration, position with a second-order correction.
    pub fn step(&mut self) {
        let dt = self.dt;
        self.acceleration = -self.velocity * self.stiffness;
        self.velocity = self.acceleration * dt;
        self.position += self.velocity * dt + self.acceleration * (0.5 * dt * dt);
    }
}
