//! Planar vector type and geometry helpers.
//!
//! All swarm geometry is 2-D single-precision.  `f32` keeps the published
//! snapshot arrays compact; the control laws tolerate far more error than
//! single-precision rounding introduces.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A 2-D vector (position, velocity, or acceleration).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Build from polar coordinates: radius `r` at angle `theta` (radians,
    /// measured counterclockwise from the +x axis).
    #[inline]
    pub fn from_polar(r: f32, theta: f32) -> Self {
        Self { x: r * theta.cos(), y: r * theta.sin() }
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).norm()
    }

    /// Angle of the vector from `self` to `other`, un-normalized
    /// (`atan2(dy, dx)`, so in `(-π, π]`).  Callers wrap into `[0, 2π)` or
    /// `[-π, π)` as their control law requires.
    #[inline]
    pub fn bearing_to(self, other: Vec2) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Clamp both components into `[-limit, limit]`.
    #[inline]
    pub fn clamp_axes(self, limit: f32) -> Vec2 {
        Vec2 {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
