//! Angle normalization helpers.
//!
//! Bearings come out of `atan2` in `(-π, π]`; the template-matching code
//! wants `[0, 2π)` and the attraction law wants `[-π, π)`.  Both wraps are
//! total functions over finite inputs.

use std::f32::consts::{PI, TAU};

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_to_2pi(angle: f32) -> f32 {
    let r = angle % TAU;
    if r < 0.0 { r + TAU } else { r }
}

/// Wrap an angle into `[-π, π)`.
#[inline]
pub fn wrap_to_pi(angle: f32) -> f32 {
    wrap_to_2pi(angle + PI) - PI
}
