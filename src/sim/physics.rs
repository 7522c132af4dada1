//! Ball integration
//!
//! Explicit Euler at the fixed tick, no substeps. Position is a height, and
//! velocity is subtracted, so a negative velocity moves the ball up.

use super::state::Ball;

/// Advance one tick under the given gravity
#[inline]
pub fn integrate(ball: &mut Ball, gravity: f32) {
    ball.vel += gravity;
    ball.y -= ball.vel;
}

/// Flap: replace the current velocity with the jump impulse
#[inline]
pub fn flap(ball: &mut Ball, impulse: f32) {
    ball.vel = impulse;
}
