//! Idle/demo controller
//!
//! Aims for the center of the next gap ahead of the ball (or the field center
//! when none is near) and flaps when it has fallen below that line.

use super::state::{GamePhase, GameState};

/// How far below the target the ball may sink before flapping
const FLAP_SLACK: f32 = 12.0;

/// Height the autopilot is steering toward
pub fn target_height(state: &GameState) -> f32 {
    let ball_left = state.tuning.ball_x - state.ball.radius;
    let width = state.tuning.obstacle_width;
    let gap_height = state.difficulty.gap_height;
    state
        .obstacles
        .iter()
        .find(|o| o.right_edge(width) >= ball_left)
        .map(|o| o.gap_center(gap_height))
        .unwrap_or_else(|| state.field_center())
}

/// Whether the autopilot wants to flap this tick
pub fn wants_flap(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let target = target_height(state);
    // Only flap while falling so one impulse is not spent repeatedly
    state.ball.vel > 0.0 && state.ball.y < target - FLAP_SLACK
}
