//! Fixed timestep simulation tick
//!
//! Core update that advances a run by one tick. It does nothing unless the
//! game is playing, and it never schedules itself.

use super::state::{GameEvent, GamePhase, GameState, LifeLossCause};
use super::{collision, difficulty, obstacles, physics, powerups};

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Timers
    if state.ball.invincible_ticks > 0 {
        state.ball.invincible_ticks -= 1;
    }
    powerups::tick_effect(state);

    physics::integrate(&mut state.ball, state.difficulty.gravity);
    difficulty::update(state);

    if obstacles::advance_spawn_timer(state) {
        obstacles::spawn_obstacle(state);
        powerups::maybe_spawn(state);
    }
    obstacles::scroll_obstacles(state);
    powerups::advance(state);

    let outcome = collision::resolve(state);
    if let Some(cause) = outcome.fatal {
        lose_life(state, cause);
    }
}

/// Take one life. Either ends the run or respawns the ball at the center with
/// a short invincibility window and clears the obstacles near it.
pub fn lose_life(state: &mut GameState, cause: LifeLossCause) {
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        let new_best = state.score > state.best_score;
        if new_best {
            state.best_score = state.score;
        }
        log::info!(
            "Game over in {} mode: score {} (best {})",
            state.mode().as_str(),
            state.score,
            state.best_score
        );
        state.events.push(GameEvent::GameOver {
            score: state.score,
            new_best,
        });
        return;
    }

    let center = state.field_center();
    state.ball.respawn(center);
    state.ball.invincible_ticks = state.tuning.invincibility_ticks;
    let purged = obstacles::purge_near_half(state);
    log::debug!(
        "Life lost ({:?}), {} left, cleared {} obstacles",
        cause,
        state.lives,
        purged
    );
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
        cause,
    });
}
