//! Collision detection and scoring
//!
//! Pure geometry helpers plus [`resolve`], which scans the obstacle queue once
//! per tick and reports what happened. Applying life loss is left to the tick.

use glam::Vec2;

use super::state::{GameEvent, GameState, LifeLossCause, Obstacle, PowerUpKind};

/// What a collision pass found this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Points earned from obstacles passed
    pub points: u32,
    /// First fatal contact, if any
    pub fatal: Option<LifeLossCause>,
}

/// Whether the ball's box overlaps the obstacle column outside its gap
pub fn ball_hits_obstacle(
    ball_x: f32,
    ball_y: f32,
    ball_radius: f32,
    obstacle: &Obstacle,
    obstacle_width: f32,
    gap_height: f32,
) -> bool {
    let ball_left = ball_x - ball_radius;
    let ball_right = ball_x + ball_radius;
    let ball_bottom = ball_y - ball_radius;
    let ball_top = ball_y + ball_radius;

    let overlaps_column = ball_right > obstacle.x && ball_left < obstacle.right_edge(obstacle_width);
    overlaps_column && (ball_bottom < obstacle.gap_y || ball_top > obstacle.gap_top(gap_height))
}

/// Whether the obstacle's trailing edge crossed `ball_x` during this tick's
/// movement of `speed`
pub fn passed_ball(obstacle: &Obstacle, obstacle_width: f32, speed: f32, ball_x: f32) -> bool {
    let right = obstacle.right_edge(obstacle_width);
    right < ball_x && right + speed >= ball_x
}

/// Circle-circle touch test (touching counts)
pub fn ball_touches_pickup(ball: Vec2, ball_radius: f32, pickup: Vec2, pickup_radius: f32) -> bool {
    ball.distance(pickup) <= ball_radius + pickup_radius
}

/// Whether the ball left the vertical field
pub fn ball_out_of_bounds(ball_y: f32, field_height: f32) -> bool {
    ball_y < 0.0 || ball_y > field_height
}

/// Scan obstacles and bounds for this tick and award points.
///
/// Obstacle hits are ignored under a Shield or while invincible; leaving the
/// field is always fatal.
pub fn resolve(state: &mut GameState) -> CollisionOutcome {
    let tuning = &state.tuning;
    let width = tuning.obstacle_width;
    let ball_x = tuning.ball_x;
    let speed = state.difficulty.speed;
    let gap_height = state.difficulty.gap_height;
    let protected = state.has_effect(PowerUpKind::Shield) || state.ball.is_invincible();
    let per_pass = if state.has_effect(PowerUpKind::DoublePoints) {
        2
    } else {
        1
    };

    let mut outcome = CollisionOutcome::default();
    for obstacle in state.obstacles.iter() {
        if !protected
            && outcome.fatal.is_none()
            && ball_hits_obstacle(
                ball_x,
                state.ball.y,
                state.ball.radius,
                obstacle,
                width,
                gap_height,
            )
        {
            outcome.fatal = Some(LifeLossCause::Obstacle);
        }
        if passed_ball(obstacle, width, speed, ball_x) {
            outcome.points += per_pass;
        }
    }

    if ball_out_of_bounds(state.ball.y, tuning.field_height) && outcome.fatal.is_none() {
        outcome.fatal = Some(LifeLossCause::OutOfBounds);
    }

    if outcome.points > 0 {
        state.score += outcome.points;
        state.events.push(GameEvent::Scored {
            points: outcome.points,
            total: state.score,
        });
    }

    outcome
}
