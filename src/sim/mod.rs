//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, driven from outside
//! - Seeded RNG only
//! - Stable iteration order (obstacles by spawn order, pickups by id)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod machine;
pub mod obstacles;
pub mod physics;
pub mod powerups;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, ball_hits_obstacle, ball_touches_pickup, passed_ball};
pub use difficulty::DifficultyParams;
pub use machine::{Control, InputEvent, apply_input};
pub use obstacles::ObstacleQueue;
pub use state::{
    ActiveEffect, Ball, GameEvent, GameMode, GamePhase, GameState, LifeLossCause, Obstacle,
    PowerUp, PowerUpKind,
};
pub use tick::{lose_life, tick};
