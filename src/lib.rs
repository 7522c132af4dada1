//! Flappy Ball - a fixed-step arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, power-ups, difficulty, state machine)
//! - `platform`: Input queue and fixed-step ticker
//! - `game`: Session driver tying input, simulation, audio and high scores together
//! - `audio`: Sound cue mapping and procedural beep synthesis
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{DifficultyRow, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal tick length in milliseconds (~60 Hz)
    pub const TICK_MILLIS: u64 = 16;
    /// Nominal tick length in seconds
    pub const TICK_SECONDS: f32 = 0.016;
    /// Maximum ticks run per scheduler advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (y grows upward, 0 is the floor)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults - horizontal position never changes
    pub const BALL_X: f32 = 100.0;
    pub const BALL_RADIUS: f32 = 20.0;
    /// Velocity set by a flap (negative is upward because position -= velocity)
    pub const JUMP_IMPULSE: f32 = -8.0;

    /// Obstacle column width
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Margin kept between a gap and the field edges when rolling offsets
    pub const GAP_MARGIN: f32 = 50.0;

    /// Score-based difficulty steps every N points
    pub const DIFFICULTY_INTERVAL: u32 = 5;
    /// Gap height floor (never shrinks below this)
    pub const MIN_GAP_HEIGHT: f32 = 100.0;

    /// Power-up defaults
    pub const POWER_UP_RADIUS: f32 = 15.0;
    pub const POWER_UP_DURATION_TICKS: u32 = 300; // 5 seconds at 60 Hz
    pub const POWER_UP_SPEED: f32 = 2.0;
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.2;

    /// Lives
    pub const INITIAL_LIVES: u8 = 3;
    pub const INVINCIBILITY_TICKS: u32 = 120; // 2 seconds after losing a life

    /// Time trial steps difficulty every N seconds
    pub const TIME_TRIAL_STEP_SECS: u32 = 30;
}
