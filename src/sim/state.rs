//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; components borrow it and
//! mutate the fields they own. Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyParams;
use super::obstacles::ObstacleQueue;
use crate::tuning::Tuning;

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a mode selection
    Menu,
    /// Active gameplay
    Playing,
    /// Run frozen, resumable
    Paused,
    /// Lives exhausted
    GameOver,
}

/// Selected game mode; fixes the difficulty table row for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Menu,
    Easy,
    Medium,
    Hard,
    TimeTrial,
}

impl GameMode {
    /// Map a menu selection (1-4) to a playable mode
    pub fn from_selection(n: u8) -> Option<Self> {
        match n {
            1 => Some(GameMode::Easy),
            2 => Some(GameMode::Medium),
            3 => Some(GameMode::Hard),
            4 => Some(GameMode::TimeTrial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Menu => "Menu",
            GameMode::Easy => "Easy",
            GameMode::Medium => "Medium",
            GameMode::Hard => "Hard",
            GameMode::TimeTrial => "Time Trial",
        }
    }

    /// Whether difficulty scales with elapsed time instead of score
    pub fn is_time_based(&self) -> bool {
        matches!(self, GameMode::TimeTrial)
    }
}

/// The player's ball
///
/// Horizontal position is fixed by the tuning, so only height is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Height above the floor
    pub y: f32,
    /// Vertical velocity (positive falls, since `y -= vel` each tick)
    pub vel: f32,
    pub radius: f32,
    /// Ticks of collision immunity left after losing a life
    pub invincible_ticks: u32,
}

impl Ball {
    pub fn new(y: f32, radius: f32) -> Self {
        Self {
            y,
            vel: 0.0,
            radius,
            invincible_ticks: 0,
        }
    }

    /// Put the ball back at rest at the given height
    pub fn respawn(&mut self, y: f32) {
        self.y = y;
        self.vel = 0.0;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Renderer hint: blink in 5-tick blocks while invincible
    pub fn flicker_visible(&self) -> bool {
        !self.is_invincible() || (self.invincible_ticks / 5) % 2 == 0
    }
}

/// A scrolling column with a passable gap.
///
/// Only the gap's offset is fixed at spawn. Its height is the run's current
/// [`DifficultyParams::gap_height`], so a shrink also narrows columns already
/// on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom of the gap, fixed at spawn
    pub gap_y: f32,
}

impl Obstacle {
    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    pub fn gap_top(&self, gap_height: f32) -> f32 {
        self.gap_y + gap_height
    }

    pub fn gap_center(&self, gap_height: f32) -> f32 {
        self.gap_y + gap_height * 0.5
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Obstacle hits are ignored
    Shield,
    /// Score-based speed increases are halved
    SlowMotion,
    /// Each obstacle passed is worth two points
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowMotion,
        PowerUpKind::DoublePoints,
    ];

    /// HUD name
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::DoublePoints => "Double Points",
        }
    }

    /// RGB used for the pickup glow and the HUD timer
    pub fn color(&self) -> [f32; 3] {
        match self {
            PowerUpKind::Shield => [0.3, 0.3, 1.0],
            PowerUpKind::SlowMotion => [0.3, 1.0, 0.3],
            PowerUpKind::DoublePoints => [1.0, 1.0, 0.3],
        }
    }
}

/// A collectible drifting toward the ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Only active pickups are collected
    pub active: bool,
}

/// The single running power-up effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining_ticks: u32,
    pub duration_ticks: u32,
}

impl ActiveEffect {
    /// Start an effect. Panics on a zero duration.
    pub fn new(kind: PowerUpKind, duration_ticks: u32) -> Self {
        assert!(
            duration_ticks > 0,
            "power-up effect duration must be at least one tick"
        );
        Self {
            kind,
            remaining_ticks: duration_ticks,
            duration_ticks,
        }
    }

    /// Remaining fraction (1.0 = just picked up)
    pub fn progress(&self) -> f32 {
        self.remaining_ticks as f32 / self.duration_ticks as f32
    }
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossCause {
    Obstacle,
    OutOfBounds,
}

/// Discrete things that happened during a tick (audio/render/HUD hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run started (fresh reset) in the given mode
    RunStarted(GameMode),
    Jumped,
    Scored { points: u32, total: u32 },
    PowerUpCollected(PowerUpKind),
    /// An effect ended, either by running out or by being replaced
    PowerUpEnded { kind: PowerUpKind, replaced: bool },
    LifeLost { remaining: u8, cause: LifeLossCause },
    GameOver { score: u32, new_best: bool },
    DifficultyStepped(DifficultyParams),
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG driving gap offsets and power-up rolls
    pub rng: Pcg32,
    /// Balance sheet this state was built with
    pub tuning: Tuning,
    pub phase: GamePhase,
    mode: GameMode,
    pub ball: Ball,
    /// Live obstacles, oldest first
    pub obstacles: ObstacleQueue,
    /// Live pickups (sorted by id)
    pub power_ups: Vec<PowerUp>,
    /// At most one running effect
    pub effect: Option<ActiveEffect>,
    /// Derived difficulty for the current tick
    pub difficulty: DifficultyParams,
    pub score: u32,
    pub lives: u8,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Ticks since the last obstacle spawn
    pub spawn_timer: u32,
    /// Whole second of the last time-trial step
    pub last_time_step_secs: u32,
    /// Best score seen by this process
    pub best_score: u32,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a state sitting in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a state sitting in the menu with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let center = tuning.field_height / 2.0;
        let ball = Ball::new(center, tuning.ball_radius);
        let mode = GameMode::Menu;
        let difficulty = DifficultyParams::baseline(tuning.row(mode));
        let lives = tuning.initial_lives;

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            mode,
            ball,
            obstacles: ObstacleQueue::new(),
            power_ups: Vec::new(),
            effect: None,
            difficulty,
            score: 0,
            lives,
            time_ticks: 0,
            spawn_timer: 0,
            last_time_step_secs: 0,
            best_score: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Modes only change through the state machine, between runs
    pub(crate) fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Vertical center of the field (spawn/respawn height)
    pub fn field_center(&self) -> f32 {
        self.tuning.field_height / 2.0
    }

    /// Center of the ball in field coordinates
    pub fn ball_center(&self) -> Vec2 {
        Vec2::new(self.tuning.ball_x, self.ball.y)
    }

    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.effect.is_some_and(|e| e.kind == kind)
    }

    /// Whole seconds of simulated time in this run
    pub fn elapsed_secs(&self) -> u32 {
        (self.time_ticks * crate::consts::TICK_MILLIS / 1000) as u32
    }

    /// Wipe every run-scoped value and restore the mode's difficulty baseline.
    /// Seed, RNG stream, tuning, mode and best score survive.
    pub fn reset_run(&mut self) {
        let center = self.field_center();
        self.ball = Ball::new(center, self.tuning.ball_radius);
        self.obstacles.clear();
        self.power_ups.clear();
        self.effect = None;
        self.difficulty = DifficultyParams::baseline(self.tuning.row(self.mode));
        self.score = 0;
        self.lives = self.tuning.initial_lives;
        self.time_ticks = 0;
        self.spawn_timer = 0;
        self.last_time_step_secs = 0;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_sits_in_menu() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.mode(), GameMode::Menu);
        assert_eq!(state.lives, 3);
        assert_eq!(state.ball.y, 300.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_mode_selection_mapping() {
        assert_eq!(GameMode::from_selection(1), Some(GameMode::Easy));
        assert_eq!(GameMode::from_selection(4), Some(GameMode::TimeTrial));
        assert_eq!(GameMode::from_selection(0), None);
        assert_eq!(GameMode::from_selection(5), None);
    }

    #[test]
    fn test_reset_run_keeps_best_score() {
        let mut state = GameState::new(7);
        state.set_mode(GameMode::Hard);
        state.score = 12;
        state.best_score = 40;
        state.lives = 1;
        state.time_ticks = 900;
        state.effect = Some(ActiveEffect::new(PowerUpKind::Shield, 10));

        state.reset_run();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.effect, None);
        assert_eq!(state.best_score, 40);
        assert_eq!(state.difficulty.speed, 4.0);
    }

    #[test]
    #[should_panic(expected = "at least one tick")]
    fn test_zero_duration_effect_panics() {
        let _ = ActiveEffect::new(PowerUpKind::SlowMotion, 0);
    }

    #[test]
    fn test_flicker_only_while_invincible() {
        let mut ball = Ball::new(300.0, 20.0);
        assert!(ball.flicker_visible());
        ball.invincible_ticks = 7; // 7 / 5 = 1 -> hidden
        assert!(!ball.flicker_visible());
        ball.invincible_ticks = 12; // 12 / 5 = 2 -> shown
        assert!(ball.flicker_visible());
    }

    #[test]
    fn test_power_up_presentation() {
        assert_eq!(PowerUpKind::SlowMotion.label(), "Slow Motion");
        assert_eq!(PowerUpKind::Shield.color(), [0.3, 0.3, 1.0]);
        let labels: Vec<&str> = PowerUpKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["Shield", "Slow Motion", "Double Points"]);
    }

    #[test]
    fn test_elapsed_secs_from_ticks() {
        let mut state = GameState::new(1);
        state.time_ticks = 1875; // 1875 * 16ms = 30s
        assert_eq!(state.elapsed_secs(), 30);
        state.time_ticks = 1874;
        assert_eq!(state.elapsed_secs(), 29);
    }
}
