//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a run can be re-balanced
//! from a JSON file without recompiling. Defaults reproduce the classic feel.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::GameMode;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TuningError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// One row of the difficulty table: base values and per-step rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRow {
    pub speed: f32,
    pub gap_height: f32,
    pub gravity: f32,
    pub spawn_interval: u32,
    pub speed_increase: f32,
    pub gap_decrease: f32,
    pub gravity_increase: f32,
}

impl DifficultyRow {
    pub const EASY: Self = Self {
        speed: 2.0,
        gap_height: 250.0,
        gravity: 0.3,
        spawn_interval: 120,
        speed_increase: 0.1,
        gap_decrease: 3.0,
        gravity_increase: 0.01,
    };

    pub const MEDIUM: Self = Self {
        speed: 3.0,
        gap_height: 200.0,
        gravity: 0.4,
        spawn_interval: 100,
        speed_increase: 0.2,
        gap_decrease: 5.0,
        gravity_increase: 0.02,
    };

    pub const HARD: Self = Self {
        speed: 4.0,
        gap_height: 150.0,
        gravity: 0.5,
        spawn_interval: 80,
        speed_increase: 0.3,
        gap_decrease: 7.0,
        gravity_increase: 0.03,
    };

    /// Values used before a mode is chosen
    pub const MENU: Self = Self {
        speed: 3.0,
        gap_height: 200.0,
        gravity: 0.4,
        spawn_interval: 100,
        speed_increase: 0.0,
        gap_decrease: 0.0,
        gravity_increase: 0.0,
    };
}

/// Per-mode base rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub menu: DifficultyRow,
    pub easy: DifficultyRow,
    pub medium: DifficultyRow,
    pub hard: DifficultyRow,
    /// Time trial starts at medium
    pub time_trial: DifficultyRow,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            menu: DifficultyRow::MENU,
            easy: DifficultyRow::EASY,
            medium: DifficultyRow::MEDIUM,
            hard: DifficultyRow::HARD,
            time_trial: DifficultyRow::MEDIUM,
        }
    }
}

impl DifficultyTable {
    /// Row for a mode
    pub fn row(&self, mode: GameMode) -> &DifficultyRow {
        match mode {
            GameMode::Menu => &self.menu,
            GameMode::Easy => &self.easy,
            GameMode::Medium => &self.medium,
            GameMode::Hard => &self.hard,
            GameMode::TimeTrial => &self.time_trial,
        }
    }

    fn rows(&self) -> [(&'static str, &DifficultyRow); 5] {
        [
            ("difficulty.menu", &self.menu),
            ("difficulty.easy", &self.easy),
            ("difficulty.medium", &self.medium),
            ("difficulty.hard", &self.hard),
            ("difficulty.time_trial", &self.time_trial),
        ]
    }
}

/// Time trial incremental step factors (applied to medium-row rates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeTrialTuning {
    pub step_secs: u32,
    pub speed_factor: f32,
    pub gravity_factor: f32,
    pub gap_factor: f32,
}

impl Default for TimeTrialTuning {
    fn default() -> Self {
        Self {
            step_secs: TIME_TRIAL_STEP_SECS,
            speed_factor: 0.5,
            gravity_factor: 0.3,
            gap_factor: 0.7,
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub ball_x: f32,
    pub ball_radius: f32,
    pub jump_impulse: f32,
    pub obstacle_width: f32,
    pub gap_margin: f32,
    pub difficulty_interval: u32,
    pub min_gap_height: f32,
    pub power_up_radius: f32,
    pub power_up_duration_ticks: u32,
    pub power_up_speed: f32,
    pub power_up_spawn_chance: f64,
    pub initial_lives: u8,
    pub invincibility_ticks: u32,
    pub time_trial: TimeTrialTuning,
    pub difficulty: DifficultyTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ball_x: BALL_X,
            ball_radius: BALL_RADIUS,
            jump_impulse: JUMP_IMPULSE,
            obstacle_width: OBSTACLE_WIDTH,
            gap_margin: GAP_MARGIN,
            difficulty_interval: DIFFICULTY_INTERVAL,
            min_gap_height: MIN_GAP_HEIGHT,
            power_up_radius: POWER_UP_RADIUS,
            power_up_duration_ticks: POWER_UP_DURATION_TICKS,
            power_up_speed: POWER_UP_SPEED,
            power_up_spawn_chance: POWER_UP_SPAWN_CHANCE,
            initial_lives: INITIAL_LIVES,
            invincibility_ticks: INVINCIBILITY_TICKS,
            time_trial: TimeTrialTuning::default(),
            difficulty: DifficultyTable::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning from JSON text (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !finite_positive(self.field_width) {
            return Err(TuningError::invalid("field_width", "must be positive"));
        }
        if !finite_positive(self.min_gap_height) {
            return Err(TuningError::invalid("min_gap_height", "must be positive"));
        }
        if self.min_gap_height + 2.0 * self.gap_margin > self.field_height {
            return Err(TuningError::invalid(
                "field_height",
                format!(
                    "{} cannot fit a {} gap with {} margins",
                    self.field_height, self.min_gap_height, self.gap_margin
                ),
            ));
        }
        if !finite_positive(self.ball_radius) {
            return Err(TuningError::invalid("ball_radius", "must be positive"));
        }
        if self.difficulty_interval == 0 {
            return Err(TuningError::invalid("difficulty_interval", "must be at least 1"));
        }
        if self.power_up_duration_ticks == 0 {
            return Err(TuningError::invalid(
                "power_up_duration_ticks",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return Err(TuningError::invalid(
                "power_up_spawn_chance",
                format!("{} is not a probability", self.power_up_spawn_chance),
            ));
        }
        if self.initial_lives == 0 {
            return Err(TuningError::invalid("initial_lives", "must be at least 1"));
        }
        if self.time_trial.step_secs == 0 {
            return Err(TuningError::invalid("time_trial.step_secs", "must be at least 1"));
        }
        for (field, row) in self.difficulty.rows() {
            if row.spawn_interval == 0 {
                return Err(TuningError::invalid(field, "spawn_interval must be at least 1"));
            }
            if !(row.speed >= 0.0) {
                return Err(TuningError::invalid(field, "speed must not be negative"));
            }
        }
        Ok(())
    }

    /// Difficulty row for a mode
    pub fn row(&self, mode: GameMode) -> &DifficultyRow {
        self.difficulty.row(mode)
    }
}

fn finite_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rows_map_by_mode() {
        let tuning = Tuning::default();
        assert_eq!(tuning.row(GameMode::Easy).speed, 2.0);
        assert_eq!(tuning.row(GameMode::Medium).gap_height, 200.0);
        assert_eq!(tuning.row(GameMode::Hard).spawn_interval, 80);
        assert_eq!(*tuning.row(GameMode::TimeTrial), DifficultyRow::MEDIUM);
        assert_eq!(*tuning.row(GameMode::Menu), DifficultyRow::MENU);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 5, "min_gap_height": 90.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.min_gap_height, 90.0);
        assert_eq!(tuning.field_height, FIELD_HEIGHT);
        assert_eq!(tuning.difficulty.hard, DifficultyRow::HARD);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "min_gap_height": -10.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "min_gap_height",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "power_up_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));

        let err = Tuning::from_json(r#"{ "difficulty_interval": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let mut tuning = Tuning::default();
        tuning.difficulty.hard.spawn_interval = 0;
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("difficulty.hard"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_non_finite_sizes_rejected() {
        let mut tuning = Tuning::default();
        tuning.field_width = f32::NAN;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.ball_radius = f32::INFINITY;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.min_gap_height = 0.0;
        assert!(tuning.validate().is_err());
    }
}
