//! Difficulty controller
//!
//! Two policies:
//! - score-based (Easy/Medium/Hard): values are derived fresh from the score
//!   every time, so re-applying at the same score changes nothing
//! - time-based (Time Trial): every step adds a fixed increment on top of the
//!   current values, using the medium row's rates scaled by the trial factors

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, PowerUpKind};
use crate::tuning::{DifficultyRow, TimeTrialTuning};

/// Live difficulty values for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub speed: f32,
    pub gap_height: f32,
    pub gravity: f32,
    pub spawn_interval: u32,
}

impl DifficultyParams {
    /// Starting values for a row
    pub fn baseline(row: &DifficultyRow) -> Self {
        Self {
            speed: row.speed,
            gap_height: row.gap_height,
            gravity: row.gravity,
            spawn_interval: row.spawn_interval,
        }
    }
}

/// Derive difficulty for a score. The gap is clamped to `min_gap`.
pub fn score_based(
    row: &DifficultyRow,
    score: u32,
    interval: u32,
    min_gap: f32,
    slow_motion: bool,
) -> DifficultyParams {
    let level = (score / interval) as f32;
    let speed_increase = level * row.speed_increase;
    let speed = if slow_motion {
        row.speed + speed_increase * 0.5
    } else {
        row.speed + speed_increase
    };
    DifficultyParams {
        speed,
        gap_height: (row.gap_height - level * row.gap_decrease).max(min_gap),
        gravity: row.gravity + level * row.gravity_increase,
        spawn_interval: row.spawn_interval,
    }
}

/// One incremental time-trial step on top of `current`
pub fn time_trial_step(
    current: &DifficultyParams,
    rates: &DifficultyRow,
    factors: &TimeTrialTuning,
    min_gap: f32,
) -> DifficultyParams {
    DifficultyParams {
        speed: current.speed + rates.speed_increase * factors.speed_factor,
        gap_height: (current.gap_height - rates.gap_decrease * factors.gap_factor).max(min_gap),
        gravity: current.gravity + rates.gravity_increase * factors.gravity_factor,
        spawn_interval: current.spawn_interval,
    }
}

/// Recompute the state's difficulty for this tick according to its mode
pub fn update(state: &mut GameState) {
    let tuning = &state.tuning;
    if state.mode().is_time_based() {
        let now = state.elapsed_secs();
        if now >= state.last_time_step_secs + tuning.time_trial.step_secs {
            state.last_time_step_secs = now;
            state.difficulty = time_trial_step(
                &state.difficulty,
                &tuning.difficulty.medium,
                &tuning.time_trial,
                tuning.min_gap_height,
            );
            log::info!(
                "Time trial difficulty stepped at {}s: speed={:.2} gravity={:.2} gap={:.2}",
                now,
                state.difficulty.speed,
                state.difficulty.gravity,
                state.difficulty.gap_height
            );
            state
                .events
                .push(GameEvent::DifficultyStepped(state.difficulty));
        }
    } else if state.score > 0 && state.score % tuning.difficulty_interval == 0 {
        let next = score_based(
            tuning.row(state.mode()),
            state.score,
            tuning.difficulty_interval,
            tuning.min_gap_height,
            state.has_effect(PowerUpKind::SlowMotion),
        );
        if next != state.difficulty {
            log::debug!(
                "Difficulty at score {}: speed={:.2} gravity={:.2} gap={:.2}",
                state.score,
                next.speed,
                next.gravity,
                next.gap_height
            );
            state.difficulty = next;
            state.events.push(GameEvent::DifficultyStepped(next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ActiveEffect, GameMode};
    use proptest::prelude::*;

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(42);
        state.set_mode(mode);
        state.reset_run();
        state
    }

    #[test]
    fn test_easy_recompute_at_multiple_of_five() {
        let mut state = playing(GameMode::Easy);
        state.score = 10;
        update(&mut state);

        let row = DifficultyRow::EASY;
        assert_eq!(state.difficulty.speed, row.speed + 2.0 * row.speed_increase);
        assert_eq!(state.difficulty.gravity, row.gravity + 2.0 * row.gravity_increase);
        assert_eq!(state.difficulty.gap_height, row.gap_height - 2.0 * row.gap_decrease);
        assert_eq!(state.difficulty.spawn_interval, 120);

        // Same score again: nothing moves
        let before = state.difficulty;
        update(&mut state);
        update(&mut state);
        assert_eq!(state.difficulty, before);
    }

    #[test]
    fn test_no_recompute_off_interval() {
        let mut state = playing(GameMode::Medium);
        state.score = 7;
        update(&mut state);
        assert_eq!(state.difficulty, DifficultyParams::baseline(&DifficultyRow::MEDIUM));
    }

    #[test]
    fn test_slow_motion_halves_speed_increase() {
        let mut state = playing(GameMode::Hard);
        state.score = 20;
        state.effect = Some(ActiveEffect::new(PowerUpKind::SlowMotion, 300));
        update(&mut state);
        assert_eq!(state.difficulty.speed, 4.0 + 4.0 * 0.3 * 0.5);
        // Gravity and gap ignore slow motion
        assert_eq!(state.difficulty.gravity, 0.5 + 4.0 * 0.03);
        assert_eq!(state.difficulty.gap_height, 150.0 - 4.0 * 7.0);
    }

    #[test]
    fn test_time_trial_steps_every_thirty_seconds() {
        let mut state = playing(GameMode::TimeTrial);
        let base = state.difficulty;

        state.time_ticks = 1874; // 29.98s
        update(&mut state);
        assert_eq!(state.difficulty, base);

        state.time_ticks = 1875; // 30s
        update(&mut state);
        assert_eq!(state.difficulty.speed, base.speed + 0.2 * 0.5);
        assert_eq!(state.difficulty.gravity, base.gravity + 0.02 * 0.3);
        assert_eq!(state.difficulty.gap_height, base.gap_height - 5.0 * 0.7);
        assert_eq!(state.last_time_step_secs, 30);

        // Still 30s: no second step
        let once = state.difficulty;
        state.time_ticks = 1900;
        update(&mut state);
        assert_eq!(state.difficulty, once);

        // Cumulative at 60s
        state.time_ticks = 3750;
        update(&mut state);
        assert_eq!(state.difficulty.speed, once.speed + 0.2 * 0.5);
    }

    #[test]
    fn test_time_trial_ignores_score() {
        let mut state = playing(GameMode::TimeTrial);
        state.score = 50;
        update(&mut state);
        assert_eq!(state.difficulty, DifficultyParams::baseline(&DifficultyRow::MEDIUM));
    }

    #[test]
    fn test_time_trial_is_deterministic() {
        let factors = TimeTrialTuning::default();
        let start = DifficultyParams::baseline(&DifficultyRow::MEDIUM);
        let run = || {
            let mut p = start;
            for _ in 0..10 {
                p = time_trial_step(&p, &DifficultyRow::MEDIUM, &factors, 100.0);
            }
            p
        };
        assert_eq!(run(), run());
    }

    proptest! {
        #[test]
        fn prop_gap_never_below_floor(score in any::<u32>(), slow in any::<bool>()) {
            for row in [DifficultyRow::EASY, DifficultyRow::MEDIUM, DifficultyRow::HARD] {
                let p = score_based(&row, score, 5, 100.0, slow);
                prop_assert!(p.gap_height >= 100.0);
            }
        }

        #[test]
        fn prop_score_based_is_idempotent(score in 0u32..100_000, repeats in 1usize..10) {
            let first = score_based(&DifficultyRow::HARD, score, 5, 100.0, false);
            for _ in 0..repeats {
                let again = score_based(&DifficultyRow::HARD, score, 5, 100.0, false);
                prop_assert_eq!(again.speed.to_bits(), first.speed.to_bits());
                prop_assert_eq!(again.gravity.to_bits(), first.gravity.to_bits());
                prop_assert_eq!(again.gap_height.to_bits(), first.gap_height.to_bits());
            }
        }

        #[test]
        fn prop_speed_monotonic_in_score(a in 0u32..10_000, b in 0u32..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = score_based(&DifficultyRow::MEDIUM, lo, 5, 100.0, false);
            let p_hi = score_based(&DifficultyRow::MEDIUM, hi, 5, 100.0, false);
            prop_assert!(p_hi.speed >= p_lo.speed);
        }

        #[test]
        fn prop_time_trial_gap_saturates(steps in 0usize..500) {
            let factors = TimeTrialTuning::default();
            let mut p = DifficultyParams::baseline(&DifficultyRow::MEDIUM);
            for _ in 0..steps {
                p = time_trial_step(&p, &DifficultyRow::MEDIUM, &factors, 100.0);
            }
            prop_assert!(p.gap_height >= 100.0);
        }
    }
}
