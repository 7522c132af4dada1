//! Obstacle spawning and scrolling
//!
//! Obstacles are spawned at the right edge and all move left at the same
//! speed, so the oldest is always the leftmost. [`ObstacleQueue`] leans on
//! that: it only ever pushes at the back and pops from the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Obstacle};

/// FIFO of live obstacles, oldest (smallest x) first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleQueue {
    items: VecDeque<Obstacle>,
}

impl ObstacleQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn front(&self) -> Option<&Obstacle> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.items.iter()
    }

    /// Append a newly spawned obstacle. It must not sit left of the newest one.
    pub fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(
            self.items.back().is_none_or(|last| last.x <= obstacle.x),
            "obstacles must be pushed in spawn order"
        );
        self.items.push_back(obstacle);
    }

    /// Move every obstacle left by `speed`
    pub fn scroll(&mut self, speed: f32) {
        for obstacle in &mut self.items {
            obstacle.x -= speed;
        }
    }

    /// Remove the oldest obstacle if `pred` holds for it
    pub fn pop_front_if(&mut self, pred: impl FnOnce(&Obstacle) -> bool) -> Option<Obstacle> {
        if self.items.front().is_some_and(pred) {
            self.items.pop_front()
        } else {
            None
        }
    }

    /// Remove obstacles from the front while `pred` holds; returns how many went
    pub fn pop_front_while(&mut self, mut pred: impl FnMut(&Obstacle) -> bool) -> usize {
        let mut removed = 0;
        while self.pop_front_if(&mut pred).is_some() {
            removed += 1;
        }
        removed
    }
}

/// Roll the bottom of a new gap so the whole gap stays on screen
pub fn roll_gap_y<R: Rng>(rng: &mut R, field_height: f32, gap_height: f32, margin: f32) -> f32 {
    let span = field_height - gap_height - 2.0 * margin;
    let gap_y = if span > 0.0 {
        margin + rng.random_range(0.0..span)
    } else {
        margin
    };
    gap_y.clamp(0.0, (field_height - gap_height).max(0.0))
}

/// Count a spawn tick; returns true when an obstacle should spawn this tick
pub fn advance_spawn_timer(state: &mut GameState) -> bool {
    state.spawn_timer += 1;
    if state.spawn_timer >= state.difficulty.spawn_interval {
        state.spawn_timer = 0;
        true
    } else {
        false
    }
}

/// Spawn one obstacle at the right edge, placing its gap for the current gap
/// height
pub fn spawn_obstacle(state: &mut GameState) {
    let gap_y = roll_gap_y(
        &mut state.rng,
        state.tuning.field_height,
        state.difficulty.gap_height,
        state.tuning.gap_margin,
    );
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        x: state.tuning.field_width,
        gap_y,
    });
}

/// Scroll obstacles and retire the oldest once it has fully left the field.
/// Returns the retired obstacle, if any.
pub fn scroll_obstacles(state: &mut GameState) -> Option<Obstacle> {
    let width = state.tuning.obstacle_width;
    state.obstacles.scroll(state.difficulty.speed);
    state.obstacles.pop_front_if(|o| o.right_edge(width) < 0.0)
}

/// Drop every obstacle in the near half of the field (after a respawn)
pub fn purge_near_half(state: &mut GameState) -> usize {
    let half = state.tuning.field_width / 2.0;
    state.obstacles.pop_front_while(|o| o.x < half)
}
