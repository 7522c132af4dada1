//! Power-up spawning, pickup and the single active-effect slot

use glam::Vec2;
use rand::Rng;

use super::collision::ball_touches_pickup;
use super::state::{ActiveEffect, GameEvent, GameState, PowerUp, PowerUpKind};

/// Roll for a power-up alongside an obstacle spawn
pub fn maybe_spawn(state: &mut GameState) -> Option<PowerUpKind> {
    if !state.rng.random_bool(state.tuning.power_up_spawn_chance) {
        return None;
    }
    let margin = state.tuning.gap_margin;
    let span = (state.tuning.field_height - 2.0 * margin).max(1.0);
    let y = margin + state.rng.random_range(0.0..span);
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];

    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(state.tuning.field_width, y),
        active: true,
    });
    log::debug!("Spawned {} power-up at y={:.0}", kind.label(), y);
    Some(kind)
}

/// End the running effect, if any. Returns the kind that was cleared.
pub fn deactivate(state: &mut GameState, replaced: bool) -> Option<PowerUpKind> {
    let old = state.effect.take()?;
    state.events.push(GameEvent::PowerUpEnded {
        kind: old.kind,
        replaced,
    });
    log::debug!("{} ended (replaced: {})", old.kind.label(), replaced);
    Some(old.kind)
}

/// Cancel the running effect, then start `kind` with a fresh timer
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    deactivate(state, true);
    state.effect = Some(ActiveEffect::new(kind, state.tuning.power_up_duration_ticks));
    state.events.push(GameEvent::PowerUpCollected(kind));
    log::debug!("{} activated", kind.label());
}

/// Count down the running effect and clear it when it runs out
pub fn tick_effect(state: &mut GameState) {
    let Some(effect) = state.effect.as_mut() else {
        return;
    };
    effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
    if effect.remaining_ticks == 0 {
        deactivate(state, false);
    }
}

/// Scroll pickups, collect the active ones touching the ball and drop the ones
/// that left the field. Pickups are applied in id order and leave the field on
/// the tick they are collected.
pub fn advance(state: &mut GameState) {
    let speed = state.tuning.power_up_speed;
    let radius = state.tuning.power_up_radius;
    let ball_center = state.ball_center();
    let ball_radius = state.ball.radius;

    let (collected, remaining): (Vec<PowerUp>, Vec<PowerUp>) =
        std::mem::take(&mut state.power_ups)
            .into_iter()
            .map(|mut p| {
                p.pos.x -= speed;
                p
            })
            .partition(|p| {
                p.active && ball_touches_pickup(ball_center, ball_radius, p.pos, radius)
            });

    state.power_ups = remaining
        .into_iter()
        .filter(|p| p.pos.x + radius >= 0.0)
        .collect();

    for pickup in collected {
        activate(state, pickup.kind);
    }
}
