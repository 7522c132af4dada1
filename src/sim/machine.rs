//! Game state machine
//!
//! Menu -> Playing <-> Paused, Playing/Paused -> GameOver, GameOver -> Playing
//! (restart) or Menu. Only discrete input events move between phases; the one
//! exception is the tick ending a run when lives run out.

use serde::{Deserialize, Serialize};

use super::physics;
use super::state::{GameEvent, GameMode, GamePhase, GameState};

/// Discrete input produced by whatever reads the keyboard/touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Flap,
    TogglePause,
    Restart,
    ReturnToMenu,
    /// Menu selection 1-4 (Easy, Medium, Hard, Time Trial)
    SelectMode(u8),
    Quit,
}

/// What the caller should do after applying an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Enter Playing in `mode` with a fully reset run
pub fn start_run(state: &mut GameState, mode: GameMode) {
    state.set_mode(mode);
    state.reset_run();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::RunStarted(mode));
    log::info!("Started {} run (seed {})", mode.as_str(), state.seed);
}

/// Abandon whatever is going on and go back to the menu
pub fn return_to_menu(state: &mut GameState) {
    state.set_mode(GameMode::Menu);
    state.reset_run();
    state.phase = GamePhase::Menu;
    log::info!("Returned to menu");
}

/// Apply one input event
pub fn apply_input(state: &mut GameState, event: InputEvent) -> Control {
    if event == InputEvent::Quit {
        log::info!("Quit requested");
        return Control::Quit;
    }

    match (state.phase, event) {
        (GamePhase::Menu, InputEvent::SelectMode(n)) => match GameMode::from_selection(n) {
            Some(mode) => start_run(state, mode),
            None => log::warn!("Ignoring unknown mode selection {}", n),
        },
        // Flapping in the menu starts an easy run
        (GamePhase::Menu, InputEvent::Flap) => start_run(state, GameMode::Easy),

        (GamePhase::Playing, InputEvent::Flap) => {
            physics::flap(&mut state.ball, state.tuning.jump_impulse);
            state.events.push(GameEvent::Jumped);
        }
        (GamePhase::Playing, InputEvent::TogglePause) => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
        }
        (GamePhase::Paused, InputEvent::TogglePause) => {
            state.phase = GamePhase::Playing;
            log::info!("Resumed");
        }

        (GamePhase::GameOver, InputEvent::Restart) => {
            let mode = state.mode();
            start_run(state, mode);
        }

        (GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver, InputEvent::ReturnToMenu) => {
            return_to_menu(state)
        }

        _ => {}
    }

    Control::Continue
}
