//! Session driver
//!
//! One [`Game`] owns the simulation state plus everything that reacts to it.
//! Each [`Game::step`] drains queued input, runs one tick and dispatches the
//! tick's events to audio and the leaderboard. Rendering reads
//! [`Game::state`] after the step returns.

use crate::audio::AudioManager;
use crate::highscores::HighScores;
use crate::platform::{InputQueue, InputSender};
use crate::settings::Settings;
use crate::sim::{self, Control, GameEvent, GameState, InputEvent};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    state: GameState,
    input: InputQueue,
    sender: InputSender,
    audio: AudioManager,
    high_scores: HighScores,
    /// Events from the most recent step
    last_events: Vec<GameEvent>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let (sender, input) = InputQueue::channel();
        Self {
            state: GameState::with_tuning(seed, tuning),
            input,
            sender,
            audio: AudioManager::new(),
            high_scores: HighScores::new(),
            last_events: Vec::new(),
        }
    }

    /// Build from player settings (seed, audio levels)
    pub fn from_settings(settings: &Settings, tuning: Tuning) -> Self {
        let mut game = Self::new(settings.seed_or_random(), tuning);
        game.audio.apply_settings(settings);
        game
    }

    /// Replace the audio backend
    pub fn with_audio(mut self, audio: AudioManager) -> Self {
        self.audio = audio;
        self
    }

    /// Handle for queueing input from callbacks or other threads
    pub fn input_sender(&self) -> InputSender {
        self.sender.clone()
    }

    /// Queue an input for the next step
    pub fn push_input(&self, event: InputEvent) {
        self.sender.send(event);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Events produced by the last step, in order
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Apply pending input, run one tick, dispatch events
    pub fn step(&mut self) -> Control {
        for event in self.input.drain() {
            if sim::apply_input(&mut self.state, event) == Control::Quit {
                self.dispatch_events();
                return Control::Quit;
            }
        }

        sim::tick(&mut self.state);
        self.dispatch_events();
        Control::Continue
    }

    fn dispatch_events(&mut self) {
        self.last_events = self.state.drain_events();
        for event in &self.last_events {
            self.audio.handle_event(event);
            if let GameEvent::GameOver { score, .. } = *event {
                let mode = self.state.mode();
                if let Some(rank) = self.high_scores.add_score(score, mode, self.state.time_ticks) {
                    log::info!("Score {} ranked #{} on the leaderboard", score, rank);
                }
            }
        }
    }
}
