//! Audio cues
//!
//! Procedurally generated beeps - no external files needed! The simulation
//! only emits [`GameEvent`]s; this module maps them to cues and hands mono
//! 16-bit PCM to whatever [`AudioSink`] the platform provides.

use std::collections::HashMap;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Output sample rate for synthesized cues
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball flapped
    Jump,
    /// Obstacle passed
    Score,
    /// Power-up collected
    PowerUp,
    /// Life lost or run over
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Jump,
        SoundEffect::Score,
        SoundEffect::PowerUp,
        SoundEffect::GameOver,
    ];

    /// Tone frequency (Hz) and length (seconds)
    pub fn tone(&self) -> (f32, f32) {
        match self {
            SoundEffect::Jump => (880.0, 0.1),
            SoundEffect::Score => (1000.0, 0.1),
            SoundEffect::PowerUp => (660.0, 0.2),
            SoundEffect::GameOver => (440.0, 0.5),
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::LifeLost { .. } | GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::RunStarted(_)
            | GameEvent::PowerUpEnded { .. }
            | GameEvent::DifficultyStepped(_) => None,
        }
    }
}

/// Full-scale sine wave of `duration` seconds
pub fn synthesize_beep(frequency: f32, duration: f32, sample_rate: u32) -> Vec<i16> {
    let samples = (duration * sample_rate as f32) as usize;
    (0..samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (i16::MAX as f32 * (std::f32::consts::TAU * frequency * t).sin()) as i16
        })
        .collect()
}

/// Where cues end up. Implementations must return without waiting for
/// playback to finish.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, samples: &[i16], volume: f32);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, samples: &[i16], volume: f32) {
        log::trace!(
            "Cue {:?}: {} samples at volume {:.2}",
            effect,
            samples.len(),
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    buffers: HashMap<SoundEffect, Vec<i16>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self::with_sink(Box::new(LogSink))
    }

    /// Build with a platform sink; all cue buffers are synthesized up front
    pub fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        let buffers = SoundEffect::ALL
            .iter()
            .map(|&effect| {
                let (freq, duration) = effect.tone();
                (effect, synthesize_beep(freq, duration, SAMPLE_RATE))
            })
            .collect();
        Self {
            sink,
            buffers,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute from player settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Some(samples) = self.buffers.get(&effect) {
            self.sink.play(effect, samples, vol);
        }
    }

    /// Play the cue for an event, if any
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{DifficultyParams, GameMode, LifeLossCause, PowerUpKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(SoundEffect, usize, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, samples: &[i16], volume: f32) {
            self.0.borrow_mut().push((effect, samples.len(), volume));
        }
    }

    #[test]
    fn test_beep_length_and_shape() {
        let samples = synthesize_beep(440.0, 0.5, SAMPLE_RATE);
        assert_eq!(samples.len(), 22_050);
        assert_eq!(samples[0], 0);
        // Quarter period of 440Hz peaks near full scale
        let quarter = (SAMPLE_RATE as f32 / 440.0 / 4.0).round() as usize;
        assert!(samples[quarter] > 32_000);
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { points: 1, total: 1 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected(PowerUpKind::Shield)),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LifeLost {
                remaining: 2,
                cause: LifeLossCause::Obstacle
            }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::RunStarted(GameMode::Easy)), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::DifficultyStepped(DifficultyParams {
                speed: 1.0,
                gap_height: 1.0,
                gravity: 1.0,
                spawn_interval: 1,
            })),
            None
        );
    }

    #[test]
    fn test_manager_volume_and_mute() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::with_sink(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0); // clamped to 1.0

        audio.handle_event(&GameEvent::Jumped);
        audio.set_muted(true);
        audio.play(SoundEffect::Score);

        let played = recorder.0.borrow();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0], (SoundEffect::Jump, 4_410, 0.5));
    }
}
