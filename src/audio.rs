//! Sound cue routing
//!
//! The simulation only emits events; this module turns them into sound
//! effects and hands them to whatever backend the host provides. A missing
//! backend or a missing sample is never an error for the game.

use crate::error::AudioError;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Marble launched
    Launch,
    /// Target hit
    Hit,
    /// Level complete
    Win,
    /// Out of shots
    Lose,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [Self::Launch, Self::Hit, Self::Win, Self::Lose];

    /// Cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Launched { .. } => Some(Self::Launch),
            GameEvent::TargetHit { .. } => Some(Self::Hit),
            GameEvent::LevelWon { .. } => Some(Self::Win),
            GameEvent::LevelLost { .. } => Some(Self::Lose),
            _ => None,
        }
    }

    /// Conventional sample file name
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Launch => "shoot.wav",
            Self::Hit => "hit.wav",
            Self::Win => "win.wav",
            Self::Lose => "lose.wav",
        }
    }
}

/// Host-provided sound output
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl SoundBackend for SilentBackend {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend> {
    backend: Option<B>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: Option<B>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn with_settings(backend: Option<B>, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.apply_settings(settings);
        manager
    }

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

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    fn effective_volume(&self) -> f32 {
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
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        match backend.play(effect, vol) {
            Ok(()) => {}
            Err(err @ AudioError::MissingAsset(_)) => {
                log::debug!("skipping sound: {err}");
            }
            Err(err @ AudioError::DeviceUnavailable(_)) => {
                log::warn!("{err} - audio disabled");
                self.backend = None;
            }
        }
    }

    /// Play the cue for every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what was played; can pretend samples or the device are missing
    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32)>,
        missing: Vec<SoundEffect>,
        device_gone: bool,
    }

    impl SoundBackend for &mut Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
            if self.device_gone {
                return Err(AudioError::DeviceUnavailable("unplugged".into()));
            }
            if self.missing.contains(&effect) {
                return Err(AudioError::MissingAsset(effect));
            }
            self.played.push((effect, volume));
            Ok(())
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut recorder = Recorder::default();
        let mut audio = AudioManager::new(Some(&mut recorder));
        audio.handle_events(&[
            GameEvent::Launched {
                marble: 0,
                angle: 0.0,
                power: 10.0,
            },
            GameEvent::TargetHit { target: 1, score: 100 },
            GameEvent::LevelLoaded { level: 2 },
            GameEvent::LevelWon { level: 1 },
        ]);
        drop(audio);
        let effects: Vec<_> = recorder.played.iter().map(|(e, _)| *e).collect();
        assert_eq!(effects, vec![SoundEffect::Launch, SoundEffect::Hit, SoundEffect::Win]);
    }

    #[test]
    fn test_missing_asset_is_skipped() {
        let mut recorder = Recorder {
            missing: vec![SoundEffect::Hit],
            ..Default::default()
        };
        let mut audio = AudioManager::new(Some(&mut recorder));
        audio.play(SoundEffect::Hit);
        audio.play(SoundEffect::Lose);
        assert!(audio.is_enabled());
        drop(audio);
        assert_eq!(recorder.played.len(), 1);
        assert_eq!(recorder.played[0].0, SoundEffect::Lose);
    }

    #[test]
    fn test_lost_device_disables_audio() {
        let mut recorder = Recorder {
            device_gone: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Some(&mut recorder));
        audio.play(SoundEffect::Launch);
        assert!(!audio.is_enabled());
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut recorder = Recorder::default();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::with_settings(Some(&mut recorder), &settings);
        audio.play(SoundEffect::Win);
        drop(audio);
        assert!(recorder.played.is_empty());
    }

    #[test]
    fn test_settings_volume_is_clamped() {
        let mut recorder = Recorder::default();
        let settings = Settings {
            master_volume: 2.0,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let mut audio = AudioManager::with_settings(Some(&mut recorder), &settings);
        audio.play(SoundEffect::Hit);
        drop(audio);
        assert_eq!(recorder.played, vec![(SoundEffect::Hit, 0.5)]);
    }

    #[test]
    fn test_no_backend_is_noop() {
        let mut audio: AudioManager<SilentBackend> = AudioManager::new(None);
        audio.play(SoundEffect::Launch);
        assert!(!audio.is_enabled());
    }

    #[test]
    fn test_file_names_are_distinct() {
        let mut names: Vec<_> = SoundEffect::ALL.iter().map(|e| e.file_name()).collect();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
