//! Marble Master headless runner
//!
//! Runs the simulation without a window, optionally letting the demo player
//! take every shot, and logs what happens. Useful for balancing levels and
//! checking that a config file plays.

use std::path::PathBuf;

use clap::Parser;

use marble_master::audio::{SoundBackend, SoundEffect};
use marble_master::consts::{SIM_DT, TICKS_PER_SECOND};
use marble_master::runner::Game;
use marble_master::sim::{GameEvent, GameState};
use marble_master::{AudioError, GameConfig, Settings};

#[derive(Parser, Debug)]
#[command(name = "marble-master", about = "Run Marble Master headless")]
struct Args {
    /// JSON game config (defaults are used if missing or invalid)
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Level to start on
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Frames to simulate
    #[arg(long, default_value_t = 60 * TICKS_PER_SECOND)]
    frames: u32,
    /// Disable the demo player (nothing will be launched)
    #[arg(long)]
    no_autopilot: bool,
    /// Directory holding shoot.wav / hit.wav / win.wav / lose.wav
    #[arg(long)]
    sounds: Option<PathBuf>,
}

/// Stands in for a real mixer: "plays" a cue if its sample file exists
struct SampleDirBackend {
    dir: PathBuf,
}

impl SoundBackend for SampleDirBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        let path = self.dir.join(effect.file_name());
        if !path.is_file() {
            return Err(AudioError::MissingAsset(effect));
        }
        log::info!("♪ {} at {:.0}%", path.display(), volume * 100.0);
        Ok(())
    }
}

fn load_settings(path: Option<&PathBuf>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Settings::from_json(&json).unwrap_or_else(|err| {
            log::warn!("invalid settings {}: {err}; using defaults", path.display());
            Settings::default()
        }),
        Err(err) => {
            log::warn!("failed to read settings {}: {err}; using defaults", path.display());
            Settings::default()
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Marble Master (headless) starting...");

    let config = args
        .config
        .as_ref()
        .map(|path| GameConfig::load_or_default(path))
        .unwrap_or_default();
    let settings = load_settings(args.settings.as_ref());
    let backend = args.sounds.map(|dir| SampleDirBackend { dir });

    let mut game = Game::new(GameState::with_level(config, args.level), settings, backend);
    game.autopilot = !args.no_autopilot;

    let mut shots = 0u32;
    let mut wins = 0u32;
    let mut losses = 0u32;
    for _ in 0..args.frames {
        if !game.is_running() {
            break;
        }
        for event in game.frame(SIM_DT) {
            match event {
                GameEvent::Launched { .. } => shots += 1,
                GameEvent::LevelWon { .. } => wins += 1,
                GameEvent::LevelLost { .. } => losses += 1,
                _ => {}
            }
        }
    }

    let hud = game.hud();
    println!(
        "level {}/{}  score {}  shots {}  won {}  lost {}",
        hud.level, hud.max_level, hud.score, shots, wins, losses
    );
}
