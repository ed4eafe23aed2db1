//! Frame driver
//!
//! Turns variable host frame times into fixed simulation ticks, feeds queued
//! input into the first tick of each frame and routes events to audio.

use crate::audio::{AudioManager, SoundBackend};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Vertex, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Hud, InputEvent, TickInput, plan_shot, tick};

/// Longest frame time accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-rate accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Number of ticks to run for a frame that took `dt` seconds
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        // Drop backlog we refused to simulate
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }
}

/// Game instance holding all state
pub struct Game<B: SoundBackend> {
    pub state: GameState,
    pub settings: Settings,
    audio: AudioManager<B>,
    stepper: FixedStep,
    input: TickInput,
    /// Let the demo player take shots
    pub autopilot: bool,
}

impl<B: SoundBackend> Game<B> {
    pub fn new(state: GameState, settings: Settings, backend: Option<B>) -> Self {
        let audio = AudioManager::with_settings(backend, &settings);
        Self {
            state,
            settings,
            audio,
            stepper: FixedStep::default(),
            input: TickInput::default(),
            autopilot: false,
        }
    }

    /// Queue an input event for the next tick
    pub fn queue(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    /// Run the ticks owed for a frame of `dt` seconds; returns the events produced
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let ticks = self.stepper.advance(dt);
        let mut events = Vec::new();

        for _ in 0..ticks {
            if !self.state.running {
                break;
            }
            if self.autopilot {
                if let Some(gesture) = plan_shot(&self.state) {
                    self.input.events.extend(gesture);
                }
            }

            tick(&mut self.state, &self.input);
            // Clear one-shot inputs after processing
            self.input.clear();

            let produced = self.state.drain_events();
            self.audio.handle_events(&produced);
            events.extend(produced);
        }

        events
    }

    /// Draw list for the current state
    pub fn draw_list(&self) -> Vec<Vertex> {
        build_scene(&self.state, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentBackend;
    use crate::config::GameConfig;
    use crate::sim::Mode;

    fn game() -> Game<SilentBackend> {
        let config = GameConfig {
            result_pause_ticks: 0,
            ..Default::default()
        };
        Game::new(GameState::new(config), Settings::default(), Some(SilentBackend))
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut stepper = FixedStep::new(0.01, 8);
        assert_eq!(stepper.advance(0.005), 0);
        assert_eq!(stepper.advance(0.006), 1);
        assert_eq!(stepper.advance(0.02), 2);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut stepper = FixedStep::new(0.01, 4);
        assert_eq!(stepper.advance(10.0), 4);
        // Backlog is dropped rather than replayed
        assert!(stepper.advance(0.0) <= 1);
    }

    #[test]
    fn test_queued_input_applies_once() {
        let mut game = game();
        game.queue(InputEvent::TogglePause);
        game.frame(SIM_DT * 3.0);
        assert_eq!(game.state.mode, Mode::Paused);
        game.frame(SIM_DT);
        assert_eq!(game.state.mode, Mode::Paused);
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut game = game();
        game.queue(InputEvent::Quit);
        let events = game.frame(SIM_DT);
        assert!(!game.is_running());
        assert!(events.contains(&GameEvent::Quit));
        assert!(game.frame(SIM_DT).is_empty());
    }

    #[test]
    fn test_autopilot_takes_shots() {
        let mut game = game();
        game.autopilot = true;
        let events = game.frame(SIM_DT * 1.5);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Launched { .. })));
        assert_eq!(game.hud().shots_remaining, 5);
        assert!(!game.draw_list().is_empty());
    }
}
