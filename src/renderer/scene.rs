//! Frame draw list
//!
//! Builds one triangle list per frame from the game state, back to front.
//! Text (HUD values, banners, help lines) is left to the host.

use glam::Vec2;

use super::shapes::{circle, ellipse, line, rect, ring};
use super::vertex::{Vertex, colors, rgba};
use crate::config::GameConfig;
use crate::settings::Settings;
use crate::sim::{GameState, Marble, Mode, Target};

const CIRCLE_SEGMENTS: u32 = 32;
const FLOOR_HEIGHT: f32 = 60.0;
const OUTLINE_WIDTH: f32 = 2.0;
const AIM_LINE_WIDTH: f32 = 3.0;

/// Build the full draw list for the current frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let config = &state.config;
    let mut out = Vec::new();

    draw_background(&mut out, config, settings);
    draw_hud_icons(&mut out, config);

    match state.mode {
        Mode::Help => {
            draw_overlay(&mut out, config, settings);
            // Example marbles next to the instructions
            for (i, color) in config.palette.marbles.iter().take(3).enumerate() {
                let pos = Vec2::new(
                    config.field.width / 2.0 + 50.0 + i as f32 * 40.0,
                    config.field.height * 0.58,
                );
                out.extend(circle(pos, config.levels.marble_radius, rgba(*color, 1.0), CIRCLE_SEGMENTS));
            }
            draw_help_icon(&mut out, config);
        }
        Mode::Paused => draw_overlay(&mut out, config, settings),
        Mode::Normal | Mode::Aiming(_) => {
            for marble in &state.session.marbles {
                draw_marble(&mut out, marble);
            }
            for target in &state.session.targets {
                draw_target(&mut out, target, config);
            }
            if let Some((anchor, end)) = state.aim_line().filter(|_| settings.aim_guide) {
                out.extend(line(
                    anchor,
                    end,
                    AIM_LINE_WIDTH,
                    rgba(config.palette.aim_line, 1.0),
                ));
            }
        }
    }

    out
}

fn draw_background(out: &mut Vec<Vertex>, config: &GameConfig, settings: &Settings) {
    let (w, h) = (config.field.width, config.field.height);
    out.extend(rect(Vec2::ZERO, Vec2::new(w, h), rgba(config.palette.background, 1.0)));

    let decor = settings.effective_background_decor();
    if decor {
        // Aurora bands across the top
        let mut x = 0u32;
        while (x as f32) < w {
            let color = [30, (40 + (x / 10) % 80) as u8, (60 + (x / 5) % 100) as u8];
            out.extend(ellipse(
                Vec2::new(x as f32 + 100.0, 60.0),
                Vec2::new(100.0, 60.0),
                rgba(color, 1.0),
                CIRCLE_SEGMENTS,
            ));
            x += 60;
        }
    }

    out.extend(rect(
        Vec2::new(0.0, h - FLOOR_HEIGHT),
        Vec2::new(w, FLOOR_HEIGHT),
        rgba(config.palette.floor, 1.0),
    ));

    if decor {
        for (i, color) in config.palette.marbles.iter().cycle().take(8).enumerate() {
            out.extend(circle(
                Vec2::new(100.0 + i as f32 * 100.0, h - 30.0),
                15.0,
                rgba(*color, 1.0),
                CIRCLE_SEGMENTS,
            ));
        }
    }
}

fn draw_hud_icons(out: &mut Vec<Vertex>, config: &GameConfig) {
    draw_help_icon(out, config);

    // Pause: two bars at the edges of the hit box
    let controls = &config.controls;
    let color = rgba(config.palette.hud_icon, 1.0);
    let height = controls.pause_max.y - controls.pause_min.y;
    out.extend(rect(controls.pause_min, Vec2::new(8.0, height), color));
    out.extend(rect(
        Vec2::new(controls.pause_max.x - 8.0, controls.pause_min.y),
        Vec2::new(8.0, height),
        color,
    ));
}

fn draw_help_icon(out: &mut Vec<Vertex>, config: &GameConfig) {
    let c = config.controls.help_center;
    out.extend(circle(
        c,
        config.controls.help_radius,
        rgba(config.palette.hud_icon, 1.0),
        CIRCLE_SEGMENTS,
    ));
    // Exclamation-style glyph
    out.extend(line(
        c - Vec2::new(0.0, 10.0),
        c + Vec2::new(0.0, 10.0),
        3.0,
        colors::BLACK,
    ));
    out.extend(circle(c + Vec2::new(0.0, 15.0), 3.0, colors::BLACK, 8));
}

fn draw_overlay(out: &mut Vec<Vertex>, config: &GameConfig, settings: &Settings) {
    out.extend(rect(
        Vec2::ZERO,
        Vec2::new(config.field.width, config.field.height),
        [0.0, 0.0, 0.0, settings.overlay_opacity.clamp(0.0, 1.0)],
    ));
}

fn draw_marble(out: &mut Vec<Vertex>, marble: &Marble) {
    out.extend(circle(marble.pos, marble.radius, rgba(marble.color, 1.0), CIRCLE_SEGMENTS));
    let r = marble.radius / 2.0;
    out.extend(ring(marble.pos, r - OUTLINE_WIDTH, r, colors::WHITE, CIRCLE_SEGMENTS));
}

fn draw_target(out: &mut Vec<Vertex>, target: &Target, config: &GameConfig) {
    out.extend(circle(target.pos, target.radius, rgba(target.color, 1.0), CIRCLE_SEGMENTS));
    let r = target.radius / 2.0;
    out.extend(ring(target.pos, r - OUTLINE_WIDTH, r, colors::BLACK, CIRCLE_SEGMENTS));
    if target.hit {
        out.extend(circle(
            target.pos,
            target.radius / 3.0,
            rgba(config.palette.hit_marker, 1.0),
            CIRCLE_SEGMENTS,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Aim;

    const CIRCLE: usize = CIRCLE_SEGMENTS as usize * 3;
    const RING: usize = CIRCLE_SEGMENTS as usize * 6;

    fn plain_settings() -> Settings {
        Settings {
            background_decor: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_hit_target_adds_marker() {
        let mut state = GameState::new(GameConfig::default());
        let settings = plain_settings();
        let before = build_scene(&state, &settings).len();
        state.session.targets[0].hit = true;
        let after = build_scene(&state, &settings).len();
        assert_eq!(after - before, CIRCLE);
    }

    #[test]
    fn test_paused_hides_gameplay() {
        let mut state = GameState::new(GameConfig::default());
        let settings = plain_settings();
        let playing = build_scene(&state, &settings).len();
        state.mode = Mode::Paused;
        let paused = build_scene(&state, &settings).len();

        let marbles = state.session.marbles.len() * (CIRCLE + RING);
        let targets = state.session.targets.len() * (CIRCLE + RING);
        assert_eq!(playing - marbles - targets + 6, paused);
    }

    #[test]
    fn test_aim_line_respects_setting() {
        let mut state = GameState::new(GameConfig::default());
        let anchor = state.session.marbles[0].pos;
        state.mode = Mode::Aiming(Aim {
            marble: 0,
            anchor,
            end: anchor + Vec2::new(-40.0, 30.0),
        });
        let with_guide = build_scene(&state, &plain_settings()).len();
        let without = build_scene(
            &state,
            &Settings {
                aim_guide: false,
                ..plain_settings()
            },
        )
        .len();
        assert_eq!(with_guide - without, 6);
    }

    #[test]
    fn test_decor_adds_geometry() {
        let state = GameState::new(GameConfig::default());
        let plain = build_scene(&state, &plain_settings()).len();
        let decorated = build_scene(&state, &Settings::default()).len();
        // 15 aurora ellipses and 8 floor marbles on a 900px field
        assert_eq!(decorated - plain, 23 * CIRCLE);
    }

    #[test]
    fn test_overlay_uses_opacity_setting() {
        let mut state = GameState::new(GameConfig::default());
        state.mode = Mode::Paused;
        let settings = Settings {
            overlay_opacity: 0.25,
            ..plain_settings()
        };
        let verts = build_scene(&state, &settings);
        assert_eq!(verts.last().map(|v| v.color[3]), Some(0.25));
    }
}
