//! Deterministic level layouts
//!
//! A level is a pure function of its index: the same index always yields
//! the same marbles and targets.

use glam::Vec2;

use super::state::{Marble, Target};
use crate::config::{GameConfig, LevelConfig};

/// Marbles, targets and shot budget for one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub shot_budget: u32,
    pub marbles: Vec<Marble>,
    pub targets: Vec<Target>,
}

/// Shots allowed on `level`: one more every `shots_step` levels
pub fn shot_budget(level: u32, levels: &LevelConfig) -> u32 {
    levels.base_shots + level.checked_div(levels.shots_step).unwrap_or(0)
}

/// Targets placed on `level`: one more every `targets_step` levels
pub fn target_count(level: u32, levels: &LevelConfig) -> u32 {
    levels.base_targets + level.checked_div(levels.targets_step).unwrap_or(0)
}

/// Build the layout for `level`
pub fn generate(level: u32, config: &GameConfig) -> LevelLayout {
    let levels = &config.levels;
    let shots = shot_budget(level, levels);

    // Launch row, centered on the field with integer halving of the count
    let row_y = config.field.height - levels.marble_row_offset;
    let center_x = config.field.width / 2.0;
    let half = (shots / 2) as i64;
    let marbles = (0..shots)
        .map(|i| {
            let x = center_x + (i as i64 - half) as f32 * levels.marble_gap;
            let color = palette_color(&config.palette.marbles, i as usize);
            Marble::new(Vec2::new(x, row_y), levels.marble_radius, color)
        })
        .collect();

    // Targets spread across the band in a sine wave; a lone target sits at the band start
    let num_targets = target_count(level, levels);
    let intervals = num_targets.saturating_sub(1).max(1) as f32;
    let spacing = levels.target_band_width / intervals;
    let targets = (0..num_targets)
        .map(|i| {
            let x = levels.target_band_start + i as f32 * spacing;
            let y = levels.target_base_y + levels.target_amplitude * ((level + i) as f32).sin();
            let color = palette_color(&config.palette.targets, i as usize);
            Target::new(Vec2::new(x, y), levels.target_radius, color)
        })
        .collect();

    LevelLayout {
        shot_budget: shots,
        marbles,
        targets,
    }
}

fn palette_color(palette: &[[u8; 3]], index: usize) -> [u8; 3] {
    if palette.is_empty() {
        [255, 255, 255]
    } else {
        palette[index % palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_layout() {
        let config = GameConfig::default();
        let layout = generate(1, &config);

        assert_eq!(layout.shot_budget, 6);
        assert_eq!(layout.marbles.len(), 6);
        assert_eq!(layout.targets.len(), 2);

        assert_eq!(layout.targets[0].pos.x, 100.0);
        assert_eq!(layout.targets[1].pos.x, 700.0);
        assert!((layout.targets[0].pos.y - (120.0 + 60.0 * 1.0f32.sin())).abs() < 1e-4);
        assert!((layout.targets[1].pos.y - (120.0 + 60.0 * 2.0f32.sin())).abs() < 1e-4);
    }

    #[test]
    fn test_marble_row_is_centered() {
        let layout = generate(1, &GameConfig::default());
        let xs: Vec<f32> = layout.marbles.iter().map(|m| m.pos.x).collect();
        assert_eq!(xs, vec![300.0, 350.0, 400.0, 450.0, 500.0, 550.0]);
        assert!(layout.marbles.iter().all(|m| m.pos.y == 560.0 && !m.active));
    }

    #[test]
    fn test_colors_cycle() {
        let config = GameConfig::default();
        let layout = generate(49, &config);
        // 6 + 49/7 = 13 marbles over a 6-color palette
        assert_eq!(layout.marbles.len(), 13);
        assert_eq!(layout.marbles[6].color, config.palette.marbles[0]);
        assert_eq!(layout.marbles[12].color, config.palette.marbles[0]);
        // 2 + 49/5 = 11 targets over a 4-color palette
        assert_eq!(layout.targets.len(), 11);
        assert_eq!(layout.targets[5].color, config.palette.targets[1]);
    }

    #[test]
    fn test_single_target_sits_at_band_start() {
        let mut config = GameConfig::default();
        config.levels.base_targets = 1;
        let layout = generate(1, &config);
        assert_eq!(layout.targets.len(), 1);
        assert_eq!(layout.targets[0].pos.x, config.levels.target_band_start);
    }

    #[test]
    fn test_zero_targets_is_empty_not_nan() {
        let mut config = GameConfig::default();
        config.levels.base_targets = 0;
        let layout = generate(1, &config);
        assert!(layout.targets.is_empty());
    }

    #[test]
    fn test_scaling_formulas() {
        let levels = LevelConfig::default();
        assert_eq!(shot_budget(6, &levels), 6);
        assert_eq!(shot_budget(7, &levels), 7);
        assert_eq!(shot_budget(100, &levels), 20);
        assert_eq!(target_count(4, &levels), 2);
        assert_eq!(target_count(5, &levels), 3);
        assert_eq!(target_count(100, &levels), 22);
    }

    #[test]
    fn test_zero_step_does_not_divide_by_zero() {
        let levels = LevelConfig {
            shots_step: 0,
            targets_step: 0,
            ..Default::default()
        };
        assert_eq!(shot_budget(50, &levels), levels.base_shots);
        assert_eq!(target_count(50, &levels), levels.base_targets);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = GameConfig::default();
        for level in [1, 13, 57, 100] {
            assert_eq!(generate(level, &config), generate(level, &config));
        }
    }
}
