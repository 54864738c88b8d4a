//! Data-driven game balance
//!
//! Defaults reproduce the shipped feel of each game. Tests and the page
//! can override individual values (e.g. disable obstacle spawning).

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Dino runner balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DinoTuning {
    pub field_width: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub rest_y: f32,
    pub spawn_gap: f32,
    pub base_speed: f32,
    pub speed_step: f32,
    /// Score interval between speed increases
    pub speed_ramp_every: u64,
    /// When false no obstacles are ever spawned
    pub spawn_obstacles: bool,
}

impl Default for DinoTuning {
    fn default() -> Self {
        Self {
            field_width: DINO_FIELD_WIDTH,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            rest_y: DINO_REST_Y,
            spawn_gap: OBSTACLE_SPAWN_GAP,
            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            speed_ramp_every: SPEED_RAMP_EVERY,
            spawn_obstacles: true,
        }
    }
}

impl DinoTuning {
    /// Balance with obstacle spawning switched off
    pub fn without_obstacles() -> Self {
        Self {
            spawn_obstacles: false,
            ..Self::default()
        }
    }
}

/// Snake balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    /// Grid is `tile_count` x `tile_count` cells
    pub tile_count: i32,
    pub food_points: u64,
    pub start: (i32, i32),
    pub first_food: (i32, i32),
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            tile_count: SNAKE_TILE_COUNT,
            food_points: SNAKE_FOOD_POINTS,
            start: SNAKE_START,
            first_food: SNAKE_FOOD_START,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_tuning_json_keeps_defaults() {
        let tuning: DinoTuning = serde_json::from_str(r#"{"spawn_obstacles": false}"#).unwrap();
        assert!(!tuning.spawn_obstacles);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.speed_ramp_every, SPEED_RAMP_EVERY);
    }

    #[test]
    fn test_snake_defaults() {
        let tuning = SnakeTuning::default();
        assert_eq!(tuning.tile_count, 20);
        assert_eq!(tuning.food_points, 10);
    }
}
