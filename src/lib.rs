//! Portfolio Arcade - mini-games and leaderboard for a portfolio page
//!
//! Core modules:
//! - `sim`: Deterministic game simulations (dino runner, snake, tic-tac-toe)
//! - `renderer`: Draw-command scenes and the canvas 2D backend
//! - `flow`: Score submission and leaderboard screen state machine
//! - `leaderboard`: Score records shared by client and server
//! - `platform`: Browser scheduling, fetch and storage (wasm only)
//! - `server`: JSON API and score repositories (native only)
//! - `tuning`: Data-driven game balance

pub mod flow;
pub mod leaderboard;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use flow::{ApiError, Screen, ScoreFlow};
pub use leaderboard::{LeaderboardEntry, NewScore, ValidationError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Dino field dimensions (canvas pixels)
    pub const DINO_FIELD_WIDTH: f32 = 600.0;
    pub const DINO_FIELD_HEIGHT: f32 = 200.0;
    /// Top of the drawn ground strip
    pub const DINO_GROUND_Y: f32 = 180.0;

    /// Player defaults
    pub const DINO_X: f32 = 50.0;
    /// Resting y of the player's top edge (feet on the ground strip)
    pub const DINO_REST_Y: f32 = 150.0;
    pub const DINO_SIZE: f32 = 40.0;

    /// Per-tick downward acceleration while airborne
    pub const GRAVITY: f32 = 0.8;
    /// Velocity applied on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Obstacle defaults
    pub const OBSTACLE_Y: f32 = 160.0;
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Next obstacle spawns once the last one is this far from the right edge
    pub const OBSTACLE_SPAWN_GAP: f32 = 200.0;

    /// Obstacle speed ramp
    pub const BASE_SPEED: f32 = 3.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const SPEED_RAMP_EVERY: u64 = 500;

    /// Snake grid
    pub const SNAKE_TILE_COUNT: i32 = 20;
    pub const SNAKE_TILE_PX: f32 = 16.0;
    pub const SNAKE_START: (i32, i32) = (10, 10);
    pub const SNAKE_FOOD_START: (i32, i32) = (15, 15);
    pub const SNAKE_FOOD_POINTS: u64 = 10;
    /// Fixed delay between snake ticks
    pub const SNAKE_TICK_MS: u32 = 150;

    /// Leaderboard
    pub const LEADERBOARD_SIZE: usize = 10;
    pub const MAX_PLAYER_NAME_CHARS: usize = 20;
}
