//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per scheduler callback, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod dino;
pub mod snake;
pub mod state;
pub mod tictactoe;

pub use collision::aabb_overlap;
pub use dino::{Dino, DinoInput, DinoState, Obstacle};
pub use snake::{Cell, Direction, SnakeState};
pub use state::{Rect, RunPhase, TickOutcome};
pub use tictactoe::{Board, Mark, MoveError, Outcome};
