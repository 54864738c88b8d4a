//! Shared simulation types
//!
//! Run phases, bounding boxes and per-tick outcomes used by every game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for a start command
    #[default]
    Idle,
    /// Ticks advance the simulation
    Running,
    /// A terminal condition fired; state is frozen until start/reset
    Ended,
}

impl RunPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, RunPhase::Running)
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run is not in progress, nothing changed
    Inactive,
    /// State advanced and the run continues
    Advanced,
    /// State advanced into a terminal condition
    Ended { score: u64 },
}

/// Axis-aligned rectangle in canvas space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}
