//! Grid snake simulation
//!
//! Ticks on a fixed interval. The head advances one cell per tick in the
//! current direction; leaving the grid or biting the body ends the run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{RunPhase, TickOutcome};
use crate::tuning::SnakeTuning;

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_grid(&self, tile_count: i32) -> bool {
        (0..tile_count).contains(&self.x) && (0..tile_count).contains(&self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Movement direction (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a keyboard key (WASD or arrows) to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Direction::Up),
            "s" | "arrowdown" => Some(Direction::Down),
            "a" | "arrowleft" => Some(Direction::Left),
            "d" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Complete snake state
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub phase: RunPhase,
    /// Head first
    pub body: Vec<Cell>,
    /// Direction of the last move (`None` until the first input)
    pub direction: Option<Direction>,
    /// Input waiting for the next tick
    pub queued: Option<Direction>,
    pub food: Cell,
    pub score: u64,
    pub tuning: SnakeTuning,
    rng: Pcg32,
}

impl SnakeState {
    pub fn new(seed: u64, tuning: SnakeTuning) -> Self {
        Self {
            phase: RunPhase::Idle,
            body: vec![tuning.start.into()],
            direction: None,
            queued: None,
            food: tuning.first_food.into(),
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    fn clear_run(&mut self) {
        self.body = vec![self.tuning.start.into()];
        self.direction = None;
        self.queued = None;
        self.score = 0;
        // Board is nearly empty here so placement always succeeds
        if let Some(food) = self.roll_food() {
            self.food = food;
        }
    }

    /// Begin a fresh run
    pub fn start(&mut self) {
        self.clear_run();
        self.phase = RunPhase::Running;
        log::debug!("Snake run started");
    }

    /// Back to idle with a fresh board
    pub fn reset(&mut self) {
        self.clear_run();
        self.phase = RunPhase::Idle;
    }

    /// Queue a direction change for the next tick
    ///
    /// Rejected when not running or when it would reverse the last move.
    pub fn queue_direction(&mut self, dir: Direction) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        if self.direction.is_some_and(|current| current.opposite() == dir) {
            return false;
        }
        self.queued = Some(dir);
        true
    }

    /// Pick a uniformly random cell not covered by the snake
    fn roll_food(&mut self) -> Option<Cell> {
        let n = self.tuning.tile_count;
        let free: Vec<Cell> = (0..n)
            .flat_map(|y| (0..n).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.body.contains(c))
            .collect();
        if free.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..free.len());
        Some(free[index])
    }

    fn end(&mut self, reason: &str) -> TickOutcome {
        self.phase = RunPhase::Ended;
        log::info!("Snake run ended ({reason}) with score {}", self.score);
        TickOutcome::Ended { score: self.score }
    }
}

/// Advance the snake by one tick
pub fn tick(state: &mut SnakeState) -> TickOutcome {
    if !state.phase.is_running() {
        return TickOutcome::Inactive;
    }

    if let Some(dir) = state.queued.take() {
        state.direction = Some(dir);
    }
    let Some(dir) = state.direction else {
        // Waiting for the first input
        return TickOutcome::Advanced;
    };

    let head = state.head().step(dir);

    if !head.in_grid(state.tuning.tile_count) {
        return state.end("wall");
    }
    if state.occupies(head) {
        return state.end("self");
    }

    state.body.insert(0, head);

    if head == state.food {
        state.score += state.tuning.food_points;
        match state.roll_food() {
            Some(food) => state.food = food,
            None => return state.end("board full"),
        }
    } else {
        state.body.pop();
    }

    TickOutcome::Advanced
}
