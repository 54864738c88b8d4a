//! Endless-runner simulation
//!
//! One tick per display frame. The player jumps over obstacles that
//! scroll in from the right; the run ends on the first overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::aabb_overlap;
use super::state::{Rect, RunPhase, TickOutcome};
use crate::consts::*;
use crate::tuning::DinoTuning;

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dino {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, negative is up)
    pub vel_y: f32,
    pub airborne: bool,
}

impl Dino {
    pub fn new(rest_y: f32) -> Self {
        Self {
            pos: Vec2::new(DINO_X, rest_y),
            size: Vec2::splat(DINO_SIZE),
            vel_y: 0.0,
            airborne: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Integrate one tick of gravity, landing on `rest_y`
    pub fn apply_gravity(&mut self, gravity: f32, rest_y: f32) {
        if !self.airborne {
            return;
        }
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed captured when spawned (pixels/tick)
    pub speed: f32,
}

impl Obstacle {
    pub fn spawn_at(x: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, OBSTACLE_Y),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Trailing edge has left the field
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct DinoInput {
    pub jump: bool,
}

/// Complete runner state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DinoState {
    pub phase: RunPhase,
    pub dino: Dino,
    /// Ordered by spawn time (oldest first)
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Speed given to newly spawned obstacles
    pub speed: f32,
    pub tuning: DinoTuning,
}

impl Default for DinoState {
    fn default() -> Self {
        Self::new(DinoTuning::default())
    }
}

impl DinoState {
    pub fn new(tuning: DinoTuning) -> Self {
        Self {
            phase: RunPhase::Idle,
            dino: Dino::new(tuning.rest_y),
            obstacles: Vec::new(),
            score: 0,
            speed: tuning.base_speed,
            tuning,
        }
    }

    /// Clear entities and zero the score, keeping tuning
    fn clear_run(&mut self) {
        self.dino = Dino::new(self.tuning.rest_y);
        self.obstacles.clear();
        self.score = 0;
        self.speed = self.tuning.base_speed;
    }

    /// Begin a fresh run (from idle, or "play again" after a run ended)
    pub fn start(&mut self) {
        self.clear_run();
        self.phase = RunPhase::Running;
        log::debug!("Dino run started");
    }

    /// Back to idle with fresh entities
    pub fn reset(&mut self) {
        self.clear_run();
        self.phase = RunPhase::Idle;
    }

    /// Start a jump. Ignored unless running and grounded.
    pub fn jump(&mut self) -> bool {
        if !self.phase.is_running() || self.dino.airborne {
            return false;
        }
        self.dino.vel_y = self.tuning.jump_impulse;
        self.dino.airborne = true;
        true
    }

    /// Spawn a new obstacle at the right edge if the field has room
    fn maybe_spawn(&mut self) {
        if !self.tuning.spawn_obstacles {
            return;
        }
        let threshold = self.tuning.field_width - self.tuning.spawn_gap;
        let room = match self.obstacles.last() {
            None => true,
            Some(last) => last.pos.x < threshold,
        };
        if room {
            self.obstacles
                .push(Obstacle::spawn_at(self.tuning.field_width, self.speed));
        }
    }

    pub fn collides(&self) -> bool {
        let player = self.dino.bounds();
        self.obstacles
            .iter()
            .any(|o| aabb_overlap(&player, &o.bounds()))
    }
}

/// Advance the runner by one tick
pub fn tick(state: &mut DinoState, input: &DinoInput) -> TickOutcome {
    if !state.phase.is_running() {
        return TickOutcome::Inactive;
    }

    if input.jump {
        state.jump();
    }

    // Physics
    let (gravity, rest_y) = (state.tuning.gravity, state.tuning.rest_y);
    state.dino.apply_gravity(gravity, rest_y);

    // Scroll and recycle obstacles
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= obstacle.speed;
    }
    state.obstacles.retain(|o| !o.is_off_screen());
    state.maybe_spawn();

    // Terminal check happens before this tick's score
    if state.collides() {
        state.phase = RunPhase::Ended;
        log::info!("Dino run ended with score {}", state.score);
        return TickOutcome::Ended { score: state.score };
    }

    state.score += 1;
    if state.tuning.speed_ramp_every > 0 && state.score % state.tuning.speed_ramp_every == 0 {
        state.speed += state.tuning.speed_step;
        log::debug!("Dino speed now {}", state.speed);
    }

    TickOutcome::Advanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(tuning: DinoTuning) -> DinoState {
        let mut state = DinoState::new(tuning);
        state.start();
        state
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut state = DinoState::default();
        assert_eq!(tick(&mut state, &DinoInput::default()), TickOutcome::Inactive);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_thousand_ticks_without_obstacles() {
        let mut state = running(DinoTuning::without_obstacles());
        for _ in 0..1000 {
            assert_eq!(tick(&mut state, &DinoInput::default()), TickOutcome::Advanced);
        }
        assert_eq!(state.score, 1000);
        assert_eq!(state.dino.pos.y, DINO_REST_Y);
        assert!(!state.dino.airborne);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_velocity_grows_by_gravity_while_airborne() {
        let mut state = running(DinoTuning::without_obstacles());
        assert!(state.jump());

        let mut last_vel = state.dino.vel_y;
        let mut airborne_ticks = 0;
        while state.dino.airborne {
            tick(&mut state, &DinoInput::default());
            if state.dino.airborne {
                assert!((state.dino.vel_y - (last_vel + GRAVITY)).abs() < 1e-4);
                assert!(state.dino.vel_y > last_vel);
                last_vel = state.dino.vel_y;
            }
            airborne_ticks += 1;
            assert!(airborne_ticks < 100, "never landed");
        }

        assert_eq!(state.dino.pos.y, DINO_REST_Y);
        assert_eq!(state.dino.vel_y, 0.0);
    }

    #[test]
    fn test_jump_rejected_when_airborne_or_not_running() {
        let mut idle = DinoState::default();
        assert!(!idle.jump());
        assert!(!idle.dino.airborne);

        let mut state = running(DinoTuning::without_obstacles());
        assert!(state.jump());
        tick(&mut state, &DinoInput::default());
        let vel = state.dino.vel_y;
        assert!(!state.jump());
        assert_eq!(state.dino.vel_y, vel);
    }

    #[test]
    fn test_first_tick_spawns_at_right_edge() {
        let mut state = running(DinoTuning::default());
        tick(&mut state, &DinoInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, DINO_FIELD_WIDTH);
        assert_eq!(state.obstacles[0].speed, BASE_SPEED);
    }

    #[test]
    fn test_spawn_waits_for_gap() {
        let mut state = running(DinoTuning::default());
        tick(&mut state, &DinoInput::default());
        // Last obstacle at 600 - 3n; needs x < 400 before the next spawn
        for _ in 0..66 {
            tick(&mut state, &DinoInput::default());
            assert_eq!(state.obstacles.len(), 1);
        }
        tick(&mut state, &DinoInput::default());
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_off_screen_obstacle_removed_next_tick() {
        let mut state = running(DinoTuning::without_obstacles());
        // Trailing edge reaches exactly 0 after one tick
        state.obstacles.push(Obstacle::spawn_at(-17.0, 3.0));
        state.obstacles.push(Obstacle::spawn_at(-16.0, 3.0));
        tick(&mut state, &DinoInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, -19.0);
        tick(&mut state, &DinoInput::default());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_collision_ends_run_before_score() {
        let mut state = running(DinoTuning::without_obstacles());
        state.score = 41;
        // Moves to x = 60 this tick, overlapping the player at 50..90
        state.obstacles.push(Obstacle::spawn_at(63.0, 3.0));
        let outcome = tick(&mut state, &DinoInput::default());
        assert_eq!(outcome, TickOutcome::Ended { score: 41 });
        assert_eq!(state.phase, RunPhase::Ended);
        assert_eq!(state.score, 41);

        // Frozen once ended
        assert_eq!(tick(&mut state, &DinoInput::default()), TickOutcome::Inactive);
        assert_eq!(state.obstacles[0].pos.x, 60.0);
    }

    #[test]
    fn test_touching_obstacle_is_not_a_collision() {
        let mut state = running(DinoTuning::without_obstacles());
        // Lands exactly on the player's right edge (x = 90)
        state.obstacles.push(Obstacle::spawn_at(93.0, 3.0));
        assert_eq!(tick(&mut state, &DinoInput::default()), TickOutcome::Advanced);
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let mut state = running(DinoTuning::without_obstacles());
        // Passes under the player between ticks 10 and 30 of a 37 tick jump
        state.obstacles.push(Obstacle::spawn_at(120.0, 3.0));
        assert_eq!(tick(&mut state, &DinoInput { jump: true }), TickOutcome::Advanced);
        for _ in 0..59 {
            assert_eq!(tick(&mut state, &DinoInput::default()), TickOutcome::Advanced);
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.obstacles.is_empty());
        assert!(!state.dino.airborne);
    }

    #[test]
    fn test_speed_ramps_every_500_points() {
        let mut state = running(DinoTuning::without_obstacles());
        for _ in 0..499 {
            tick(&mut state, &DinoInput::default());
        }
        assert_eq!(state.speed, BASE_SPEED);
        tick(&mut state, &DinoInput::default());
        assert_eq!(state.speed, BASE_SPEED + SPEED_STEP);
        for _ in 0..500 {
            tick(&mut state, &DinoInput::default());
        }
        assert_eq!(state.speed, BASE_SPEED + 2.0 * SPEED_STEP);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = running(DinoTuning::default());
        for _ in 0..300 {
            tick(&mut state, &DinoInput { jump: true });
        }
        assert!(state.score > 0);

        state.start();
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.speed, BASE_SPEED);
        assert_eq!(state.dino, Dino::new(DINO_REST_Y));

        state.reset();
        assert_eq!(state.phase, RunPhase::Idle);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(jumps in proptest::collection::vec(any::<bool>(), 1..600)) {
            let mut state = running(DinoTuning::default());
            let mut last = state.score;
            for jump in jumps {
                tick(&mut state, &DinoInput { jump });
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
