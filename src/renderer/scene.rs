//! Scene building for 2D primitives
//!
//! Turns game state into an ordered list of draw commands. Pure, so the
//! same frames can be checked in tests and replayed on a canvas.

use crate::consts::*;
use crate::sim::{DinoState, RunPhase, SnakeState};

/// CSS color string
pub type Color = &'static str;

pub const BLACK: Color = "#000000";
pub const WHITE: Color = "#ffffff";
pub const SNAKE_BLUE: Color = "#00D4FF";
pub const FOOD_GREEN: Color = "#00FF88";
pub const GAME_OVER_RED: Color = "#FF0000";

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface
    Clear { color: Color },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        /// Shadow blur radius in pixels
        glow: Option<f32>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: &'static str,
        color: Color,
        align: Align,
    },
}

/// Frame for the runner: ground, player, obstacles, score
pub fn dino_scene(state: &DinoState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(4 + state.obstacles.len());

    cmds.push(DrawCmd::Clear { color: BLACK });
    cmds.push(DrawCmd::FillRect {
        x: 0.0,
        y: DINO_GROUND_Y,
        w: DINO_FIELD_WIDTH,
        h: DINO_FIELD_HEIGHT - DINO_GROUND_Y,
        color: WHITE,
        glow: None,
    });

    let dino = &state.dino;
    cmds.push(DrawCmd::FillRect {
        x: dino.pos.x,
        y: dino.pos.y,
        w: dino.size.x,
        h: dino.size.y,
        color: WHITE,
        glow: None,
    });

    cmds.extend(state.obstacles.iter().map(|o| DrawCmd::FillRect {
        x: o.pos.x,
        y: o.pos.y,
        w: o.size.x,
        h: o.size.y,
        color: WHITE,
        glow: None,
    }));

    cmds.push(DrawCmd::Text {
        x: 10.0,
        y: 30.0,
        text: format!("Score: {}", state.score),
        font: "20px Arial",
        color: WHITE,
        align: Align::Left,
    });

    cmds
}

/// Frame for the snake grid
pub fn snake_scene(state: &SnakeState, glow: bool) -> Vec<DrawCmd> {
    let tile = SNAKE_TILE_PX;
    let side = tile * state.tuning.tile_count as f32;
    let glow_of = |blur: f32| glow.then_some(blur);

    let mut cmds = Vec::with_capacity(3 + state.body.len());
    cmds.push(DrawCmd::Clear { color: BLACK });

    cmds.extend(state.body.iter().map(|cell| DrawCmd::FillRect {
        x: cell.x as f32 * tile,
        y: cell.y as f32 * tile,
        w: tile - 2.0,
        h: tile - 2.0,
        color: SNAKE_BLUE,
        glow: glow_of(10.0),
    }));

    cmds.push(DrawCmd::FillRect {
        x: state.food.x as f32 * tile,
        y: state.food.y as f32 * tile,
        w: tile - 2.0,
        h: tile - 2.0,
        color: FOOD_GREEN,
        glow: glow_of(15.0),
    });

    if state.phase == RunPhase::Ended {
        cmds.push(DrawCmd::Text {
            x: side / 2.0,
            y: side / 2.0,
            text: "Game Over!".to_string(),
            font: "24px Inter",
            color: GAME_OVER_RED,
            align: Align::Center,
        });
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cell, Obstacle};
    use crate::tuning::{DinoTuning, SnakeTuning};

    #[test]
    fn test_dino_scene_layers() {
        let mut state = DinoState::new(DinoTuning::default());
        state.start();
        state.obstacles.push(Obstacle::spawn_at(300.0, 3.0));
        state.score = 12;

        let cmds = dino_scene(&state);
        assert_eq!(cmds.len(), 5);
        assert_eq!(cmds[0], DrawCmd::Clear { color: BLACK });
        assert!(matches!(cmds[2], DrawCmd::FillRect { x, y, .. } if x == DINO_X && y == DINO_REST_Y));
        assert!(matches!(cmds[3], DrawCmd::FillRect { x, .. } if x == 300.0));
        match &cmds[4] {
            DrawCmd::Text { text, .. } => assert_eq!(text, "Score: 12"),
            other => panic!("expected score text, got {other:?}"),
        }
    }

    #[test]
    fn test_snake_scene_cells_and_glow() {
        let mut state = SnakeState::new(1, SnakeTuning::default());
        state.body = vec![Cell::new(2, 3), Cell::new(1, 3)];
        state.food = Cell::new(5, 5);

        let cmds = snake_scene(&state, true);
        assert_eq!(cmds.len(), 4);
        assert_eq!(
            cmds[1],
            DrawCmd::FillRect {
                x: 32.0,
                y: 48.0,
                w: 14.0,
                h: 14.0,
                color: SNAKE_BLUE,
                glow: Some(10.0),
            }
        );
        assert!(matches!(cmds[3], DrawCmd::FillRect { x, color: FOOD_GREEN, glow: Some(_), .. } if x == 80.0));

        let plain = snake_scene(&state, false);
        assert!(plain
            .iter()
            .all(|c| !matches!(c, DrawCmd::FillRect { glow: Some(_), .. })));
    }

    #[test]
    fn test_snake_game_over_text() {
        let mut state = SnakeState::new(1, SnakeTuning::default());
        state.phase = RunPhase::Ended;
        let cmds = snake_scene(&state, false);
        assert!(matches!(
            cmds.last(),
            Some(DrawCmd::Text { align: Align::Center, x, .. }) if *x == 160.0
        ));
    }
}
