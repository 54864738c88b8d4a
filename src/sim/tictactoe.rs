//! Two-player tic-tac-toe
//!
//! Turn based, no ticking. X always opens.

use serde::{Deserialize, Serialize};

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(&self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// Result of the game so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Mark),
    Draw,
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),
    #[error("cell {0} is already taken")]
    Occupied(usize),
    #[error("the game is already over")]
    GameOver,
}

/// Rows, columns, diagonals
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone)]
pub struct Board {
    pub cells: [Option<Mark>; 9],
    pub current: Mark,
    pub outcome: Outcome,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [None; 9],
            current: Mark::X,
            outcome: Outcome::InProgress,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the current player's mark at `index` (row-major, 0..9)
    pub fn play(&mut self, index: usize) -> Result<Outcome, MoveError> {
        if self.outcome != Outcome::InProgress {
            return Err(MoveError::GameOver);
        }
        let cell = self.cells.get_mut(index).ok_or(MoveError::OutOfRange(index))?;
        if cell.is_some() {
            return Err(MoveError::Occupied(index));
        }
        *cell = Some(self.current);

        self.outcome = evaluate(&self.cells);
        if self.outcome == Outcome::InProgress {
            self.current = self.current.other();
        }
        Ok(self.outcome)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Status line for the page
    pub fn status_text(&self) -> String {
        match self.outcome {
            Outcome::Draw => "It's a Draw!".to_string(),
            Outcome::Won(mark) => format!("Player {} Wins!", mark.as_str()),
            Outcome::InProgress => format!("Player {}'s Turn", self.current.as_str()),
        }
    }
}

fn evaluate(cells: &[Option<Mark>; 9]) -> Outcome {
    for [a, b, c] in LINES {
        if let Some(mark) = cells[a] {
            if cells[b] == Some(mark) && cells[c] == Some(mark) {
                return Outcome::Won(mark);
            }
        }
    }
    if cells.iter().all(Option::is_some) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(board: &mut Board, moves: &[usize]) -> Outcome {
        let mut outcome = Outcome::InProgress;
        for &m in moves {
            outcome = board.play(m).unwrap();
        }
        outcome
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut cells = [None; 9];
            for i in line {
                cells[i] = Some(Mark::O);
            }
            assert_eq!(evaluate(&cells), Outcome::Won(Mark::O), "line {line:?}");
        }
    }

    #[test]
    fn test_x_wins_top_row() {
        let mut board = Board::new();
        let outcome = play_all(&mut board, &[0, 3, 1, 4, 2]);
        assert_eq!(outcome, Outcome::Won(Mark::X));
        assert_eq!(board.status_text(), "Player X Wins!");
        assert_eq!(board.play(8), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut board = Board::new();
        // X O X / X O O / O X X
        let outcome = play_all(&mut board, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(board.status_text(), "It's a Draw!");
    }

    #[test]
    fn test_occupied_and_out_of_range() {
        let mut board = Board::new();
        board.play(4).unwrap();
        assert_eq!(board.play(4), Err(MoveError::Occupied(4)));
        assert_eq!(board.play(9), Err(MoveError::OutOfRange(9)));
        // Refused moves keep the turn
        assert_eq!(board.current, Mark::O);
    }

    #[test]
    fn test_reset_gives_turn_to_x() {
        let mut board = Board::new();
        board.play(0).unwrap();
        board.reset();
        assert!(board.cells.iter().all(Option::is_none));
        assert_eq!(board.status_text(), "Player X's Turn");
    }
}
