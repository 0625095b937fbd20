//! Noughts and crosses on a 3x3 grid. X moves first.

use std::fmt;

use game_tree::{Game, WIN_VALUE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

/// Cell chosen by a move, `x` across and `y` down, both in `0..3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    x_to_move: bool,
    cells: [Option<Mark>; 9],
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

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

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            x_to_move: true,
            cells: [None; 9],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Mark> {
        self.cells[y * 3 + x]
    }

    pub fn to_move(&self) -> Mark {
        if self.x_to_move { Mark::X } else { Mark::O }
    }

    /// Marks the cell for the side to move. Returns `None` if it is taken or
    /// the game is over.
    pub fn place(&self, at: Placement) -> Option<Self> {
        if at.x >= 3 || at.y >= 3 || self.is_over() {
            return None;
        }
        let idx = at.y * 3 + at.x;
        if self.cells[idx].is_some() {
            return None;
        }
        let mut next = self.clone();
        next.cells[idx] = Some(self.to_move());
        next.x_to_move = !self.x_to_move;
        Some(next)
    }

    /// Owner of a completed line, if any.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.cells.iter().all(Option::is_some)
    }
}

impl Game for TicTacToe {
    type Action = Placement;

    fn first_player_to_move(&self) -> bool {
        self.x_to_move
    }

    fn children(&self) -> Vec<(Self, Placement)> {
        let mut kids: Vec<(Self, Placement)> = (0..9)
            .filter(|&i| self.cells[i].is_none())
            .filter_map(|i| {
                let at = Placement { x: i % 3, y: i / 3 };
                self.place(at).map(|next| (next, at))
            })
            .collect();

        // A winning placement goes first.
        let mover = self.to_move();
        if let Some(win) = kids.iter().position(|(s, _)| s.winner() == Some(mover)) {
            kids.swap(0, win);
        }
        kids
    }

    /// No heuristic: a line decides the game, anything else is level.
    fn evaluate(&self) -> f32 {
        match self.winner() {
            Some(Mark::X) => WIN_VALUE,
            Some(Mark::O) => -WIN_VALUE,
            None => 0.0,
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To move: {:?}", self.to_move())?;
        for y in 0..3 {
            for x in 0..3 {
                let c = match self.get(x, y) {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tictactoe_tests.rs"]
mod tictactoe_tests;
