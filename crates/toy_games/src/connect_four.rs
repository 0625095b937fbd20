//! Four in a row: 7 columns of 6 cells. Yellow moves first.

use std::fmt;

use game_tree::{Game, WIN_VALUE};

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

/// Highest heuristic magnitude, kept below a decided score.
const HEURISTIC_CAP: f32 = WIN_VALUE - 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disc {
    Yellow,
    Red,
}

impl Disc {
    fn sign(self) -> i8 {
        match self {
            Disc::Yellow => 1,
            Disc::Red => -1,
        }
    }
}

/// Column index a disc is dropped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drop(pub usize);

impl fmt::Display for Drop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectFour {
    yellow_to_move: bool,
    /// `columns[x][y]`, row 0 at the bottom. +1 yellow, -1 red, 0 empty.
    columns: [[i8; ROWS]; COLUMNS],
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectFour {
    pub fn new() -> Self {
        Self {
            yellow_to_move: true,
            columns: [[0; ROWS]; COLUMNS],
        }
    }

    pub fn to_move(&self) -> Disc {
        if self.yellow_to_move { Disc::Yellow } else { Disc::Red }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Disc> {
        match self.columns[x][y] {
            1 => Some(Disc::Yellow),
            -1 => Some(Disc::Red),
            _ => None,
        }
    }

    pub fn is_full(&self, column: usize) -> bool {
        self.columns[column][ROWS - 1] != 0
    }

    /// Drops a disc for the side to move. `None` if the column is full or
    /// out of range, or the game is already won.
    pub fn drop_disc(&self, column: usize) -> Option<Self> {
        if column >= COLUMNS || self.is_full(column) || self.winner().is_some() {
            return None;
        }
        let mut next = self.clone();
        let stack = &mut next.columns[column];
        let slot = stack.iter().position(|&c| c == 0)?;
        stack[slot] = self.to_move().sign();
        next.yellow_to_move = !self.yellow_to_move;
        Some(next)
    }

    fn cell(&self, x: i32, y: i32) -> i8 {
        self.columns[x as usize][y as usize]
    }

    pub fn winner(&self) -> Option<Disc> {
        const DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
        for x in 0..COLUMNS as i32 {
            for y in 0..ROWS as i32 {
                let first = self.cell(x, y);
                if first == 0 {
                    continue;
                }
                for (dx, dy) in DIRS {
                    let (ex, ey) = (x + 3 * dx, y + 3 * dy);
                    if !(0..COLUMNS as i32).contains(&ex) || !(0..ROWS as i32).contains(&ey) {
                        continue;
                    }
                    if (1..4).all(|i| self.cell(x + i * dx, y + i * dy) == first) {
                        return Some(if first > 0 { Disc::Yellow } else { Disc::Red });
                    }
                }
            }
        }
        None
    }

    /// Every straight and diagonal line long enough to hold four, as a start
    /// cell, a step and a length.
    fn lines() -> Vec<((i32, i32), (i32, i32), i32)> {
        let mut lines = Vec::new();
        for x in 0..COLUMNS as i32 {
            lines.push(((x, 0), (0, 1), ROWS as i32));
        }
        for y in 0..ROWS as i32 {
            lines.push(((0, y), (1, 0), COLUMNS as i32));
        }
        // Diagonals, rising then falling
        for (start, len) in [((0, 2), 4), ((0, 1), 5), ((0, 0), 6), ((1, 0), 6), ((2, 0), 5), ((3, 0), 4)] {
            lines.push((start, (1, 1), len));
        }
        for (start, len) in [((0, 3), 4), ((0, 4), 5), ((0, 5), 6), ((1, 5), 6), ((2, 5), 5), ((3, 5), 4)] {
            lines.push((start, (1, -1), len));
        }
        lines
    }

    /// Sum over open stretches of a line (own or empty cells, at least four
    /// long) of stretch length times own discs in it.
    fn line_potential(&self, sign: i8, (x0, y0): (i32, i32), (dx, dy): (i32, i32), len: i32) -> u32 {
        let mut score = 0;
        let mut potential = 0;
        let mut filled = 0;
        for i in 0..len {
            match self.cell(x0 + i * dx, y0 + i * dy) * sign {
                1 => {
                    filled += 1;
                    potential += 1;
                }
                0 => potential += 1,
                _ => {
                    if potential >= 4 {
                        score += potential * filled;
                    }
                    potential = 0;
                    filled = 0;
                }
            }
        }
        if potential >= 4 {
            score += potential * filled;
        }
        score
    }

    fn potential(&self, disc: Disc) -> f32 {
        Self::lines()
            .into_iter()
            .map(|(start, step, len)| self.line_potential(disc.sign(), start, step, len))
            .sum::<u32>() as f32
            / 100.0
    }
}

impl Game for ConnectFour {
    type Action = Drop;

    fn first_player_to_move(&self) -> bool {
        self.yellow_to_move
    }

    fn children(&self) -> Vec<(Self, Drop)> {
        (0..COLUMNS)
            .filter_map(|c| self.drop_disc(c).map(|next| (next, Drop(c))))
            .collect()
    }

    fn evaluate(&self) -> f32 {
        match self.winner() {
            Some(Disc::Yellow) => WIN_VALUE,
            Some(Disc::Red) => -WIN_VALUE,
            None => {
                let score = self.potential(Disc::Yellow) - self.potential(Disc::Red);
                score.clamp(-HEURISTIC_CAP, HEURISTIC_CAP)
            }
        }
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To move: {:?}", self.to_move())?;
        writeln!(f, " 0 1 2 3 4 5 6")?;
        for y in (0..ROWS).rev() {
            write!(f, "|")?;
            for x in 0..COLUMNS {
                let c = match self.get(x, y) {
                    Some(Disc::Yellow) => 'Y',
                    Some(Disc::Red) => 'R',
                    None => ' ',
                };
                write!(f, "{c}|")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "connect_four_tests.rs"]
mod connect_four_tests;
