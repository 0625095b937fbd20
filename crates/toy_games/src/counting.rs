//! A race to nine balls.
//!
//! Players alternately either put balls in their pile or pass. Putting adds
//! one ball, or three if the player has passed since their last triple. The
//! first pile to reach [`TARGET`] wins.

use std::fmt;

use game_tree::{Game, WIN_VALUE};

pub const TARGET: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Pass,
    Put,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Turn::Pass => "no put",
            Turn::Put => "put",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountingGame {
    first_to_move: bool,
    /// Balls per player, first player at index 0.
    piles: [u32; 2],
    /// Whether each player has passed since their last triple.
    passed: [bool; 2],
}

impl CountingGame {
    pub fn new() -> Self {
        Self {
            first_to_move: true,
            ..Self::default()
        }
    }

    pub fn piles(&self) -> [u32; 2] {
        self.piles
    }

    fn mover(&self) -> usize {
        if self.first_to_move { 0 } else { 1 }
    }

    pub fn is_over(&self) -> bool {
        self.piles.iter().any(|&p| p >= TARGET)
    }

    pub fn play(&self, turn: Turn) -> Self {
        let mut next = self.clone();
        let me = self.mover();
        match turn {
            Turn::Pass => next.passed[me] = true,
            Turn::Put if self.passed[me] => {
                next.piles[me] += 3;
                next.passed[me] = false;
            }
            Turn::Put => next.piles[me] += 1,
        }
        next.first_to_move = !self.first_to_move;
        next
    }
}

impl Game for CountingGame {
    type Action = Turn;

    fn first_player_to_move(&self) -> bool {
        self.first_to_move
    }

    fn children(&self) -> Vec<(Self, Turn)> {
        if self.is_over() {
            return Vec::new();
        }
        [Turn::Pass, Turn::Put]
            .into_iter()
            .map(|turn| (self.play(turn), turn))
            .collect()
    }

    fn evaluate(&self) -> f32 {
        let [first, second] = self.piles;
        if first >= TARGET {
            WIN_VALUE
        } else if second >= TARGET {
            -WIN_VALUE
        } else {
            first as f32 - second as f32
        }
    }
}

impl fmt::Display for CountingGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.piles;
        let who = if self.first_to_move { "first" } else { "second" };
        write!(f, "{first} - {second}, {who} to move")
    }
}

#[cfg(test)]
#[path = "counting_tests.rs"]
mod counting_tests;
