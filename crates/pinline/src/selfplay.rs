//! Playing whole games with the search on both sides.

use game_tree::{Game, best_child};
use pinline_core::{Color, GameStatus, Position, status};
use serde::Serialize;
use tracing::debug;

/// Plays from `start` until the game ends or `max_plies` moves were made,
/// both sides searching `depth` plies. Returns every action with the state
/// it produced.
pub fn play_out<G>(start: G, depth: u32, max_plies: usize) -> Vec<(G::Action, G)>
where
    G: Game + Clone,
{
    let mut line: Vec<(G::Action, G)> = Vec::new();
    let mut state = start;

    while line.len() < max_plies {
        let Some((next, best)) = best_child(&state, depth) else {
            break; // Terminal
        };
        debug!(ply = line.len(), action = ?best.action, value = best.value, "played");
        state = next.clone();
        line.push((best.action, next));
    }
    line
}

/// Final result of a chess game in PGN notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameResult {
    #[serde(rename = "1-0")]
    WhiteWins,
    #[serde(rename = "0-1")]
    BlackWins,
    #[serde(rename = "1/2-1/2")]
    Draw,
    /// Stopped before the game ended
    #[serde(rename = "*")]
    Unfinished,
}

impl GameResult {
    pub fn of(pos: &Position) -> Self {
        match status(pos) {
            GameStatus::Ongoing => GameResult::Unfinished,
            GameStatus::Checkmate if pos.side_to_move == Color::White => GameResult::BlackWins,
            GameStatus::Checkmate => GameResult::WhiteWins,
            GameStatus::Stalemate | GameStatus::MoveLimitDraw => GameResult::Draw,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unfinished => "*",
        }
    }
}

/// A finished (or abandoned) chess self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct SelfPlayReport {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub result: GameResult,
    pub final_fen: String,
}

pub fn selfplay(start: &Position, depth: u32, max_plies: usize) -> SelfPlayReport {
    let line = play_out(start.clone(), depth, max_plies);
    let last = line.last().map_or(start, |(_, pos)| pos);
    SelfPlayReport {
        start_fen: start.to_fen(),
        moves: line.iter().map(|(action, _)| action.to_string()).collect(),
        result: GameResult::of(last),
        final_fen: last.to_fen(),
    }
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;
